//! Route handlers organized by resource

pub mod health;
pub mod images;
pub mod games;
