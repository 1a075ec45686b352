//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier is missing or not an integer
    InvalidId { field: &'static str },

    /// Required multipart field was not sent
    MissingField { field: &'static str },

    /// Body could not be parsed
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId { field } => write!(f, "invalid {}", field),
            Self::MissingField { field } => write!(f, "missing {} field", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
