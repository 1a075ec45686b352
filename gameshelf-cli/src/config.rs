//! Environment configuration

use std::path::PathBuf;

/// Load `.env` from the current directory, if present.
///
/// Variables already set in the environment are never overwritten. Runs
/// before tracing is initialised, so the outcome is returned for logging
/// later rather than logged here.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}
