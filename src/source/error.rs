//! Suggestion source error types

use thiserror::Error;

/// Errors a transport can report for a single lookup
#[derive(Debug, Error)]
pub enum TransportError {
    /// The backend could not be reached
    #[error("Suggestion backend unavailable: {0}")]
    Unavailable(String),
}
