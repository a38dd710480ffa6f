use thiserror::Error;

/// Errors produced while building a matcher from a query
#[derive(Debug, Error)]
pub enum MatchError {
    /// Query could not be compiled into a pattern
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl MatchError {
    #[must_use]
    pub fn invalid_pattern(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
