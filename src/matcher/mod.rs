//! Suggestion matching
//!
//! Maps a query and a candidate list to the ordered subsequence of
//! candidates that should be offered to the user.
//!
//! Two strategies are available:
//!
//! - **Substring** (default): case-insensitive substring containment.
//!   Regex metacharacters in either the query or the candidates are plain text.
//! - **Pattern**: the query is a case-insensitive regular expression. A query
//!   that does not compile keeps every candidate (fail open) instead of
//!   rejecting the whole pass.
//!
//! Every strategy returns all candidates for an empty query and never
//! reorders or duplicates them.

mod error;

pub use error::MatchError;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How a query is compared against candidates
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Case-insensitive substring containment
    #[default]
    Substring,
    /// Case-insensitive regular expression, failing open on bad patterns
    Pattern,
}

impl MatchStrategy {
    /// Filter `candidates` against `query` with this strategy
    #[must_use]
    pub fn apply(self, query: &str, candidates: &[String]) -> Vec<String> {
        match self {
            Self::Substring => match_candidates(query, candidates),
            Self::Pattern => match_pattern(query, candidates),
        }
    }
}

/// Return the candidates whose lowercase form contains the lowercase query
///
/// An empty query returns a copy of `candidates`.
///
/// # Examples
///
/// ```
/// use autosuggest::matcher::match_candidates;
///
/// let candidates = vec!["apple".to_string(), "Banana".to_string(), "coconut".to_string()];
/// assert_eq!(match_candidates("AN", &candidates), vec!["Banana".to_string()]);
/// assert_eq!(match_candidates("", &candidates), candidates);
/// ```
#[must_use]
pub fn match_candidates(query: &str, candidates: &[String]) -> Vec<String> {
    if query.is_empty() {
        return candidates.to_vec();
    }

    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Filter with the query compiled as a regular expression
///
/// Falls back to the unfiltered list when the query is not a valid pattern.
#[must_use]
pub fn match_pattern(query: &str, candidates: &[String]) -> Vec<String> {
    if query.is_empty() {
        return candidates.to_vec();
    }

    match PatternMatcher::compile(query) {
        Ok(matcher) => candidates
            .iter()
            .filter(|candidate| matcher.is_match(candidate))
            .cloned()
            .collect(),
        Err(e) => {
            tracing::debug!("{e}; keeping all {} candidates", candidates.len());
            candidates.to_vec()
        }
    }
}

/// A compiled, case-insensitive query pattern
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    compiled: Regex,
}

impl PatternMatcher {
    /// Compile a query into a case-insensitive pattern
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidPattern` if the query is not a valid regex.
    pub fn compile(query: &str) -> Result<Self, MatchError> {
        RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .map(|compiled| Self { compiled })
            .map_err(|e| MatchError::invalid_pattern(query, &e.to_string()))
    }

    /// Whether the candidate matches this pattern
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.compiled.is_match(candidate)
    }
}
