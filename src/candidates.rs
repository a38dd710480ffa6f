//! Candidate list loading
//!
//! Reads the suggestions for a static source from a file. Accepted formats:
//!
//! - a JSON array of strings: `["Alien", "Heat"]`
//! - a JSON array of records with a `title` field: `[{"title": "Alien"}]`
//! - anything else is read as plain text, one candidate per non-blank line

use crate::{AutosuggestError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Label(String),
    Record { title: String },
}

impl From<Entry> for String {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Label(label) | Entry::Record { title: label } => label,
        }
    }
}

/// Load candidates from a JSON or plain-text file
///
/// # Errors
///
/// Returns `AutosuggestError::IoError` if the file cannot be read, or
/// `AutosuggestError::CandidatesError` if it looks like JSON but is not a
/// supported shape.
pub fn load_candidates(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    parse_candidates(&content)
}

/// Parse candidates from file contents
///
/// # Errors
///
/// Returns `AutosuggestError::CandidatesError` for JSON input that is not an
/// array of strings or titled records.
pub fn parse_candidates(content: &str) -> Result<Vec<String>> {
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        let entries: Vec<Entry> = serde_json::from_str(trimmed)?;
        return Ok(entries.into_iter().map(String::from).collect());
    }

    if trimmed.starts_with('{') {
        return Err(AutosuggestError::InvalidInput(
            "candidate file must contain a JSON array, not an object".to_string(),
        ));
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_strings() {
        let parsed = parse_candidates(r#"["Alien", "Heat"]"#).unwrap();
        assert_eq!(parsed, vec!["Alien".to_string(), "Heat".to_string()]);
    }

    #[test]
    fn test_json_records_with_title() {
        let parsed =
            parse_candidates(r#"[{"title": "Alien", "year": 1979}, {"title": "Heat"}]"#).unwrap();
        assert_eq!(parsed, vec!["Alien".to_string(), "Heat".to_string()]);
    }

    #[test]
    fn test_plain_text_lines() {
        let parsed = parse_candidates("Alien\n\n  Heat  \r\nSe7en\n").unwrap();
        assert_eq!(
            parsed,
            vec!["Alien".to_string(), "Heat".to_string(), "Se7en".to_string()]
        );
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            parse_candidates("[1, 2]"),
            Err(AutosuggestError::CandidatesError(_))
        ));
        assert!(matches!(
            parse_candidates(r#"{"title": "Alien"}"#),
            Err(AutosuggestError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "apple\nbanana").unwrap();

        let loaded = load_candidates(file.path()).unwrap();
        assert_eq!(loaded, vec!["apple".to_string(), "banana".to_string()]);
    }

    #[test]
    fn test_missing_file() {
        let result = load_candidates(Path::new("definitely/not/here.txt"));
        assert!(matches!(result, Err(AutosuggestError::IoError(_))));
    }
}
