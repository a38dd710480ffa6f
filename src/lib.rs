//! Autosuggest - a text input with live suggestions
//!
//! This library provides the state machine behind an autocomplete input:
//! matching typed text against candidates, keyboard-driven highlighting and
//! committing, and debounced lookups against an asynchronous backend.
//!
//! # Modules
//!
//! - **`matcher`** - case-insensitive candidate filtering
//! - **`debounce`** - trailing-edge debouncer owning its timer
//! - **`source`** - static and remote suggestion sources
//! - **`controller`** - the input/dropdown state machine
//! - **`config`** - settings file handling
//! - **`tui`** - a terminal front end hosting one controller
//! - **`candidates`** - candidate list files for static sources

use thiserror::Error;

pub mod candidates;
pub mod cli;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod matcher;
pub mod source;
pub mod tui;

pub use controller::{ControllerConfig, InputController, Key, KeyOutcome, SuggestionState};
pub use source::{SuggestionSource, SuggestionTransport};

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum AutosuggestError {
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Timer could not be scheduled
    #[error("Scheduling error: {0}")]
    DebounceError(#[from] debounce::DebounceError),
    /// Candidate file has an unsupported shape
    #[error("Candidate file error: {0}")]
    CandidatesError(#[from] serde_json::Error),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for autosuggest operations
pub type Result<T> = std::result::Result<T, AutosuggestError>;
