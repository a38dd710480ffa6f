//! Command-line interface definitions and parsing
//!
//! The `autosuggest` binary opens a terminal input with a suggestion
//! dropdown and prints the accepted value. Suggestions come from:
//!
//! - a candidate file (`--candidates`), matched locally,
//! - the built-in mock backend (`--remote`), looked up with debouncing,
//! - otherwise the built-in film titles, matched locally.
//!
//! Flags override values from the config file.

use crate::config::AutosuggestConfig;
use crate::matcher::MatchStrategy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Match strategy as given on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Case-insensitive substring
    Substring,
    /// Case-insensitive regular expression
    Pattern,
}

impl From<StrategyArg> for MatchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Substring => Self::Substring,
            StrategyArg::Pattern => Self::Pattern,
        }
    }
}

/// Text input with live suggestions
#[derive(Parser, Debug)]
#[command(name = "autosuggest", version, about, long_about = None)]
pub struct Cli {
    /// File with candidates: JSON array or one per line
    #[arg(short, long, value_name = "FILE", conflicts_with = "remote")]
    pub candidates: Option<PathBuf>,

    /// Look suggestions up through the mock backend instead of matching locally
    #[arg(short, long)]
    pub remote: bool,

    /// Quiet period before a remote lookup fires
    #[arg(short, long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Simulated backend latency for --remote
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub latency_ms: u64,

    /// Initial input value
    #[arg(short = 'i', long, value_name = "TEXT")]
    pub value: Option<String>,

    /// How typed text is matched against candidates
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Prompt shown above the input
    #[arg(short, long, default_value = "Search")]
    pub prompt: String,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write logs
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Overlay command line flags on a loaded configuration
    pub fn apply_overrides(&self, config: &mut AutosuggestConfig) {
        if let Some(ms) = self.debounce_ms {
            config.debounce_interval_ms = ms;
        }
        if let Some(value) = &self.value {
            config.initial_value.clone_from(value);
        }
        if let Some(strategy) = self.strategy {
            config.match_strategy = strategy.into();
        }
    }

    /// Simulated backend latency
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Log file location, defaulting to the user's cache directory
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::cache_dir().map(|dir| dir.join("autosuggest").join("autosuggest.log"))
        })
    }
}
