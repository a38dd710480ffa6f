//! Autosuggest CLI application entry point
//!
//! Opens a terminal input with a live suggestion dropdown and prints the
//! accepted value to stdout, so it can be used from scripts.
//!
//! # Usage
//!
//! ```bash
//! # Match against the built-in film titles
//! autosuggest
//!
//! # Match against a candidate file
//! autosuggest --candidates fruits.txt
//!
//! # Debounced lookups against the mock backend
//! autosuggest --remote --latency-ms 300 --debounce-ms 150
//!
//! # Choose a value inside a script
//! title=$(autosuggest -p "Film") || exit 1
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/autosuggest/config.toml` on Linux) and overridden by flags.
//! Logs go to a file; set `AUTOSUGGEST_LOG=debug` for more detail.

use autosuggest::{
    AutosuggestError, InputController, SuggestionSource,
    candidates::load_candidates,
    cli::Cli,
    config::AutosuggestConfig,
    source::{MockTransport, RemoteSource, movie_titles},
    tui::TerminalFrontend,
};
use colored::Colorize;
use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, AutosuggestError>;

/// Environment variable holding the log filter
const LOG_ENV: &str = "AUTOSUGGEST_LOG";

/// Install a file-backed tracing subscriber
///
/// Logging to the terminal would corrupt the TUI, so output goes to `path`.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Build the suggestion source selected on the command line
fn build_source(cli: &Cli, config: &AutosuggestConfig) -> Result<SuggestionSource> {
    if cli.remote {
        let transport = MockTransport::with_latency(movie_titles(), cli.latency());
        let remote =
            RemoteSource::with_cache_config(transport, config.cache.ttl(), config.cache.capacity);
        return Ok(SuggestionSource::Remote(remote));
    }

    let candidates = match &cli.candidates {
        Some(path) => load_candidates(path)?,
        None => movie_titles(),
    };
    Ok(SuggestionSource::from_candidates(candidates))
}

fn run(cli: &Cli) -> Result<Option<String>> {
    let mut config = match &cli.config {
        Some(path) => AutosuggestConfig::load_from(path)?,
        None => AutosuggestConfig::load()?,
    };
    cli.apply_overrides(&mut config);

    if let Some(log_path) = cli.log_path() {
        init_logging(&log_path)?;
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;
    let _guard = runtime.enter();

    let source = build_source(cli, &config)?;
    let controller_config = config
        .controller_config()
        .with_fetch_on_mount(cli.remote);

    tracing::info!(
        source = ?source.kind(),
        debounce_ms = config.debounce_interval_ms,
        strategy = ?config.match_strategy,
        "starting autosuggest"
    );

    let mut controller = InputController::new(controller_config, source)?
        .with_on_change(|value| tracing::debug!(value, "value changed"));

    let frontend = TerminalFrontend::new(cli.prompt.clone()).with_max_visible(config.max_visible);
    let accepted = frontend.run(&mut controller);
    controller.teardown();

    accepted
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(Some(value)) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}", "Cancelled".dimmed());
            ExitCode::from(130)
        }
        Err(e) => {
            tracing::error!(error = %e, "autosuggest failed");
            eprintln!("{} {e}", "❌ Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
