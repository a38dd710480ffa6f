//! Input controller
//!
//! Wires the dropdown state machine to a suggestion source. Every host event
//! goes through [`InputController`]:
//!
//! - `on_text_input` for typed text,
//! - `on_key_press` for Escape, Enter, Tab, Space and the arrow keys,
//! - `on_item_select` for a clicked suggestion.
//!
//! With a static source the matcher runs synchronously on every change. With
//! a remote source changes are debounced and the lookup runs on the tokio
//! runtime; completed lookups queue up on a channel until the host calls
//! [`InputController::poll_suggestions`] (or awaits
//! [`InputController::next_suggestions`]). A result is applied only if it
//! was fetched for the value currently in the input; older ones are dropped.
//!
//! Dropping the controller cancels the pending debounce timer and closes the
//! channel, so lookups still in flight complete into nothing.
//!
//! # Example
//!
//! ```
//! use autosuggest::controller::{ControllerConfig, InputController, Key};
//! use autosuggest::source::SuggestionSource;
//!
//! # fn main() -> autosuggest::Result<()> {
//! let source = SuggestionSource::from_candidates(vec![
//!     "apple".to_string(),
//!     "banana".to_string(),
//!     "coconut".to_string(),
//! ]);
//! let mut input = InputController::new(ControllerConfig::default(), source)?;
//!
//! input.on_text_input("an");
//! assert_eq!(input.visible_suggestions(), ["banana".to_string()]);
//!
//! input.on_key_press(Key::ArrowDown);
//! input.on_key_press(Key::Enter);
//! assert_eq!(input.value(), "banana");
//! assert!(!input.is_open());
//! # Ok(())
//! # }
//! ```

mod keys;
mod state;

pub use keys::{Key, KeyOutcome};
pub use state::SuggestionState;

use crate::debounce::{DebounceError, Debouncer};
use crate::matcher::MatchStrategy;
use crate::source::{RemoteSource, SourceKind, StaticSource, SuggestionSource};
use crate::{AutosuggestError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Default quiet period before a remote lookup is issued
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(250);

/// Callback receiving every accepted value
pub type ChangeHandler = Box<dyn FnMut(&str) + Send>;

/// Construction-time settings of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Value the input starts with
    pub initial_value: String,
    /// Quiet period before a remote lookup fires
    pub debounce_interval: Duration,
    /// How the query is compared against candidates
    pub match_strategy: MatchStrategy,
    /// Run remote results through the matcher before showing them
    pub refilter_remote: bool,
    /// Look up suggestions for the initial value right away (remote only)
    pub fetch_on_mount: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_value: String::new(),
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            match_strategy: MatchStrategy::Substring,
            refilter_remote: true,
            fetch_on_mount: false,
        }
    }
}

impl ControllerConfig {
    /// Set the initial value
    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    /// Set the debounce interval
    #[must_use]
    pub const fn with_debounce_interval(mut self, interval: Duration) -> Self {
        self.debounce_interval = interval;
        self
    }

    /// Set the match strategy
    #[must_use]
    pub const fn with_match_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.match_strategy = strategy;
        self
    }

    /// Enable or disable re-filtering of remote results
    #[must_use]
    pub const fn with_refilter_remote(mut self, refilter: bool) -> Self {
        self.refilter_remote = refilter;
        self
    }

    /// Enable or disable the initial remote lookup
    #[must_use]
    pub const fn with_fetch_on_mount(mut self, fetch: bool) -> Self {
        self.fetch_on_mount = fetch;
        self
    }
}

/// A completed remote lookup
#[derive(Debug)]
struct Fetched {
    query: String,
    candidates: Vec<String>,
}

enum Backend {
    Static(StaticSource),
    Remote(RemoteLink),
}

struct RemoteLink {
    debouncer: Debouncer<String>,
    results: mpsc::UnboundedReceiver<Fetched>,
    // Lookups spawned but not yet received
    in_flight: Arc<AtomicUsize>,
}

impl RemoteLink {
    fn received(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn is_idle(&self) -> bool {
        !self.debouncer.is_pending() && self.in_flight.load(Ordering::SeqCst) == 0
    }
}

/// Text input with a suggestion dropdown
pub struct InputController {
    state: SuggestionState,
    backend: Backend,
    strategy: MatchStrategy,
    refilter_remote: bool,
    on_change: Option<ChangeHandler>,
}

impl InputController {
    /// Create a controller over `source`
    ///
    /// A static source is matched against the initial value immediately. A
    /// remote source needs a tokio runtime and starts with an empty match
    /// set, looking up the initial value only if `fetch_on_mount` is set.
    ///
    /// # Errors
    ///
    /// Returns `AutosuggestError::DebounceError` if the source is remote and no
    /// tokio runtime is available.
    pub fn new(config: ControllerConfig, source: SuggestionSource) -> Result<Self> {
        let mut state = SuggestionState::new(config.initial_value);

        let backend = match source {
            SuggestionSource::Static(source) => {
                let value = state.value();
                let matches = config.match_strategy.apply(value, source.fetch(value));
                state.replace_matches(matches);
                Backend::Static(source)
            }
            SuggestionSource::Remote(source) => {
                let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
                let (sender, results) = mpsc::unbounded_channel();
                let in_flight = Arc::new(AtomicUsize::new(0));
                let fetcher = Fetcher {
                    runtime: runtime.clone(),
                    source,
                    sender,
                    in_flight: Arc::clone(&in_flight),
                };

                if config.fetch_on_mount {
                    fetcher.spawn(state.value().to_string());
                }

                let debouncer = Debouncer::with_handle(
                    runtime,
                    config.debounce_interval,
                    move |query: String| fetcher.spawn(query),
                );

                Backend::Remote(RemoteLink {
                    debouncer,
                    results,
                    in_flight,
                })
            }
        };

        Ok(Self {
            state,
            backend,
            strategy: config.match_strategy,
            refilter_remote: config.refilter_remote,
            on_change: None,
        })
    }

    /// Register the callback invoked with every accepted value
    #[must_use]
    pub fn with_on_change(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.set_on_change(handler);
        self
    }

    /// Replace the change callback
    pub fn set_on_change(&mut self, handler: impl FnMut(&str) + Send + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    /// Handle the input's full new text
    ///
    /// Returns `false` if the text did not change. Otherwise the dropdown
    /// opens, the change callback fires and matches are recomputed (or a
    /// lookup is scheduled).
    pub fn on_text_input(&mut self, new_value: impl Into<String>) -> bool {
        if !self.state.input(new_value) {
            return false;
        }

        self.notify();
        self.rematch();
        true
    }

    /// Handle a dropdown key
    ///
    /// A commit fires the change callback and recomputes matches for the
    /// committed value.
    pub fn on_key_press(&mut self, key: Key) -> KeyOutcome {
        let outcome = self.state.press(key);

        if let KeyOutcome::Committed(value) = &outcome {
            tracing::debug!(value = value.as_str(), ?key, "suggestion committed");
            self.notify();
            self.rematch();
        }

        outcome
    }

    /// Handle a click on a suggestion
    ///
    /// Sets the value and closes the dropdown. The change callback is not
    /// invoked and matches are left as they are.
    pub fn on_item_select(&mut self, candidate: &str) -> bool {
        self.state.select_item(candidate)
    }

    /// Close the dropdown without changing the value
    pub fn close(&mut self) {
        self.state.close();
    }

    /// Replace the candidates of a static source and re-match
    ///
    /// # Errors
    ///
    /// Returns `AutosuggestError::InvalidInput` for a remote source, whose
    /// candidates come from its transport.
    pub fn set_candidates(&mut self, candidates: Vec<String>) -> Result<()> {
        match &mut self.backend {
            Backend::Static(source) => {
                source.set_candidates(candidates);
                self.rematch();
                Ok(())
            }
            Backend::Remote(_) => Err(AutosuggestError::InvalidInput(
                "candidates of a remote source cannot be replaced".to_string(),
            )),
        }
    }

    /// Apply every lookup that has completed so far
    ///
    /// Returns `true` if the match set was replaced.
    pub fn poll_suggestions(&mut self) -> bool {
        let Backend::Remote(link) = &mut self.backend else {
            return false;
        };

        let mut applied = false;
        while let Ok(fetched) = link.results.try_recv() {
            link.received();
            applied |= apply_fetched(&mut self.state, self.strategy, self.refilter_remote, fetched);
        }
        applied
    }

    /// Wait for the next completed lookup and apply it
    ///
    /// Returns `true` if it replaced the match set, `false` if it was stale,
    /// the source is static, or no lookup is scheduled or in flight.
    pub async fn next_suggestions(&mut self) -> bool {
        let Backend::Remote(link) = &mut self.backend else {
            return false;
        };
        if link.is_idle() {
            return false;
        }

        match link.results.recv().await {
            Some(fetched) => {
                link.received();
                apply_fetched(&mut self.state, self.strategy, self.refilter_remote, fetched)
            }
            None => false,
        }
    }

    /// Whether a debounced lookup is waiting for its quiet period
    #[must_use]
    pub fn has_pending_fetch(&self) -> bool {
        match &self.backend {
            Backend::Static(_) => false,
            Backend::Remote(link) => link.debouncer.is_pending(),
        }
    }

    /// Cancel pending work and release the controller
    pub fn teardown(mut self) {
        if let Backend::Remote(link) = &mut self.backend {
            link.debouncer.cancel();
            link.results.close();
        }
    }

    /// Current input value
    #[must_use]
    pub fn value(&self) -> &str {
        self.state.value()
    }

    /// Suggestions to render
    #[must_use]
    pub fn visible_suggestions(&self) -> &[String] {
        self.state.visible()
    }

    /// The highlighted suggestion, if any
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.state.highlighted()
    }

    /// Highlighted position in the match set
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Highlighted position, or -1 when nothing is highlighted
    #[must_use]
    pub fn selection_index(&self) -> isize {
        self.state.selection_index()
    }

    /// Whether the dropdown is open
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Current match set, whether or not it is shown
    #[must_use]
    pub fn matches(&self) -> &[String] {
        self.state.matches()
    }

    /// The underlying state machine
    #[must_use]
    pub const fn state(&self) -> &SuggestionState {
        &self.state
    }

    /// Which kind of source backs this controller
    #[must_use]
    pub const fn source_kind(&self) -> SourceKind {
        match self.backend {
            Backend::Static(_) => SourceKind::Static,
            Backend::Remote(_) => SourceKind::Remote,
        }
    }

    fn notify(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(self.state.value());
        }
    }

    fn rematch(&mut self) {
        match &mut self.backend {
            Backend::Static(source) => {
                let value = self.state.value();
                let matches = self.strategy.apply(value, source.fetch(value));
                self.state.replace_matches(matches);
            }
            Backend::Remote(link) => {
                tracing::trace!(query = self.state.value(), "lookup scheduled");
                link.debouncer.trigger(self.state.value().to_string());
            }
        }
    }
}

impl std::fmt::Debug for InputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputController")
            .field("state", &self.state)
            .field("source", &self.source_kind())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Spawns lookups and routes their results back to the controller
struct Fetcher {
    runtime: Handle,
    source: RemoteSource,
    sender: mpsc::UnboundedSender<Fetched>,
    in_flight: Arc<AtomicUsize>,
}

impl Fetcher {
    fn spawn(&self, query: String) {
        let source = self.source.clone();
        let sender = self.sender.clone();
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        self.runtime.spawn(async move {
            let candidates = source.fetch(&query).await;
            if sender.send(Fetched { query, candidates }).is_err() {
                tracing::trace!("controller torn down; lookup result discarded");
            }
        });
    }
}

fn apply_fetched(
    state: &mut SuggestionState,
    strategy: MatchStrategy,
    refilter: bool,
    fetched: Fetched,
) -> bool {
    if fetched.query != state.value() {
        tracing::trace!(
            query = fetched.query.as_str(),
            current = state.value(),
            "stale suggestions dropped"
        );
        return false;
    }

    let matches = if refilter {
        strategy.apply(&fetched.query, &fetched.candidates)
    } else {
        fetched.candidates
    };
    state.replace_matches(matches);
    true
}
