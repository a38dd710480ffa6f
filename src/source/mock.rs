//! In-memory transport for tests and the demo binary

use super::{SuggestionTransport, TransportError};
use crate::matcher::match_candidates;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MOVIE_TITLES: &[&str] = &[
    "The Shawshank Redemption",
    "The Godfather",
    "The Godfather: Part II",
    "The Dark Knight",
    "12 Angry Men",
    "Schindler's List",
    "The Lord of the Rings: The Return of the King",
    "Pulp Fiction",
    "The Good, the Bad and the Ugly",
    "Fight Club",
    "Forrest Gump",
    "Inception",
    "The Matrix",
    "Goodfellas",
    "Seven Samurai",
    "City of God",
    "Se7en",
    "The Silence of the Lambs",
    "It's a Wonderful Life",
    "Life Is Beautiful",
    "Spirited Away",
    "Saving Private Ryan",
    "Interstellar",
    "The Green Mile",
    "Parasite",
    "Leon: The Professional",
    "Back to the Future",
    "Alien",
    "Aliens",
    "Apocalypse Now",
];

/// A built-in list of film titles for demos and tests
#[must_use]
pub fn movie_titles() -> Vec<String> {
    MOVIE_TITLES.iter().map(ToString::to_string).collect()
}

/// Transport answering from a fixed list, filtered like a backend would
///
/// Clones share the same list, request log and failure switch.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

#[derive(Debug, Default)]
struct MockInner {
    titles: Vec<String>,
    latency: Duration,
    failing: AtomicBool,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Transport over the given titles with no latency
    #[must_use]
    pub fn new(titles: Vec<String>) -> Self {
        Self::with_latency(titles, Duration::ZERO)
    }

    /// Transport over the built-in film titles
    #[must_use]
    pub fn movies() -> Self {
        Self::new(movie_titles())
    }

    /// Transport that waits `latency` before answering
    #[must_use]
    pub fn with_latency(titles: Vec<String>, latency: Duration) -> Self {
        Self {
            inner: Arc::new(MockInner {
                titles,
                latency,
                failing: AtomicBool::new(false),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Make subsequent requests fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Every query requested so far, in order
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.inner
            .requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SuggestionTransport for MockTransport {
    async fn request(&self, partial: &str) -> Result<Vec<String>, TransportError> {
        if let Ok(mut requests) = self.inner.requests.lock() {
            requests.push(partial.to_string());
        }

        if !self.inner.latency.is_zero() {
            tokio::time::sleep(self.inner.latency).await;
        }

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("mock backend is down".to_string()));
        }

        Ok(match_candidates(partial, &self.inner.titles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_filters_server_side() {
        let transport = MockTransport::movies();
        let result = transport.request("godfather").await.unwrap();
        assert_eq!(
            result,
            vec!["The Godfather".to_string(), "The Godfather: Part II".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let transport = MockTransport::new(vec!["x".into()]);
        transport.set_failing(true);
        let err = transport.request("x").await.unwrap_err();
        assert!(matches!(err, TransportError::Unavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_delays_answer() {
        let transport = MockTransport::with_latency(vec!["x".into()], Duration::from_millis(40));
        let started = tokio::time::Instant::now();
        transport.request("").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
