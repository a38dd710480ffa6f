//! Suggestion sources
//!
//! A [`SuggestionSource`] supplies the candidate list the controller matches
//! against. It is either:
//!
//! - **Static**: a fixed in-memory list returned as-is for every query;
//!   filtering happens downstream in the matcher.
//! - **Remote**: an asynchronous lookup by partial text through a
//!   [`SuggestionTransport`]. Results are expected to be filtered by the
//!   backend already.
//!
//! Remote lookups never fail from the caller's point of view: a transport
//! error is logged and resolves to an empty list.

mod error;
mod mock;

pub use error::TransportError;
pub use mock::{MockTransport, movie_titles};

use async_trait::async_trait;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Backend able to look up candidates by partial text
///
/// Implementations should not retry or cache; [`RemoteSource`] owns both
/// the error policy and the response cache.
#[async_trait]
pub trait SuggestionTransport: Send + Sync {
    /// Request candidates matching `partial`
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the lookup cannot be completed.
    async fn request(&self, partial: &str) -> Result<Vec<String>, TransportError>;
}

/// Which kind of source backs a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Fixed in-memory candidates
    Static,
    /// Asynchronous lookup by query
    Remote,
}

/// Provider of candidates for the controller
#[derive(Clone)]
pub enum SuggestionSource {
    /// Fixed list, answered synchronously
    Static(StaticSource),
    /// Debounced asynchronous lookup
    Remote(RemoteSource),
}

impl SuggestionSource {
    /// Static source over `candidates`
    #[must_use]
    pub fn from_candidates(candidates: Vec<String>) -> Self {
        Self::Static(StaticSource::new(candidates))
    }

    /// Remote source over `transport` with the default response cache
    #[must_use]
    pub fn remote(transport: impl SuggestionTransport + 'static) -> Self {
        Self::Remote(RemoteSource::new(transport))
    }

    /// Which variant this is
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Static(_) => SourceKind::Static,
            Self::Remote(_) => SourceKind::Remote,
        }
    }
}

impl std::fmt::Debug for SuggestionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(source) => f.debug_tuple("Static").field(source).finish(),
            Self::Remote(source) => f.debug_tuple("Remote").field(source).finish(),
        }
    }
}

/// Fixed candidate list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    candidates: Vec<String>,
}

impl StaticSource {
    /// Create a static source
    #[must_use]
    pub const fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// All candidates; the query does not narrow a static source
    #[must_use]
    pub fn fetch(&self, _query: &str) -> &[String] {
        &self.candidates
    }

    /// Replace the candidate list
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
    }
}

/// Default lifetime of a cached remote response
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Default number of queries kept in the response cache
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Candidates looked up through a transport, cached per query
#[derive(Clone)]
pub struct RemoteSource {
    transport: Arc<dyn SuggestionTransport>,
    cache: Option<Cache<String, Vec<String>>>,
}

impl RemoteSource {
    /// Create a remote source with the default cache settings
    #[must_use]
    pub fn new(transport: impl SuggestionTransport + 'static) -> Self {
        Self::with_cache_config(transport, DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }

    /// Create a remote source with custom cache settings
    ///
    /// # Arguments
    ///
    /// * `transport` - Backend used for lookups
    /// * `ttl` - Time-to-live for cached responses
    /// * `max_capacity` - Maximum number of cached queries (0 disables caching)
    #[must_use]
    pub fn with_cache_config(
        transport: impl SuggestionTransport + 'static,
        ttl: Duration,
        max_capacity: u64,
    ) -> Self {
        let cache = (max_capacity > 0).then(|| {
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(max_capacity)
                .build()
        });

        Self {
            transport: Arc::new(transport),
            cache,
        }
    }

    /// Look up candidates for `query`
    ///
    /// Transport failures are logged and yield an empty list. Only
    /// successful responses are cached.
    pub async fn fetch(&self, query: &str) -> Vec<String> {
        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(query)) {
            tracing::trace!(query, count = hit.len(), "suggestion cache hit");
            return hit;
        }

        match self.transport.request(query).await {
            Ok(candidates) => {
                tracing::debug!(query, count = candidates.len(), "suggestions fetched");
                if let Some(cache) = &self.cache {
                    cache.insert(query.to_string(), candidates.clone());
                }
                candidates
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "suggestion lookup failed");
                Vec::new()
            }
        }
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }
}

impl std::fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSource")
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
