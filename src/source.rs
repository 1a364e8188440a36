//! Suggestion sources.
//!
//! A source turns the current query into an ordered list of items. It is the
//! only data input of the autocomplete: searching, ranking and I/O all live
//! behind this trait.
//!
//! ```rust
//! use bubbletea_autocomplete::source::{from_fn, FetchError, SuggestionSource};
//!
//! let source = from_fn(|query: String| async move {
//!     if query == "boom" {
//!         return Err(FetchError::failed("backend unavailable"));
//!     }
//!     Ok(vec![format!("{query}1"), format!("{query}2")])
//! });
//! # let _ = source.fetch("ap".to_string());
//! ```

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use futures::future::BoxFuture;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch produced no suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source reported an error.
    #[error("suggestion lookup failed: {0}")]
    Failed(String),
    /// The source did not answer within the configured timeout.
    #[error("suggestion lookup timed out after {0:?}")]
    TimedOut(Duration),
}

impl FetchError {
    /// Wraps any displayable error as [`FetchError::Failed`].
    pub fn failed(err: impl std::fmt::Display) -> Self {
        FetchError::Failed(err.to_string())
    }
}

/// Produces suggestions for a query.
pub trait SuggestionSource<T>: Send + Sync {
    /// Starts a lookup for `query`. The future must not borrow the source.
    fn fetch(&self, query: String) -> BoxFuture<'static, Result<Vec<T>, FetchError>>;
}

/// Adapter returned by [`from_fn`].
pub struct FnSource<F> {
    f: F,
}

/// Uses an async closure as a source.
pub fn from_fn<T, F, Fut>(f: F) -> FnSource<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + Send + 'static,
{
    FnSource { f }
}

impl<T, F, Fut> SuggestionSource<T> for FnSource<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, FetchError>> + Send + 'static,
{
    fn fetch(&self, query: String) -> BoxFuture<'static, Result<Vec<T>, FetchError>> {
        Box::pin((self.f)(query))
    }
}

/// In-memory source ranked by a skim-style fuzzy matcher.
///
/// An empty query returns every item in its original order; otherwise only
/// matching items are returned, best match first, ties kept in original
/// order.
pub struct FuzzySource {
    items: Vec<String>,
    limit: usize,
    matcher: SkimMatcherV2,
}

/// Creates a fuzzy source over `items`.
pub fn fuzzy<I, S>(items: I) -> FuzzySource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FuzzySource {
        items: items.into_iter().map(Into::into).collect(),
        limit: 0,
        matcher: SkimMatcherV2::default().ignore_case(),
    }
}

impl FuzzySource {
    /// Caps the number of returned items; 0 returns all matches.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Ranks the items against `query` synchronously.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        let mut ranked: Vec<(i64, usize)> = if query.is_empty() {
            (0..self.items.len()).map(|i| (0, i)).collect()
        } else {
            self.items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| self.matcher.fuzzy_match(item, query).map(|s| (s, i)))
                .collect()
        };
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        if self.limit > 0 {
            ranked.truncate(self.limit);
        }
        ranked.into_iter().map(|(_, i)| self.items[i].clone()).collect()
    }
}

impl SuggestionSource<String> for FuzzySource {
    fn fetch(&self, query: String) -> BoxFuture<'static, Result<Vec<String>, FetchError>> {
        let found = self.search(&query);
        Box::pin(async move { Ok(found) })
    }
}
