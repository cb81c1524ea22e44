//! Ticker-to-CIK resolution.
//!
//! This module defines the [`CikRepository`] trait that providers use to
//! resolve a [`Ticker`] to its SEC Central Index Key before fetching any
//! filing data, plus [`StaticCikRepository`], an in-memory implementation
//! for tests and fixed universes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{Cik, Ticker},
};

/// Trait for resolving tickers to SEC Central Index Keys.
///
/// Lookups are case-insensitive. An unknown ticker is `Ok(None)`, not an
/// error; only the lookup I/O itself can fail.
#[async_trait]
pub trait CikRepository: Send + Sync + Debug {
    /// Resolves a ticker to its zero-padded CIK, or `None` if unknown.
    async fn find(&self, ticker: &Ticker) -> Result<Option<Cik>>;
}

/// In-memory ticker-to-CIK mapping.
///
/// Useful for tests and for callers working over a fixed universe of
/// companies.
///
/// # Example
///
/// ```
/// use facts_core::{Cik, StaticCikRepository};
///
/// let ciks = StaticCikRepository::from_pairs([("VEEV", Cik::new("1393052"))]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticCikRepository {
    ciks: HashMap<String, Cik>,
}

impl StaticCikRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository from `(ticker, cik)` pairs.
    #[must_use]
    pub fn from_pairs<T, I>(pairs: I) -> Self
    where
        T: AsRef<str>,
        I: IntoIterator<Item = (T, Cik)>,
    {
        Self {
            ciks: pairs
                .into_iter()
                .map(|(ticker, cik)| (ticker.as_ref().to_lowercase(), cik))
                .collect(),
        }
    }

    /// Inserts a mapping, replacing any existing entry for the ticker.
    pub fn insert(&mut self, ticker: impl AsRef<str>, cik: Cik) {
        self.ciks.insert(ticker.as_ref().to_lowercase(), cik);
    }
}

#[async_trait]
impl CikRepository for StaticCikRepository {
    async fn find(&self, ticker: &Ticker) -> Result<Option<Cik>> {
        Ok(self.ciks.get(&ticker.as_str().to_lowercase()).cloned())
    }
}
