//! File-backed ticker-to-CIK resolution.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use facts_core::{Cik, CikRepository, Result, Ticker};

/// Ticker-to-CIK repository backed by the SEC's published mapping file.
///
/// The mapping file is the two-column format served at
/// `https://www.sec.gov/include/ticker.txt`: one whitespace-separated
/// `ticker cik` pair per line, tickers lowercase, CIKs unpadded. The file
/// is re-read on every lookup; download and refresh are caller concerns.
#[derive(Debug, Clone)]
pub struct LocalFileCikRepository {
    file: PathBuf,
}

impl LocalFileCikRepository {
    /// Creates a repository reading from the given mapping file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    /// Returns the path of the mapping file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file
    }
}

#[async_trait]
impl CikRepository for LocalFileCikRepository {
    async fn find(&self, ticker: &Ticker) -> Result<Option<Cik>> {
        let contents = tokio::fs::read_to_string(&self.file).await?;
        for line in contents.lines() {
            let mut columns = line.split_whitespace();
            let (Some(candidate), Some(cik)) = (columns.next(), columns.next()) else {
                continue;
            };
            if candidate.eq_ignore_ascii_case(ticker.as_str()) {
                return Ok(Some(Cik::new(cik)));
            }
        }
        Ok(None)
    }
}
