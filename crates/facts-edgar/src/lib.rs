#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/facts-rs/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR company-facts client.
//!
//! This crate fetches the EDGAR company-facts document for a ticker and
//! normalizes it into clean annual series:
//!
//! - [`EdgarClient`] - ticker-keyed retrieval of normalized reports
//! - [`LocalFileCikRepository`] - ticker-to-CIK lookup over the SEC
//!   mapping file
//! - [`parse_reports`] / [`parse_balance_report`] - pure normalization
//!   over an already-fetched [`CompanyFacts`] document
//!
//! # Example
//!
//! ```no_run
//! use facts_edgar::{EdgarClient, LocalFileCikRepository, UserAgent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ciks = LocalFileCikRepository::new("ticker.txt");
//!     let user_agent = UserAgent::new("Example company", "Jane Doe", "jane@example.com");
//!     let client = EdgarClient::new(ciks, &user_agent);
//!
//!     match client.get_reports("VEEV").await? {
//!         Some(reports) => println!("{:?}", reports.income.revenue),
//!         None => println!("unknown ticker"),
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::time::Duration;

use facts_core::{BalanceReport, Cik, CikRepository, FactsError, Reports, Result, Ticker};
use tracing::debug;

/// File-backed ticker-to-CIK resolution.
pub mod cik;
/// Wire types for the company-facts document.
pub mod companyfacts;
/// Statement normalization over the company-facts document.
pub mod statements;

pub use cik::LocalFileCikRepository;
pub use companyfacts::{CompanyFacts, ConceptFacts, RawFact};
pub use statements::{parse_balance_report, parse_reports};

/// SEC EDGAR API base URL.
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// Default request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identifying request header contents, as the SEC fair-access policy
/// requires: who is calling and how to reach them.
///
/// Rendered as `"{company} {user} <{email}>"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAgent {
    company: String,
    user: String,
    email: String,
}

impl UserAgent {
    /// Creates a user agent from organization and contact fields.
    #[must_use]
    pub fn new(
        company: impl Into<String>,
        user: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            user: user.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} <{}>", self.company, self.user, self.email)
    }
}

/// SEC EDGAR company-facts client.
///
/// Resolves tickers through a [`CikRepository`], fetches the company-facts
/// document once per request, and normalizes it into annual report series.
/// The client holds no mutable state; independent requests may share it
/// freely.
#[derive(Debug)]
pub struct EdgarClient<R> {
    client: reqwest::Client,
    base_url: String,
    ciks: R,
}

impl<R: CikRepository> EdgarClient<R> {
    /// Creates a client with the given CIK repository and identifying
    /// user agent.
    ///
    /// # Example
    ///
    /// ```
    /// use facts_core::StaticCikRepository;
    /// use facts_edgar::{EdgarClient, UserAgent};
    ///
    /// let user_agent = UserAgent::new("Example company", "Jane Doe", "jane@example.com");
    /// let client = EdgarClient::new(StaticCikRepository::new(), &user_agent);
    /// ```
    #[must_use]
    pub fn new(ciks: R, user_agent: &UserAgent) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client, ciks)
    }

    /// Creates a client around a pre-configured `reqwest` client.
    ///
    /// The caller is responsible for setting an identifying user agent on
    /// the supplied client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, ciks: R) -> Self {
        Self {
            client,
            base_url: EDGAR_BASE_URL.to_string(),
            ciks,
        }
    }

    /// Overrides the API base URL (tests, mirrors).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Retrieves full normalized annual reports for a ticker.
    ///
    /// Returns `Ok(None)` for tickers the CIK repository does not know;
    /// no document fetch is performed in that case.
    ///
    /// # Errors
    ///
    /// Transport failures and malformed responses propagate as
    /// [`FactsError::Network`] / [`FactsError::Parse`]; a document missing
    /// a required concept is [`FactsError::MissingConcept`].
    pub async fn get_reports(&self, ticker: &str) -> Result<Option<Reports>> {
        let Some(cik) = self.find_cik(ticker).await? else {
            return Ok(None);
        };
        let facts = self.fetch_company_facts(&cik).await?;
        parse_reports(&facts).map(Some)
    }

    /// Retrieves the date-keyed annual balance history for a ticker.
    ///
    /// Same failure semantics as [`EdgarClient::get_reports`].
    pub async fn get_balance_report(&self, ticker: &str) -> Result<Option<BalanceReport>> {
        let Some(cik) = self.find_cik(ticker).await? else {
            return Ok(None);
        };
        let facts = self.fetch_company_facts(&cik).await?;
        parse_balance_report(&facts).map(Some)
    }

    /// Fetches the raw company-facts document for a CIK.
    pub async fn fetch_company_facts(&self, cik: &Cik) -> Result<CompanyFacts> {
        let url = format!("{}/api/xbrl/companyfacts/CIK{}.json", self.base_url, cik);

        debug!("Fetching company facts from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FactsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FactsError::Network(format!(
                "Failed to fetch company facts for CIK {}: HTTP {}",
                cik,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FactsError::Parse(format!("Failed to parse company facts: {e}")))
    }

    async fn find_cik(&self, ticker: &str) -> Result<Option<Cik>> {
        let ticker = Ticker::new(ticker);
        let cik = self.ciks.find(&ticker).await?;
        match &cik {
            Some(cik) => debug!("Resolved ticker {} to CIK {}", ticker, cik),
            None => debug!("No CIK known for ticker {}", ticker),
        }
        Ok(cik)
    }
}
