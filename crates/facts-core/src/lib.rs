#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/facts-rs/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for SEC EDGAR financial statement retrieval.
//!
//! This crate provides the foundational vocabulary shared by providers:
//!
//! - [`Ticker`] / [`Cik`] - Company identifiers
//! - [`CikRepository`] - Ticker-to-CIK resolution capability
//! - [`Reports`], [`BalanceReport`] - Normalized annual report aggregates
//! - [`FactsError`] - Error taxonomy for retrieval and normalization

/// Ticker-to-CIK resolution trait and in-memory implementation.
pub mod cik;
/// Error types for statement retrieval.
pub mod error;
/// Core data types (Ticker, Cik, report aggregates).
pub mod types;

// Re-export commonly used items at crate root
pub use cik::{CikRepository, StaticCikRepository};
pub use error::{FactsError, Result};
pub use types::{
    AnnualSeries, Balance, BalanceReport, BalanceSnapshot, Cik, DatedSeries, FiscalYear, Income,
    Reports, Ticker,
};
