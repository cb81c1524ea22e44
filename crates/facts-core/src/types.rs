//! Core data types for normalized financial statements.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Ticker`] - Stock ticker symbol
//! - [`Cik`] - SEC Central Index Key
//! - [`AnnualSeries`] / [`DatedSeries`] - Per-period value series
//! - [`Balance`], [`Income`], [`Reports`] - Fiscal-year keyed statements
//! - [`BalanceSnapshot`], [`BalanceReport`] - Date-keyed balance history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A stock ticker symbol.
///
/// Tickers are automatically uppercased on creation; lookups against
/// a [`CikRepository`](crate::CikRepository) are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An SEC Central Index Key.
///
/// The CIK identifies corporations and individuals that have filed
/// disclosure with the SEC. The canonical form used by the EDGAR API
/// is a 10-digit, zero-left-padded string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a CIK, zero-padding the digits to the canonical 10-digit form.
    #[must_use]
    pub fn new(digits: impl Into<String>) -> Self {
        Self(format!("{:0>10}", digits.into()))
    }

    /// Creates a CIK from its numeric form (EDGAR index files carry bare integers).
    #[must_use]
    pub fn from_numeric(cik: u64) -> Self {
        Self(format!("{cik:010}"))
    }

    /// Returns the zero-padded CIK as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fiscal year as reported in a filing.
pub type FiscalYear = i32;

/// Ordered fiscal-year keyed series of USD values.
///
/// Keys are unique and ascending by construction.
pub type AnnualSeries = BTreeMap<FiscalYear, i64>;

/// Ordered period-end keyed series of USD values.
pub type DatedSeries = BTreeMap<NaiveDate, i64>;

/// A single period's paired balance sheet values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Total assets.
    pub assets: i64,
    /// Total stockholders' equity.
    pub equity: i64,
}

/// Balance sheet line items keyed by fiscal year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Total assets per fiscal year.
    pub assets: AnnualSeries,
    /// Total stockholders' equity per fiscal year.
    pub equity: AnnualSeries,
}

/// Income statement line items keyed by fiscal year.
///
/// Only the revenue series is mandatory in filings under both the
/// pre- and post-ASC 606 taxonomies; the remaining series may be
/// empty for filers that do not disclose the line item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    /// Total revenue.
    pub revenue: AnnualSeries,
    /// Gross profit.
    pub gross_profit: AnnualSeries,
    /// Operating income or loss.
    pub operating_income: AnnualSeries,
    /// Net income or loss.
    pub net_income: AnnualSeries,
    /// Research and development expense.
    pub research_and_development: AnnualSeries,
    /// Selling and marketing expense.
    pub selling_and_marketing: AnnualSeries,
    /// General and administrative expense.
    pub general_and_administrative: AnnualSeries,
}

/// Normalized annual reports for one company: full balance sheet and
/// income statement series keyed by fiscal year.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reports {
    /// Balance sheet series.
    pub balance: Balance,
    /// Income statement series.
    pub income: Income,
}

/// Annual balance sheet history keyed by reporting date.
///
/// `reported_at` and `balance` always have equal length and are
/// positionally aligned, sorted ascending by date. Only periods for
/// which both assets and equity were reported appear.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Period-end dates, ascending.
    pub reported_at: Vec<NaiveDate>,
    /// One snapshot per entry in `reported_at`.
    pub balance: Vec<BalanceSnapshot>,
}

impl BalanceReport {
    /// Returns the number of reporting periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reported_at.len()
    }

    /// Returns true if no periods were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reported_at.is_empty()
    }

    /// Iterates over `(reported_at, snapshot)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, BalanceSnapshot)> + '_ {
        self.reported_at.iter().copied().zip(self.balance.iter().copied())
    }
}
