//! Wire types for the EDGAR company-facts document.
//!
//! The company-facts API returns one large JSON document per company with
//! the nested shape `facts → <taxonomy> → <concept> → units → <unit> →
//! [facts...]`. These types mirror that shape; normalization into clean
//! series happens in [`crate::statements`].

use chrono::NaiveDate;
use facts_core::FiscalYear;
use serde::Deserialize;
use std::collections::HashMap;

/// The XBRL taxonomy carrying standardized US accounting concepts.
const US_GAAP_TAXONOMY: &str = "us-gaap";

/// The unit key for USD-denominated facts.
const USD_UNIT: &str = "USD";

/// Response from the EDGAR company-facts API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    /// CIK number, as a bare integer.
    #[serde(default)]
    pub cik: Option<u64>,
    /// Registrant name.
    #[serde(default)]
    pub entity_name: Option<String>,
    /// Reported facts, organized by taxonomy and concept.
    pub facts: HashMap<String, HashMap<String, ConceptFacts>>,
}

impl CompanyFacts {
    /// Returns the USD-denominated facts reported for a us-gaap concept.
    ///
    /// `None` when any component of the `facts → us-gaap → <concept> →
    /// units → USD` path is absent; this is the defined "absent concept"
    /// case, not an error at this layer.
    #[must_use]
    pub fn usd_facts(&self, concept: &str) -> Option<&[RawFact]> {
        self.facts
            .get(US_GAAP_TAXONOMY)?
            .get(concept)?
            .units
            .as_ref()?
            .get(USD_UNIT)
            .map(Vec::as_slice)
    }
}

/// All facts reported for a single XBRL concept.
#[derive(Debug, Clone, Deserialize)]
pub struct ConceptFacts {
    /// Human-readable concept label.
    #[serde(default)]
    pub label: Option<String>,
    /// Concept description from the taxonomy.
    #[serde(default)]
    pub description: Option<String>,
    /// Fact lists keyed by unit of measure (USD, shares, ...).
    #[serde(default)]
    pub units: Option<HashMap<String, Vec<RawFact>>>,
}

/// One reported data point for a concept, tagged with filing metadata.
///
/// Facts are sourced externally and never constructed by this crate
/// outside of deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawFact {
    /// Start of the reporting period, for duration-based concepts.
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// End of the reporting period.
    pub end: NaiveDate,
    /// Reported value in USD.
    pub val: i64,
    /// Accession number of the filing the fact appeared in.
    #[serde(default)]
    pub accn: Option<String>,
    /// Fiscal year of the filing.
    #[serde(default)]
    pub fy: Option<FiscalYear>,
    /// Fiscal period of the filing (FY, Q1, ...).
    #[serde(default)]
    pub fp: Option<String>,
    /// Filing form type (10-K, 10-Q, 8-K, ...).
    #[serde(default)]
    pub form: Option<String>,
    /// Date the filing was submitted.
    #[serde(default)]
    pub filed: Option<NaiveDate>,
    /// Calendar-period frame label (e.g. `CY2020`, `CY2020Q4I`), present
    /// when the fact conforms to a standardized calendar period rather
    /// than the filer's own fiscal calendar.
    #[serde(default)]
    pub frame: Option<String>,
}
