//! Statement normalization over the company-facts document.
//!
//! The company-facts document reports many overlapping facts per concept:
//! annual filings, quarterly snapshots, restated prior-year figures, and
//! standardized calendar-frame values. Normalization selects the single
//! authoritative annual value per period:
//!
//! 1. locate the concept's USD facts,
//! 2. keep 10-K facts whose scope is a full year (or year-end instant),
//! 3. rank by actuality — most recently filed first, period end breaking
//!    ties — so restatements outrank the figures they correct,
//! 4. deduplicate per derived period, first (most actual) value wins,
//! 5. emit the series with periods ascending.
//!
//! [`parse_reports`] assembles the full-statement configuration keyed by
//! fiscal year; [`parse_balance_report`] assembles the date-keyed balance
//! history with assets and equity trimmed to their common reporting dates.

use facts_core::{
    AnnualSeries, Balance, BalanceReport, BalanceSnapshot, DatedSeries, FactsError, FiscalYear,
    Income, Reports, Result,
};
use tracing::warn;

use crate::companyfacts::{CompanyFacts, RawFact};

// Concept keys consulted for the full-statement report.
const ASSETS: &str = "Assets";
const STOCKHOLDERS_EQUITY: &str = "StockholdersEquity";
const REVENUES: &str = "Revenues";
const REVENUE_FROM_CONTRACT: &str = "RevenueFromContractWithCustomerExcludingAssessedTax";
const GROSS_PROFIT: &str = "GrossProfit";
const OPERATING_INCOME: &str = "OperatingIncomeLoss";
const NET_INCOME: &str = "NetIncomeLoss";
const RESEARCH_AND_DEVELOPMENT: &str = "ResearchAndDevelopmentExpense";
const SELLING_AND_MARKETING: &str = "SellingAndMarketingExpense";
const GENERAL_AND_ADMINISTRATIVE: &str = "GeneralAndAdministrativeExpense";

/// The only filing form consulted.
const ANNUAL_FORM: &str = "10-K";

/// Prefix of calendar-period frame labels.
const FRAME_PREFIX: &str = "CY";

/// Frame qualifier marking an instantaneous year-end measurement.
const YEAR_END_INSTANT: &str = "Q4I";

/// Normalizes a company-facts document into full annual reports.
///
/// Runs the normalizer once per concept and assembles the fiscal-year
/// keyed balance sheet and income statement series.
///
/// # Errors
///
/// [`FactsError::MissingConcept`] when a required concept (`Assets`,
/// `StockholdersEquity`, `OperatingIncomeLoss`, `NetIncomeLoss`) is
/// absent from the document.
pub fn parse_reports(doc: &CompanyFacts) -> Result<Reports> {
    Ok(Reports {
        balance: parse_balance(doc)?,
        income: parse_income(doc)?,
    })
}

/// Normalizes a company-facts document into a date-keyed balance history.
///
/// Assets and equity series are trimmed to the reporting dates common to
/// both: a snapshot needs both sides, so periods reported on only one are
/// dropped entirely. The resulting sequences are positionally aligned and
/// ascend by date.
///
/// # Errors
///
/// [`FactsError::MissingConcept`] when `Assets` or `StockholdersEquity`
/// is absent from the document.
pub fn parse_balance_report(doc: &CompanyFacts) -> Result<BalanceReport> {
    let assets = required_dated_series(doc, ASSETS)?;
    let equity = required_dated_series(doc, STOCKHOLDERS_EQUITY)?;

    let mut reported_at = Vec::new();
    let mut balance = Vec::new();
    for (end, assets_val) in &assets {
        if let Some(equity_val) = equity.get(end) {
            reported_at.push(*end);
            balance.push(BalanceSnapshot {
                assets: *assets_val,
                equity: *equity_val,
            });
        }
    }

    Ok(BalanceReport {
        reported_at,
        balance,
    })
}

fn parse_balance(doc: &CompanyFacts) -> Result<Balance> {
    Ok(Balance {
        assets: required_series(doc, ASSETS)?,
        equity: required_series(doc, STOCKHOLDERS_EQUITY)?,
    })
}

fn parse_income(doc: &CompanyFacts) -> Result<Income> {
    Ok(Income {
        revenue: revenue_series(doc),
        gross_profit: optional_series(doc, GROSS_PROFIT),
        operating_income: required_series(doc, OPERATING_INCOME)?,
        net_income: required_series(doc, NET_INCOME)?,
        research_and_development: optional_series(doc, RESEARCH_AND_DEVELOPMENT),
        selling_and_marketing: optional_series(doc, SELLING_AND_MARKETING),
        general_and_administrative: optional_series(doc, GENERAL_AND_ADMINISTRATIVE),
    })
}

/// Merges the two revenue source concepts into one series.
///
/// `Revenues` predates the ASC 606 taxonomy change;
/// `RevenueFromContractWithCustomerExcludingAssessedTax` replaced it.
/// For years present in both, the newer taxonomy's value wins.
fn revenue_series(doc: &CompanyFacts) -> AnnualSeries {
    let mut revenue = optional_series(doc, REVENUES);
    revenue.extend(optional_series(doc, REVENUE_FROM_CONTRACT));
    revenue
}

/// Fiscal-year keyed series for a concept the report cannot exist without.
fn required_series(doc: &CompanyFacts, concept: &str) -> Result<AnnualSeries> {
    doc.usd_facts(concept)
        .map(annual_series)
        .ok_or_else(|| FactsError::MissingConcept(concept.to_string()))
}

/// Fiscal-year keyed series for a concept filers may not disclose.
fn optional_series(doc: &CompanyFacts, concept: &str) -> AnnualSeries {
    doc.usd_facts(concept).map(annual_series).unwrap_or_default()
}

/// Period-end keyed series for a concept the report cannot exist without.
fn required_dated_series(doc: &CompanyFacts, concept: &str) -> Result<DatedSeries> {
    doc.usd_facts(concept)
        .map(dated_series)
        .ok_or_else(|| FactsError::MissingConcept(concept.to_string()))
}

fn annual_series(facts: &[RawFact]) -> AnnualSeries {
    let mut series = AnnualSeries::new();
    for fact in annual_facts_by_actuality(facts) {
        let Some(year) = fact_year(fact) else {
            warn!(end = %fact.end, frame = ?fact.frame, "fact has no derivable fiscal year, skipping");
            continue;
        };
        series.entry(year).or_insert(fact.val);
    }
    series
}

fn dated_series(facts: &[RawFact]) -> DatedSeries {
    let mut series = DatedSeries::new();
    for fact in annual_facts_by_actuality(facts) {
        series.entry(fact.end).or_insert(fact.val);
    }
    series
}

/// Annual facts, most authoritative first.
///
/// Companies restate prior-year figures in later filings; ranking by
/// filing date (then period end) puts the restatement ahead of the value
/// it corrects, so first-wins deduplication keeps the most actual value
/// per period. Facts lacking a filing date rank last.
fn annual_facts_by_actuality(facts: &[RawFact]) -> Vec<&RawFact> {
    let mut annual: Vec<&RawFact> = facts.iter().filter(|fact| is_annual(fact)).collect();
    annual.sort_by(|a, b| (b.filed, b.end).cmp(&(a.filed, a.end)));
    annual
}

/// Whether a fact represents a full-year (or year-end instant) measurement
/// from an annual report.
fn is_annual(fact: &RawFact) -> bool {
    fact.form.as_deref() == Some(ANNUAL_FORM)
        && fact.frame.as_deref().is_none_or(is_year_frame)
}

/// Whether a frame label covers a whole calendar year.
///
/// Accepts `CY<yyyy>` and the instantaneous year-end form `CY<yyyy>Q4I`.
/// Quarterly and partial-year frames carry sub-year totals that would
/// corrupt an annual series.
fn is_year_frame(frame: &str) -> bool {
    let rest = frame.strip_prefix(FRAME_PREFIX).unwrap_or(frame);
    match rest.get(4..) {
        Some(qualifier) => qualifier.is_empty() || qualifier == YEAR_END_INSTANT,
        None => false,
    }
}

/// The reporting year of a fact: the filing's fiscal year for plain
/// facts, or the calendar year embedded in the frame label.
fn fact_year(fact: &RawFact) -> Option<FiscalYear> {
    match fact.frame.as_deref() {
        None => fact.fy,
        Some(frame) => frame_year(frame),
    }
}

/// The 4-digit year embedded in a frame label (`CY2020Q4I` → 2020).
fn frame_year(frame: &str) -> Option<FiscalYear> {
    frame
        .strip_prefix(FRAME_PREFIX)
        .unwrap_or(frame)
        .get(..4)?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    fn gaap_doc(concepts: Value) -> CompanyFacts {
        serde_json::from_value(json!({ "facts": { "us-gaap": concepts } })).unwrap()
    }

    fn usd(facts: Vec<Value>) -> Value {
        json!({ "units": { "USD": facts } })
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_annual_series_from_plain_facts() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2014-01-31", "val": 370_308_000_i64, "fy": 2013, "form": "10-K", "filed": "2014-03-27"}),
                json!({"end": "2013-01-31", "val": 89_820_000_i64, "fy": 2012, "form": "10-K", "filed": "2013-03-28"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(
            series,
            AnnualSeries::from([(2012, 89_820_000), (2013, 370_308_000)]),
        );
    }

    #[test]
    fn test_series_keys_unique_and_ascending() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 30, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
                json!({"end": "2018-12-31", "val": 10, "fy": 2018, "form": "10-K", "filed": "2019-02-25"}),
                json!({"end": "2019-12-31", "val": 20, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
                json!({"end": "2019-12-31", "val": 21, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        let years: Vec<FiscalYear> = series.keys().copied().collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
    }

    #[test]
    fn test_latest_filing_wins_for_same_year() {
        let doc = gaap_doc(json!({
            "NetIncomeLoss": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-01"}),
                json!({"end": "2020-12-31", "val": 200, "fy": 2020, "form": "10-K", "filed": "2021-03-15"}),
            ]),
        }));

        let series = required_series(&doc, NET_INCOME).unwrap();
        assert_eq!(series, AnnualSeries::from([(2020, 200)]));
    }

    #[test]
    fn test_filing_date_tie_broken_by_period_end() {
        // Restated prior-period value filed the same day as the current one:
        // the later period end is the more recent knowledge of fiscal 2020.
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-06-30", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
                json!({"end": "2020-12-31", "val": 200, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2020, 200)]));
    }

    #[test]
    fn test_fact_without_filed_date_ranks_last() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K"}),
                json!({"end": "2020-12-31", "val": 200, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2020, 200)]));
    }

    #[test]
    fn test_non_annual_forms_excluded() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-03-31", "val": 50, "fy": 2020, "form": "10-Q", "filed": "2020-05-01"}),
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
                json!({"end": "2020-12-31", "val": 70, "fy": 2020, "form": "8-K", "filed": "2021-01-05"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2020, 100)]));
    }

    #[test]
    fn test_sub_year_frames_excluded() {
        let doc = gaap_doc(json!({
            "Revenues": usd(vec![
                json!({"end": "2020-12-31", "val": 400, "fy": 2020, "form": "10-K", "filed": "2021-02-25", "frame": "CY2020"}),
                json!({"end": "2020-03-31", "val": 90, "fy": 2020, "form": "10-K", "filed": "2021-02-25", "frame": "CY2020Q1"}),
                json!({"end": "2020-06-30", "val": 95, "fy": 2020, "form": "10-K", "filed": "2021-02-25", "frame": "CY2020Q2I"}),
            ]),
        }));

        let series = optional_series(&doc, REVENUES);
        assert_eq!(series, AnnualSeries::from([(2020, 400)]));
    }

    #[test]
    fn test_year_end_instant_frame_included() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25", "frame": "CY2020Q4I"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2020, 100)]));
    }

    #[test]
    fn test_framed_fact_keyed_by_frame_year() {
        // A 10-K filed in early 2021 carries fy 2020, but the frame pins the
        // measured calendar year.
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2019-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25", "frame": "CY2019Q4I"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2019, 100)]));
    }

    #[test]
    fn test_fact_without_derivable_year_skipped() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "form": "10-K", "filed": "2021-02-25"}),
                json!({"end": "2019-12-31", "val": 50, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
            ]),
        }));

        let series = required_series(&doc, ASSETS).unwrap();
        assert_eq!(series, AnnualSeries::from([(2019, 50)]));
    }

    #[test]
    fn test_is_year_frame() {
        assert!(is_year_frame("CY2020"));
        assert!(is_year_frame("CY2020Q4I"));
        assert!(!is_year_frame("CY2020Q1"));
        assert!(!is_year_frame("CY2020Q2I"));
        assert!(!is_year_frame("CY2020Q3"));
        assert!(!is_year_frame("CY20"));
    }

    #[test]
    fn test_frame_year() {
        assert_eq!(frame_year("CY2020"), Some(2020));
        assert_eq!(frame_year("CY2013Q4I"), Some(2013));
        assert_eq!(frame_year("CYQ4I"), None);
    }

    #[test]
    fn test_revenue_join_newer_taxonomy_wins() {
        let doc = gaap_doc(json!({
            "Revenues": usd(vec![
                json!({"end": "2018-12-31", "val": 10, "fy": 2018, "form": "10-K", "filed": "2019-02-25"}),
                json!({"end": "2019-12-31", "val": 20, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
            ]),
            "RevenueFromContractWithCustomerExcludingAssessedTax": usd(vec![
                json!({"end": "2019-12-31", "val": 25, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
                json!({"end": "2020-12-31", "val": 30, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let series = revenue_series(&doc);
        assert_eq!(
            series,
            AnnualSeries::from([(2018, 10), (2019, 25), (2020, 30)]),
        );
    }

    #[test]
    fn test_revenue_join_single_source() {
        let doc = gaap_doc(json!({
            "RevenueFromContractWithCustomerExcludingAssessedTax": usd(vec![
                json!({"end": "2020-12-31", "val": 30, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        assert_eq!(revenue_series(&doc), AnnualSeries::from([(2020, 30)]));
    }

    #[test]
    fn test_missing_required_concept_errors() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let err = required_series(&doc, STOCKHOLDERS_EQUITY).unwrap_err();
        assert!(matches!(err, FactsError::MissingConcept(ref key) if key == "StockholdersEquity"));
    }

    #[test]
    fn test_missing_optional_concept_yields_empty_series() {
        let doc = gaap_doc(json!({}));

        assert!(optional_series(&doc, GROSS_PROFIT).is_empty());
    }

    #[test]
    fn test_parse_reports_full_statement() {
        let annual = |year: i32, end: &str, filed: &str, val: i64| {
            json!({"end": end, "val": val, "fy": year, "form": "10-K", "filed": filed})
        };
        let doc = gaap_doc(json!({
            "Assets": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 1_000)]),
            "StockholdersEquity": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 600)]),
            "Revenues": usd(vec![annual(2019, "2019-12-31", "2020-02-25", 450)]),
            "RevenueFromContractWithCustomerExcludingAssessedTax":
                usd(vec![annual(2020, "2020-12-31", "2021-02-25", 500)]),
            "GrossProfit": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 300)]),
            "OperatingIncomeLoss": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 200)]),
            "NetIncomeLoss": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 150)]),
            "ResearchAndDevelopmentExpense": usd(vec![annual(2020, "2020-12-31", "2021-02-25", 80)]),
        }));

        let reports = parse_reports(&doc).unwrap();
        assert_eq!(reports.balance.assets, AnnualSeries::from([(2020, 1_000)]));
        assert_eq!(reports.balance.equity, AnnualSeries::from([(2020, 600)]));
        assert_eq!(
            reports.income.revenue,
            AnnualSeries::from([(2019, 450), (2020, 500)]),
        );
        assert_eq!(reports.income.gross_profit, AnnualSeries::from([(2020, 300)]));
        assert_eq!(reports.income.operating_income, AnnualSeries::from([(2020, 200)]));
        assert_eq!(reports.income.net_income, AnnualSeries::from([(2020, 150)]));
        assert_eq!(
            reports.income.research_and_development,
            AnnualSeries::from([(2020, 80)]),
        );
        // Not disclosed by this filer.
        assert!(reports.income.selling_and_marketing.is_empty());
        assert!(reports.income.general_and_administrative.is_empty());
    }

    #[test]
    fn test_parse_reports_missing_required_concept() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let err = parse_reports(&doc).unwrap_err();
        assert!(matches!(err, FactsError::MissingConcept(_)));
    }

    #[test]
    fn test_balance_report_trimmed_to_common_dates() {
        let annual = |year: i32, end: &str, filed: &str, val: i64| {
            json!({"end": end, "val": val, "fy": year, "form": "10-K", "filed": filed})
        };
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                annual(2013, "2014-01-31", "2014-03-27", 370_308_000),
                annual(2014, "2015-01-31", "2015-03-30", 544_890_000),
                // No equity reported for this date.
                annual(2015, "2016-01-31", "2016-03-29", 705_799_000),
            ]),
            "StockholdersEquity": usd(vec![
                annual(2013, "2014-01-31", "2014-03-27", 280_096_000),
                annual(2014, "2015-01-31", "2015-03-30", 406_833_000),
                // No assets reported for this date.
                annual(2016, "2017-01-31", "2017-03-28", 652_978_000),
            ]),
        }));

        let report = parse_balance_report(&doc).unwrap();
        assert_eq!(
            report.reported_at,
            vec![date(2014, 1, 31), date(2015, 1, 31)],
        );
        assert_eq!(
            report.balance,
            vec![
                BalanceSnapshot { assets: 370_308_000, equity: 280_096_000 },
                BalanceSnapshot { assets: 544_890_000, equity: 406_833_000 },
            ],
        );
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_balance_report_dates_ascending() {
        let annual = |year: i32, end: &str, filed: &str, val: i64| {
            json!({"end": end, "val": val, "fy": year, "form": "10-K", "filed": filed})
        };
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                annual(2020, "2020-12-31", "2021-02-25", 300),
                annual(2018, "2018-12-31", "2019-02-25", 100),
                annual(2019, "2019-12-31", "2020-02-25", 200),
            ]),
            "StockholdersEquity": usd(vec![
                annual(2019, "2019-12-31", "2020-02-25", 20),
                annual(2020, "2020-12-31", "2021-02-25", 30),
                annual(2018, "2018-12-31", "2019-02-25", 10),
            ]),
        }));

        let report = parse_balance_report(&doc).unwrap();
        assert_eq!(
            report.reported_at,
            vec![date(2018, 12, 31), date(2019, 12, 31), date(2020, 12, 31)],
        );
        assert_eq!(
            report.balance,
            vec![
                BalanceSnapshot { assets: 100, equity: 10 },
                BalanceSnapshot { assets: 200, equity: 20 },
                BalanceSnapshot { assets: 300, equity: 30 },
            ],
        );
    }

    #[test]
    fn test_balance_report_restatement_wins_per_date() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2019-12-31", "val": 100, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
                // Restated in the following year's 10-K.
                json!({"end": "2019-12-31", "val": 110, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
            "StockholdersEquity": usd(vec![
                json!({"end": "2019-12-31", "val": 40, "fy": 2019, "form": "10-K", "filed": "2020-02-25"}),
            ]),
        }));

        let report = parse_balance_report(&doc).unwrap();
        assert_eq!(report.reported_at, vec![date(2019, 12, 31)]);
        assert_eq!(report.balance, vec![BalanceSnapshot { assets: 110, equity: 40 }]);
    }

    #[test]
    fn test_balance_report_missing_equity_errors() {
        let doc = gaap_doc(json!({
            "Assets": usd(vec![
                json!({"end": "2020-12-31", "val": 100, "fy": 2020, "form": "10-K", "filed": "2021-02-25"}),
            ]),
        }));

        let err = parse_balance_report(&doc).unwrap_err();
        assert!(matches!(err, FactsError::MissingConcept(ref key) if key == "StockholdersEquity"));
    }
}
