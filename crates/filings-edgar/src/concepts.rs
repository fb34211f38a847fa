//! Consolidated metric extraction from the company facts API.
//!
//! Filers rename concepts across years (`Revenues` became
//! `RevenueFromContractWithCustomerExcludingAssessedTax` for many filers after ASC 606).
//! Every alias of a metric is evaluated and the most recent annual value across all of
//! them is kept.

use crate::wire::{CompanyFacts, FactValue};
use chrono::{Datelike, NaiveDate};
use filings_core::{Financials, MetricValue};
use std::collections::BTreeMap;
use tracing::trace;

/// Annual report form type.
pub const ANNUAL_FORM: &str = "10-K";

/// Full-fiscal-year period code.
pub const FULL_YEAR: &str = "FY";

/// Revenue concepts in priority order, as qualified names.
///
/// Used both for consolidated revenue and for matching segment revenue facts.
pub const REVENUE_CONCEPTS: &[&str] = &[
    "us-gaap:Revenues",
    "us-gaap:RevenueFromContractWithCustomerExcludingAssessedTax",
    "us-gaap:SalesRevenueNet",
    "us-gaap:RevenueFromContractWithCustomerIncludingAssessedTax",
];

/// A consolidated metric reported in the response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total revenue
    Revenue,
    /// Cost of revenue
    CostOfRevenue,
    /// Operating expenses
    OperatingExpenses,
    /// Capital expenditures
    CapitalExpenditures,
    /// Net income
    NetIncome,
    /// Number of employees
    Employees,
}

impl Metric {
    /// All metrics, in response order.
    pub const ALL: [Self; 6] = [
        Self::Revenue,
        Self::CostOfRevenue,
        Self::OperatingExpenses,
        Self::CapitalExpenditures,
        Self::NetIncome,
        Self::Employees,
    ];

    /// Taxonomy the metric's concepts live in.
    #[must_use]
    pub const fn taxonomy(self) -> &'static str {
        match self {
            // Entity-descriptive, not financial
            Self::Employees => "dei",
            _ => "us-gaap",
        }
    }

    /// Concept names for the metric, highest priority first.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &[
                "Revenues",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "SalesRevenueNet",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
            ],
            Self::CostOfRevenue => &[
                "CostOfRevenue",
                "CostOfGoodsAndServicesSold",
                "CostOfGoodsSold",
            ],
            Self::OperatingExpenses => &[
                "OperatingExpenses",
                "OperatingCostsAndExpenses",
                "CostsAndExpenses",
            ],
            Self::CapitalExpenditures => &[
                "PaymentsToAcquirePropertyPlantAndEquipment",
                "PaymentsToAcquireProductiveAssets",
                "PaymentsForCapitalImprovements",
            ],
            Self::NetIncome => &[
                "NetIncomeLoss",
                "ProfitLoss",
                "NetIncomeLossAvailableToCommonStockholdersBasic",
            ],
            Self::Employees => &["EntityNumberOfEmployees"],
        }
    }
}

/// Pick the unit series to read: USD, then pure, then the first other unit present.
fn preferred_unit(units: &BTreeMap<String, Vec<FactValue>>) -> Option<&Vec<FactValue>> {
    units
        .get("USD")
        .or_else(|| units.get("pure"))
        .or_else(|| units.values().next())
}

fn is_annual(value: &FactValue) -> bool {
    value.form.as_deref() == Some(ANNUAL_FORM) && value.fp.as_deref() == Some(FULL_YEAR)
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Days covered by a record; instants cover none.
fn duration_days(value: &FactValue, end: NaiveDate) -> i64 {
    value
        .start
        .as_deref()
        .and_then(parse_day)
        .map_or(0, |start| (end - start).num_days())
}

/// Latest annual record of a single unit series.
///
/// A 10-K also tags its fourth-quarter figures `FY`, so among records sharing the latest end
/// date the longest duration wins, then the first listed.
fn latest_annual(values: &[FactValue]) -> Option<(NaiveDate, &FactValue)> {
    let mut best: Option<(NaiveDate, i64, &FactValue)> = None;
    for value in values.iter().filter(|v| is_annual(v)) {
        let Some(end) = parse_day(&value.end) else {
            continue;
        };
        let days = duration_days(value, end);
        if best.is_none_or(|(best_end, best_days, _)| (end, days) > (best_end, best_days)) {
            best = Some((end, days, value));
        }
    }
    best.map(|(end, _, value)| (end, value))
}

/// Resolve a metric to its single most recent annual value.
///
/// Every alias is evaluated: for each, the annual (`10-K`, `FY`) record with the latest end
/// date (longest duration on a shared end date) is taken; across aliases the record with the
/// greatest period year wins. On a year tie the earlier (higher-priority) alias is kept.
/// Returns `None` when no alias has any annual record.
#[must_use]
pub fn extract_latest_annual(
    facts: &CompanyFacts,
    taxonomy: &str,
    aliases: &[&str],
) -> Option<MetricValue> {
    let taxonomy_facts = facts.facts.get(taxonomy)?;

    let mut best: Option<(i32, &FactValue)> = None;
    for alias in aliases {
        let Some(values) = taxonomy_facts
            .get(*alias)
            .and_then(|tag| preferred_unit(&tag.units))
        else {
            continue;
        };
        let Some((end, value)) = latest_annual(values) else {
            continue;
        };

        trace!(alias, end = %end, val = value.val, "Latest annual value for alias");
        if best.is_none_or(|(year, _)| end.year() > year) {
            best = Some((end.year(), value));
        }
    }

    best.map(|(year, value)| MetricValue::new(value.val, format!("{year:04}")))
}

/// Resolve one [`Metric`].
#[must_use]
pub fn extract_metric(facts: &CompanyFacts, metric: Metric) -> Option<MetricValue> {
    extract_latest_annual(facts, metric.taxonomy(), metric.aliases())
}

/// Resolve every consolidated metric. Missing metrics are `None`, never an error.
#[must_use]
pub fn extract_financials(facts: &CompanyFacts) -> Financials {
    Financials {
        revenue: extract_metric(facts, Metric::Revenue),
        cogs: extract_metric(facts, Metric::CostOfRevenue),
        opex: extract_metric(facts, Metric::OperatingExpenses),
        capex: extract_metric(facts, Metric::CapitalExpenditures),
        net_income: extract_metric(facts, Metric::NetIncome),
        employees: extract_metric(facts, Metric::Employees),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts(value: serde_json::Value) -> CompanyFacts {
        serde_json::from_value(json!({ "entityName": "Test Co", "facts": value })).unwrap()
    }

    fn annual(end: &str, val: f64) -> serde_json::Value {
        json!({ "end": end, "val": val, "form": "10-K", "fp": "FY" })
    }

    #[test]
    fn test_renamed_concept_wins_on_recency() {
        let facts = facts(json!({
            "us-gaap": {
                "Revenues": { "units": { "USD": [
                    annual("2020-12-31", 100.0),
                    annual("2021-12-31", 110.0),
                ]}},
                "RevenueFromContractWithCustomerExcludingAssessedTax": { "units": { "USD": [
                    annual("2022-12-31", 120.0),
                    annual("2023-12-31", 130.0),
                ]}}
            }
        }));

        let revenue = extract_metric(&facts, Metric::Revenue).unwrap();
        assert_eq!(revenue, MetricValue::new(130.0, "2023"));
    }

    #[test]
    fn test_non_annual_records_ignored() {
        let facts = facts(json!({
            "us-gaap": {
                "NetIncomeLoss": { "units": { "USD": [
                    annual("2022-12-31", 10.0),
                    { "end": "2023-09-30", "val": 99.0, "form": "10-Q", "fp": "Q3" },
                    { "end": "2023-12-31", "val": 98.0, "form": "10-K", "fp": "Q4" },
                ]}}
            }
        }));

        let net = extract_metric(&facts, Metric::NetIncome).unwrap();
        assert_eq!(net, MetricValue::new(10.0, "2022"));
    }

    #[test]
    fn test_full_year_preferred_over_fourth_quarter() {
        let quarter = json!({
            "start": "2023-10-01", "end": "2023-12-31", "val": 110.0, "form": "10-K", "fp": "FY"
        });
        let year = json!({
            "start": "2023-01-01", "end": "2023-12-31", "val": 400.0, "form": "10-K", "fp": "FY"
        });

        for units in [json!([year.clone(), quarter.clone()]), json!([quarter, year])] {
            let facts = facts(json!({
                "us-gaap": { "Revenues": { "units": { "USD": units } } }
            }));
            assert_eq!(
                extract_metric(&facts, Metric::Revenue),
                Some(MetricValue::new(400.0, "2023"))
            );
        }
    }

    #[test]
    fn test_same_period_keeps_first_listed() {
        let facts = facts(json!({
            "us-gaap": { "Revenues": { "units": { "USD": [
                { "start": "2023-01-01", "end": "2023-12-31", "val": 1.0, "form": "10-K", "fp": "FY" },
                { "start": "2023-01-01", "end": "2023-12-31", "val": 2.0, "form": "10-K", "fp": "FY" },
            ]}}}
        }));

        assert_eq!(extract_metric(&facts, Metric::Revenue).unwrap().value, 1.0);
    }

    #[test]
    fn test_year_tie_keeps_higher_priority_alias() {
        let facts = facts(json!({
            "us-gaap": {
                "CostOfRevenue": { "units": { "USD": [annual("2023-12-31", 50.0)] }},
                "CostOfGoodsSold": { "units": { "USD": [annual("2023-12-31", 55.0)] }}
            }
        }));

        assert_eq!(
            extract_metric(&facts, Metric::CostOfRevenue).unwrap().value,
            50.0
        );
    }

    #[test]
    fn test_unit_preference_and_employee_count() {
        let facts = facts(json!({
            "dei": {
                "EntityNumberOfEmployees": { "units": { "employee": [
                    annual("2023-09-30", 161_000.0)
                ]}}
            },
            "us-gaap": {
                "Revenues": { "units": {
                    "EUR": [annual("2023-12-31", 1.0)],
                    "USD": [annual("2023-12-31", 2.0)]
                }}
            }
        }));

        let financials = extract_financials(&facts);
        assert_eq!(financials.employees, Some(MetricValue::new(161_000.0, "2023")));
        assert_eq!(financials.revenue.unwrap().value, 2.0);
        assert!(financials.capex.is_none());
    }

    #[test]
    fn test_no_data_is_none() {
        let facts = facts(json!({}));
        assert_eq!(extract_financials(&facts), Financials::default());
    }
}
