use std::collections::HashSet;

use super::kpi::mean;
use crate::data::model::{IpoRecord, IpoTable, NumericField};
use crate::error::AnalysisError;

pub const MARKET_AVERAGE_LABEL: &str = "Market Average";

/// Headline figures for one company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyScorecard {
    pub name: String,
    pub issue_price: Option<f64>,
    pub issue_size: Option<f64>,
    pub listing_gains_percent: Option<f64>,
    pub listing_gains_profit: bool,
    pub subscription_total: Option<f64>,
}

/// Subscription categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionCategory {
    Qib,
    Hni,
    Rii,
}

impl SubscriptionCategory {
    pub const ALL: [SubscriptionCategory; 3] = [
        SubscriptionCategory::Qib,
        SubscriptionCategory::Hni,
        SubscriptionCategory::Rii,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SubscriptionCategory::Qib => "QIB",
            SubscriptionCategory::Hni => "HNI",
            SubscriptionCategory::Rii => "RII",
        }
    }
}

/// One bar of the "performance vs market" comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBar {
    pub label: String,
    /// `None` when there is no listing gain to show.
    pub value: Option<f64>,
}

/// Everything the company view shows.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    pub scorecard: CompanyScorecard,
    pub breakdown: Vec<(SubscriptionCategory, f64)>,
    pub comparison: Vec<ComparisonBar>,
}

/// Distinct IPO names in first-appearance order.
pub fn company_names(table: &IpoTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .filter(|r| seen.insert(r.ipo_name.as_str()))
        .map(|r| r.ipo_name.clone())
        .collect()
}

/// First row named `name`; a company can list more than once, table order wins.
pub fn find_company<'a>(table: &'a IpoTable, name: &str) -> Result<&'a IpoRecord, AnalysisError> {
    table
        .records()
        .iter()
        .find(|r| r.ipo_name == name)
        .ok_or_else(|| AnalysisError::CompanyNotFound(name.to_string()))
}

pub fn company_scorecard(table: &IpoTable, name: &str) -> Result<CompanyScorecard, AnalysisError> {
    find_company(table, name).map(scorecard_of)
}

fn scorecard_of(r: &IpoRecord) -> CompanyScorecard {
    CompanyScorecard {
        name: r.ipo_name.clone(),
        issue_price: r.issue_price,
        issue_size: r.issue_size,
        listing_gains_percent: r.listing_gains_percent,
        listing_gains_profit: r.listing_gains_profit(),
        subscription_total: r.subscription_total,
    }
}

/// QIB / HNI / RII multipliers; a missing multiplier is shown as 0.
pub fn subscription_breakdown(record: &IpoRecord) -> Vec<(SubscriptionCategory, f64)> {
    SubscriptionCategory::ALL
        .into_iter()
        .map(|cat| {
            let value = match cat {
                SubscriptionCategory::Qib => record.subscription_qib,
                SubscriptionCategory::Hni => record.subscription_hni,
                SubscriptionCategory::Rii => record.subscription_rii,
            };
            (cat, value.unwrap_or(0.0))
        })
        .collect()
}

/// The company's listing gain next to the mean gain of `full_table`.
///
/// Pass the unfiltered table: the market average is a global reference and
/// does not follow the year selection.
pub fn market_comparison(full_table: &IpoTable, record: &IpoRecord) -> Vec<ComparisonBar> {
    vec![
        ComparisonBar {
            label: record.ipo_name.clone(),
            value: record.listing_gains_percent,
        },
        ComparisonBar {
            label: MARKET_AVERAGE_LABEL.to_string(),
            value: mean(&full_table.values(NumericField::ListingGainsPercent)),
        },
    ]
}

/// Look the company up in the filtered view and compare it with the full market.
pub fn company_profile(
    full: &IpoTable,
    filtered: &IpoTable,
    name: &str,
) -> Result<CompanyProfile, AnalysisError> {
    let record = find_company(filtered, name)?;
    Ok(CompanyProfile {
        scorecard: scorecard_of(record),
        breakdown: subscription_breakdown(record),
        comparison: market_comparison(full, record),
    })
}
