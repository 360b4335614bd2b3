//! Canonical record shapes produced by the normalizer.
//!
//! Every field is always present with a defined default (empty string,
//! empty list); downstream code checks for emptiness, never existence.

use serde::{Deserialize, Serialize};

use crate::profit::ProfitResult;

/// Near-real-time estimate for one fund, superseded by the next fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    pub code: String,
    pub name: String,
    /// Date of the last official NAV settlement.
    pub nav_date: String,
    /// Official NAV per unit as published.
    pub nav: String,
    /// Intraday estimated NAV.
    pub estimate_value: String,
    /// Estimated change against the last official NAV, in percent.
    pub estimate_change_pct: String,
    pub estimate_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub nav: String,
    pub accumulated_nav: String,
    pub daily_change_pct: String,
}

/// One page of historical NAV data, most recent point first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub points: Vec<HistoryPoint>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundManager {
    pub id: String,
    pub name: String,
    pub star: String,
    pub tenure: String,
}

/// Static fund attributes plus a live valuation overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub valuation: ValuationRecord,
    /// Listed subscription rate before discount, in percent.
    pub source_rate: String,
    /// Effective subscription rate, in percent.
    pub rate: String,
    pub min_purchase: String,
    pub yield_1m: String,
    pub yield_3m: String,
    pub yield_6m: String,
    pub yield_1y: String,
    pub managers: Vec<FundManager>,
    pub stock_holdings: Vec<String>,
    pub bond_holdings: Vec<String>,
    pub net_worth_trend: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub code: String,
    pub name: String,
    pub nav_date: String,
    pub nav: String,
    pub day_change_pct: String,
    pub week_change_pct: String,
    pub month_change_pct: String,
    pub three_month_change_pct: String,
    pub six_month_change_pct: String,
    pub year_change_pct: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub code: String,
    pub name: String,
    pub fund_type: String,
    pub pinyin: String,
}

/// A user-tracked fund, optionally annotated with a held position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub added_at: i64,
}

/// A favorite merged with its live valuation and, when a position is
/// held, the computed profit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatchItem {
    pub valuation: ValuationRecord,
    pub shares: f64,
    pub cost: f64,
    pub profit: Option<ProfitResult>,
}
