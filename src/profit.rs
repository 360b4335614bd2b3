//! Holding profit arithmetic.
//!
//! Pure and total: every input combination produces a result, never a
//! panic. Invalid or non-positive inputs collapse to the all-zero
//! result (coerce-to-zero-then-guard).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitResult {
    pub market_value: String,
    pub cost_basis: String,
    pub profit: String,
    pub profit_rate_pct: String,
}

impl ProfitResult {
    pub fn zero() -> Self {
        Self {
            market_value: "0.00".to_string(),
            cost_basis: "0.00".to_string(),
            profit: "0.00".to_string(),
            profit_rate_pct: "0.00".to_string(),
        }
    }
}

fn coerce(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

fn coerce_str(value: &str) -> Decimal {
    Decimal::from_str(value.trim()).unwrap_or(Decimal::ZERO)
}

/// Fixed 2-decimal textual representation for display stability.
fn fixed2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Combines a held position with the current NAV.
///
/// Any of shares/cost/nav not strictly positive after coercion yields
/// the all-zero result.
pub fn calculate(shares: f64, cost: f64, nav: &str) -> ProfitResult {
    let shares = coerce(shares);
    let cost = coerce(cost);
    let nav = coerce_str(nav);

    if shares <= Decimal::ZERO || cost <= Decimal::ZERO || nav <= Decimal::ZERO {
        return ProfitResult::zero();
    }

    let market_value = shares * nav;
    let cost_basis = shares * cost;
    let profit = market_value - cost_basis;
    let profit_rate_pct = profit / cost_basis * Decimal::ONE_HUNDRED;

    ProfitResult {
        market_value: fixed2(market_value),
        cost_basis: fixed2(cost_basis),
        profit: fixed2(profit),
        profit_rate_pct: fixed2(profit_rate_pct),
    }
}
