//! Margin & Risk Classifier

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::RiskThresholds;
use shared::money::round_money;

/// Risk band of a unit margin relative to the minimum margin `m`
///
/// - `RISK`: margin < m
/// - `LOW`: m <= margin < m + low_band
/// - `OPTIMAL`: m + low_band <= margin < m + optimal_band
/// - `PREMIUM`: margin >= m + optimal_band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskBand {
    Risk,
    Low,
    Optimal,
    Premium,
}

impl RiskBand {
    /// Below the floor: must be flagged, and blocks list-price saves
    pub const fn is_below_minimum(&self) -> bool {
        matches!(self, RiskBand::Risk)
    }
}

/// Unit margin; may be negative. Saturates at the `Decimal` bounds.
pub fn compute_margin(sale_price: Decimal, cost: Decimal) -> Decimal {
    sale_price.saturating_sub(cost)
}

/// Classify with the default bands (+4 / +10)
pub fn classify_risk(margin: Decimal, minimum_margin: Decimal) -> RiskBand {
    classify_risk_with(margin, minimum_margin, &RiskThresholds::default())
}

pub fn classify_risk_with(
    margin: Decimal,
    minimum_margin: Decimal,
    thresholds: &RiskThresholds,
) -> RiskBand {
    if margin < minimum_margin {
        RiskBand::Risk
    } else if margin < minimum_margin.saturating_add(thresholds.low_band) {
        RiskBand::Low
    } else if margin < minimum_margin.saturating_add(thresholds.optimal_band) {
        RiskBand::Optimal
    } else {
        RiskBand::Premium
    }
}

/// Margin as a percentage of the sale price, `None` for a zero sale price
pub fn margin_percent(sale_price: Decimal, cost: Decimal) -> Option<Decimal> {
    if sale_price.is_zero() {
        return None;
    }
    let margin = compute_margin(sale_price, cost);
    margin
        .checked_div(sale_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_money)
}
