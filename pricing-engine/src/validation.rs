//! List-Price Edit Validation
//!
//! A proposed list price is priced at both price points with the product's
//! current multipliers. If either margin falls below the minimum margin the
//! edit is rejected; accepted prices are stored exactly as entered. A product
//! whose multipliers are not usable cannot be validated at all.

use crate::calculator::price_from_list;
use crate::margin::{RiskBand, classify_risk_with, compute_margin};
use crate::resolver::resolve_multipliers_checked;
use crate::settings::PricingSettings;
use crate::warning::PricingWarning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{PricingTier, Product};
use shared::money::{MAX_PRICE, format_eur, to_f64};

/// One price point of a proposed list price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPricePoint {
    pub tier: PricingTier,
    pub multiplier: Decimal,
    pub price: Decimal,
    pub margin: Decimal,
    pub risk: RiskBand,
}

/// Accepted list-price edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPriceEdit {
    pub list_price: Decimal,
    pub standard: TierPricePoint,
    pub premium: TierPricePoint,
}

/// A price point whose margin misses the minimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginViolation {
    pub tier: PricingTier,
    pub attempted_list_price: Decimal,
    pub tier_price: Decimal,
    pub margin: Decimal,
    pub minimum_margin: Decimal,
    /// `minimum_margin - margin`, always positive
    pub shortfall: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListPriceValidation {
    Accepted(ListPriceEdit),
    /// Every failing price point, standard first
    Rejected { violations: Vec<MarginViolation> },
    /// Zero, negative, or above the maximum list price
    InvalidPrice { attempted_list_price: Decimal },
    /// A resolved multiplier is zero or negative; margins cannot be trusted
    UnusableMultiplier { warnings: Vec<PricingWarning> },
}

impl ListPriceValidation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn violations(&self) -> &[MarginViolation] {
        match self {
            Self::Rejected { violations } => violations,
            _ => &[],
        }
    }

    /// Accepted edit, or an error carrying tier, attempted price and shortfall
    pub fn into_result(self) -> AppResult<ListPriceEdit> {
        match self {
            Self::Accepted(edit) => Ok(edit),
            Self::InvalidPrice {
                attempted_list_price,
            } => Err(AppError::with_message(
                ErrorCode::ListPriceInvalid,
                format!(
                    "List price {} must be greater than zero and at most {}",
                    format_eur(attempted_list_price),
                    format_eur(MAX_PRICE)
                ),
            )
            .with_detail("attempted_list_price", to_f64(attempted_list_price))),
            Self::Rejected { violations } => Err(rejection_error(&violations)),
            Self::UnusableMultiplier { warnings } => Err(multiplier_error(&warnings)),
        }
    }
}

fn rejection_error(violations: &[MarginViolation]) -> AppError {
    let Some(first) = violations.first() else {
        return AppError::new(ErrorCode::MarginBelowMinimum);
    };

    let message = format!(
        "{} margin {} at list price {} is below the minimum {} (short by {})",
        first.tier,
        format_eur(first.margin),
        format_eur(first.attempted_list_price),
        format_eur(first.minimum_margin),
        format_eur(first.shortfall),
    );

    let details: Vec<_> = violations
        .iter()
        .map(|v| {
            json!({
                "tier": v.tier.as_str(),
                "tier_price": to_f64(v.tier_price),
                "margin": to_f64(v.margin),
                "shortfall": to_f64(v.shortfall),
            })
        })
        .collect();

    AppError::with_message(ErrorCode::MarginBelowMinimum, message)
        .with_detail("tier", first.tier.as_str())
        .with_detail("attempted_list_price", to_f64(first.attempted_list_price))
        .with_detail("minimum_margin", to_f64(first.minimum_margin))
        .with_detail("shortfall", to_f64(first.shortfall))
        .with_detail("violations", details)
}

fn multiplier_error(warnings: &[PricingWarning]) -> AppError {
    let mut err = AppError::new(ErrorCode::MultiplierInvalid);
    if let Some(PricingWarning::InvalidMultiplier { tier, level, value }) = warnings.first() {
        err = AppError::with_message(
            ErrorCode::MultiplierInvalid,
            format!(
                "{} multiplier {} set at {} level must be greater than zero",
                tier,
                value,
                level.as_str()
            ),
        )
        .with_detail("tier", tier.as_str())
        .with_detail("level", level.as_str())
        .with_detail("value", value.to_string());
    }
    let warnings: Vec<String> = warnings.iter().map(ToString::to_string).collect();
    err.with_detail("warnings", warnings)
}

/// Check a proposed list price against the minimum margin
pub fn validate_list_price_edit(
    product: &Product,
    proposed_list_price: Decimal,
    settings: &PricingSettings,
) -> ListPriceValidation {
    if proposed_list_price <= Decimal::ZERO || proposed_list_price > MAX_PRICE {
        return ListPriceValidation::InvalidPrice {
            attempted_list_price: proposed_list_price,
        };
    }

    let (resolved, warnings) = resolve_multipliers_checked(product, settings);
    if !warnings.is_empty() {
        return ListPriceValidation::UnusableMultiplier { warnings };
    }
    let global = &settings.global;
    let minimum = global.minimum_margin_absolute;

    let point = |tier: PricingTier| {
        let multiplier = resolved.for_tier(tier);
        let price = price_from_list(proposed_list_price, multiplier);
        let margin = compute_margin(price, product.cost);
        TierPricePoint {
            tier,
            multiplier,
            price,
            margin,
            risk: classify_risk_with(margin, minimum, &global.risk_thresholds),
        }
    };
    let standard = point(PricingTier::Standard);
    let premium = point(PricingTier::Premium);

    let violations: Vec<MarginViolation> = [&standard, &premium]
        .into_iter()
        .filter(|p| p.margin < minimum)
        .map(|p| MarginViolation {
            tier: p.tier,
            attempted_list_price: proposed_list_price,
            tier_price: p.price,
            margin: p.margin,
            minimum_margin: minimum,
            shortfall: minimum.saturating_sub(p.margin),
        })
        .collect();

    if violations.is_empty() {
        ListPriceValidation::Accepted(ListPriceEdit {
            list_price: proposed_list_price,
            standard,
            premium,
        })
    } else {
        ListPriceValidation::Rejected { violations }
    }
}
