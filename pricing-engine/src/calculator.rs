//! Tier Price Calculator
//!
//! Price charged to a tier for one product:
//! - list price set: `list_price / multiplier` for the tier's price point
//! - otherwise legacy pricing: fixed price or percentage off the base price
//! - otherwise the (non-positive or absent) list price, never negative
//!
//! Uses rust_decimal; every price is rounded to 2 decimal places, half-up.

use crate::resolver::resolve_multipliers_checked;
use crate::settings::PricingSettings;
use crate::warning::PricingWarning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{DiscountKind, LegacyPricing, PricingTier, Product, ResolutionLevel, Tier};
use shared::money::round_money;

/// Which pricing model produced a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    Multiplier,
    LegacyPercentage,
    LegacyFixed,
    Unpriced,
}

/// Tier price with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierQuote {
    pub tier: Tier,
    pub price: Decimal,
    pub source: PriceSource,
    /// Divisor applied (multiplier model only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
    /// Level the divisor came from (multiplier model only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ResolutionLevel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<PricingWarning>,
}

impl TierQuote {
    fn new(tier: Tier, price: Decimal, source: PriceSource) -> Self {
        Self {
            tier,
            price,
            source,
            multiplier: None,
            level: None,
            warnings: Vec::new(),
        }
    }
}

/// Sale price charged to `tier` for `product`
pub fn compute_tier_price(product: &Product, tier: Tier, settings: &PricingSettings) -> Decimal {
    quote_tier_price(product, tier, settings).price
}

/// Price `product` for `tier`, keeping provenance and warnings
pub fn quote_tier_price(product: &Product, tier: Tier, settings: &PricingSettings) -> TierQuote {
    let pricing_tier = tier.pricing_tier();

    // List price always wins over legacy pricing
    if let Some(list_price) = product.effective_list_price() {
        let (resolved, warnings) = resolve_multipliers_checked(product, settings);
        let multiplier = resolved.for_tier(pricing_tier);
        return TierQuote {
            multiplier: Some(multiplier),
            level: Some(resolved.level),
            warnings,
            ..TierQuote::new(tier, price_from_list(list_price, multiplier), PriceSource::Multiplier)
        };
    }

    if let Some(legacy) = &product.legacy_pricing {
        return quote_legacy(legacy, tier);
    }

    let fallback = product.list_price.unwrap_or_default().max(Decimal::ZERO);
    TierQuote {
        warnings: vec![PricingWarning::NoPricingConfigured],
        ..TierQuote::new(tier, round_money(fallback), PriceSource::Unpriced)
    }
}

/// `list_price / multiplier`, rounded; a multiplier that cannot divide
/// leaves the list price unchanged
pub fn price_from_list(list_price: Decimal, multiplier: Decimal) -> Decimal {
    if multiplier <= Decimal::ZERO {
        return round_money(list_price);
    }
    list_price
        .checked_div(multiplier)
        .map(round_money)
        .unwrap_or_else(|| round_money(list_price))
}

fn quote_legacy(legacy: &LegacyPricing, tier: Tier) -> TierQuote {
    let pricing_tier = tier.pricing_tier();
    let rule = legacy.rule_for(pricing_tier);

    match rule.kind {
        DiscountKind::Fixed => {
            let mut quote = TierQuote::new(tier, round_money(rule.value), PriceSource::LegacyFixed);
            if rule.value < Decimal::ZERO {
                quote.price = Decimal::ZERO;
                quote.warnings.push(PricingWarning::NegativeFixedPrice {
                    tier: pricing_tier,
                    value: rule.value,
                });
            }
            quote
        }
        DiscountKind::Percentage => {
            let factor = Decimal::ONE - rule.value / Decimal::ONE_HUNDRED;
            let Some(price) = legacy.base_price.checked_mul(factor) else {
                let mut quote = TierQuote::new(tier, Decimal::ZERO, PriceSource::LegacyPercentage);
                quote.warnings.push(PricingWarning::PriceOutOfRange { tier: pricing_tier });
                return quote;
            };
            let price = round_money(price).max(Decimal::ZERO);
            let mut quote = TierQuote::new(tier, price, PriceSource::LegacyPercentage);
            if rule.value >= Decimal::ONE_HUNDRED {
                quote.warnings.push(PricingWarning::DiscountExceedsBase {
                    tier: pricing_tier,
                    value: rule.value,
                });
            }
            quote
        }
    }
}

/// Price both price points of a product
pub fn quote_both(product: &Product, settings: &PricingSettings) -> (TierQuote, TierQuote) {
    (
        quote_tier_price(product, PricingTier::Standard.tier(), settings),
        quote_tier_price(product, PricingTier::Premium.tier(), settings),
    )
}
