//! Pricing Warnings
//!
//! Data-integrity signals raised while pricing. None of them stop a
//! computation; they are returned next to the result so the admin UI can
//! flag the product or the configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{PricingTier, ResolutionLevel};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingWarning {
    /// No global configuration stored; conservative defaults in use
    GlobalConfigMissing,
    /// Stored global configuration could not be decoded; conservative defaults in use
    GlobalConfigMalformed { reason: String },
    /// Stored category map is not a map; no category overrides in use
    CategoryConfigMalformed { reason: String },
    /// One category entry could not be decoded and was skipped
    CategoryEntryMalformed { category: String, reason: String },
    /// Resolved multiplier was zero or negative; 1.0 used instead
    InvalidMultiplier {
        tier: PricingTier,
        level: ResolutionLevel,
        value: Decimal,
    },
    /// Legacy percentage discount of 100% or more; price clamped at 0
    DiscountExceedsBase { tier: PricingTier, value: Decimal },
    /// Legacy fixed price below zero; price clamped at 0
    NegativeFixedPrice { tier: PricingTier, value: Decimal },
    /// Legacy price does not fit a Decimal; price clamped at 0
    PriceOutOfRange { tier: PricingTier },
    /// Neither a list price nor legacy pricing is configured
    NoPricingConfigured,
    /// Unit cost is zero or negative
    NonPositiveCost { cost: Decimal },
    /// Tier price is below unit cost
    NegativeMargin { tier: PricingTier, margin: Decimal },
    /// Premium price is above standard price (misconfigured discount)
    PremiumAboveStandard { standard: Decimal, premium: Decimal },
}

impl PricingWarning {
    /// Whether the warning concerns the stored configuration rather than one product
    pub fn is_config_warning(&self) -> bool {
        matches!(
            self,
            Self::GlobalConfigMissing
                | Self::GlobalConfigMalformed { .. }
                | Self::CategoryConfigMalformed { .. }
                | Self::CategoryEntryMalformed { .. }
        )
    }
}

impl fmt::Display for PricingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalConfigMissing => {
                write!(f, "global pricing configuration missing, using multiplier 1.0")
            }
            Self::GlobalConfigMalformed { reason } => write!(
                f,
                "global pricing configuration unreadable ({}), using multiplier 1.0",
                reason
            ),
            Self::CategoryConfigMalformed { reason } => write!(
                f,
                "category pricing configuration unreadable ({}), ignoring category overrides",
                reason
            ),
            Self::CategoryEntryMalformed { category, reason } => write!(
                f,
                "category '{}' pricing entry unreadable ({}), skipped",
                category, reason
            ),
            Self::InvalidMultiplier { tier, level, value } => write!(
                f,
                "{} multiplier {} from {} level is not positive, using 1.0",
                tier,
                value,
                level.as_str()
            ),
            Self::DiscountExceedsBase { tier, value } => write!(
                f,
                "{} discount of {}% leaves nothing of the base price, clamped to 0",
                tier, value
            ),
            Self::NegativeFixedPrice { tier, value } => {
                write!(f, "{} fixed price {} is negative, clamped to 0", tier, value)
            }
            Self::PriceOutOfRange { tier } => {
                write!(f, "{} legacy price is out of range, clamped to 0", tier)
            }
            Self::NoPricingConfigured => write!(f, "no list price or legacy pricing configured"),
            Self::NonPositiveCost { cost } => write!(f, "unit cost {} is not positive", cost),
            Self::NegativeMargin { tier, margin } => {
                write!(f, "{} price is below cost (margin {})", tier, margin)
            }
            Self::PremiumAboveStandard { standard, premium } => write!(
                f,
                "premium price {} is above standard price {}",
                premium, standard
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(PricingWarning::GlobalConfigMissing).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "GLOBAL_CONFIG_MISSING"}));

        let json = serde_json::to_value(PricingWarning::NegativeMargin {
            tier: PricingTier::Standard,
            margin: Decimal::new(-1222, 2),
        })
        .unwrap();
        assert_eq!(json["kind"], "NEGATIVE_MARGIN");
        assert_eq!(json["tier"], "STANDARD");
        assert!((json["margin"].as_f64().unwrap() + 12.22).abs() < 1e-9);
    }

    #[test]
    fn test_config_warning_split() {
        assert!(PricingWarning::GlobalConfigMissing.is_config_warning());
        assert!(!PricingWarning::NoPricingConfigured.is_config_warning());
    }
}
