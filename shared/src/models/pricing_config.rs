//! Pricing Configuration Model
//!
//! Three resolution levels: global (always present), category (created
//! lazily by admins) and individual (stored on the product).

use super::tier::PricingTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings store key holding [`GlobalPricingConfig`]
pub const SETTINGS_KEY_GLOBAL: &str = "pricing.global";
/// Settings store key holding [`CategoryConfigMap`]
pub const SETTINGS_KEY_CATEGORIES: &str = "pricing.categories";

/// Margin bands above the minimum margin, used for risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// `minimum + low_band` is where OPTIMAL starts
    pub low_band: Decimal,
    /// `minimum + optimal_band` is where PREMIUM starts
    pub optimal_band: Decimal,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_band: Decimal::from(4),
            optimal_band: Decimal::from(10),
        }
    }
}

/// Global pricing configuration, applied to every product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalPricingConfig {
    pub standard_multiplier: Decimal,
    pub premium_multiplier: Decimal,
    /// Minimum acceptable unit margin (currency units)
    pub minimum_margin_absolute: Decimal,
    #[serde(default)]
    pub risk_thresholds: RiskThresholds,
}

impl Default for GlobalPricingConfig {
    fn default() -> Self {
        Self {
            standard_multiplier: Decimal::new(18, 1),
            premium_multiplier: Decimal::new(23, 1),
            minimum_margin_absolute: Decimal::new(600, 2),
            risk_thresholds: RiskThresholds::default(),
        }
    }
}

impl GlobalPricingConfig {
    /// Fallback when the stored configuration is missing or unreadable:
    /// multipliers of 1.0 (list price passes through), default margin floor
    pub fn conservative() -> Self {
        Self {
            standard_multiplier: Decimal::ONE,
            premium_multiplier: Decimal::ONE,
            ..Self::default()
        }
    }
}

/// Category-level override; absent fields fall through to the global value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPricingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_multiplier: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_multiplier: Option<Decimal>,
}

impl CategoryPricingConfig {
    pub fn get(&self, tier: PricingTier) -> Option<Decimal> {
        match tier {
            PricingTier::Standard => self.standard_multiplier,
            PricingTier::Premium => self.premium_multiplier,
        }
    }

    pub fn set(&mut self, tier: PricingTier, value: Option<Decimal>) {
        match tier {
            PricingTier::Standard => self.standard_multiplier = value,
            PricingTier::Premium => self.premium_multiplier = value,
        }
    }
}

/// Category name -> category override
pub type CategoryConfigMap = BTreeMap<String, CategoryPricingConfig>;

/// Configuration level a resolved multiplier came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionLevel {
    Global,
    Category,
    Individual,
}

impl ResolutionLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResolutionLevel::Global => "GLOBAL",
            ResolutionLevel::Category => "CATEGORY",
            ResolutionLevel::Individual => "INDIVIDUAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlobalPricingConfig::default();
        assert_eq!(config.standard_multiplier, Decimal::new(18, 1));
        assert_eq!(config.premium_multiplier, Decimal::new(23, 1));
        assert_eq!(config.minimum_margin_absolute, Decimal::from(6));

        let fallback = GlobalPricingConfig::conservative();
        assert_eq!(fallback.standard_multiplier, Decimal::ONE);
        assert_eq!(fallback.premium_multiplier, Decimal::ONE);
        assert_eq!(fallback.minimum_margin_absolute, config.minimum_margin_absolute);
    }

    #[test]
    fn test_risk_thresholds_default_when_absent() {
        let config: GlobalPricingConfig = serde_json::from_str(
            r#"{"standard_multiplier":1.8,"premium_multiplier":2.3,"minimum_margin_absolute":6}"#,
        )
        .unwrap();
        assert_eq!(config.risk_thresholds, RiskThresholds::default());
    }

    #[test]
    fn test_category_config_partial() {
        let entry: CategoryPricingConfig =
            serde_json::from_str(r#"{"standard_multiplier":2.0}"#).unwrap();
        assert_eq!(entry.get(PricingTier::Standard), Some(Decimal::from(2)));
        assert_eq!(entry.get(PricingTier::Premium), None);
    }

    #[test]
    fn test_resolution_level_serde() {
        assert_eq!(
            serde_json::to_string(&ResolutionLevel::Individual).unwrap(),
            "\"INDIVIDUAL\""
        );
    }
}
