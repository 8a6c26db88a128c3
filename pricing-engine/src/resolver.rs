//! Hierarchical Multiplier Resolver
//!
//! Precedence is strictly individual > category > global. A field missing at
//! a more specific level falls through to the next level up.

use crate::settings::PricingSettings;
use crate::warning::PricingWarning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    CategoryConfigMap, GlobalPricingConfig, PricingTier, Product, ResolutionLevel,
};

/// Multiplier pair in force for one product, with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedMultipliers {
    pub standard_multiplier: Decimal,
    pub premium_multiplier: Decimal,
    /// Most specific level that contributed (used for the provenance badge)
    pub level: ResolutionLevel,
}

impl ResolvedMultipliers {
    pub fn for_tier(&self, tier: PricingTier) -> Decimal {
        match tier {
            PricingTier::Standard => self.standard_multiplier,
            PricingTier::Premium => self.premium_multiplier,
        }
    }

    fn set(&mut self, tier: PricingTier, value: Decimal) {
        match tier {
            PricingTier::Standard => self.standard_multiplier = value,
            PricingTier::Premium => self.premium_multiplier = value,
        }
    }
}

/// Resolve the multipliers that apply to a product
///
/// 1. Start from the global pair (`GLOBAL`).
/// 2. If the product's category has an entry, the level becomes `CATEGORY`
///    and each field present in the entry replaces the global one.
/// 3. If the product carries an individual override with at least one field,
///    the level becomes `INDIVIDUAL` and each present field replaces the
///    value from steps 1-2.
pub fn resolve_multipliers(
    product: &Product,
    global: &GlobalPricingConfig,
    categories: &CategoryConfigMap,
) -> ResolvedMultipliers {
    let mut resolved = ResolvedMultipliers {
        standard_multiplier: global.standard_multiplier,
        premium_multiplier: global.premium_multiplier,
        level: ResolutionLevel::Global,
    };

    if let Some(category) = categories.get(&product.category) {
        resolved.level = ResolutionLevel::Category;
        for tier in PricingTier::BOTH {
            if let Some(value) = category.get(tier) {
                resolved.set(tier, value);
            }
        }
    }

    if let Some(individual) = product
        .individual_override
        .as_ref()
        .filter(|o| !o.is_empty())
    {
        resolved.level = ResolutionLevel::Individual;
        for tier in PricingTier::BOTH {
            if let Some(value) = individual.get(tier) {
                resolved.set(tier, value);
            }
        }
    }

    resolved
}

/// [`resolve_multipliers`] against a settings object
pub fn resolve_for(product: &Product, settings: &PricingSettings) -> ResolvedMultipliers {
    resolve_multipliers(product, &settings.global, &settings.categories)
}

/// Resolve and make the pair safe to divide by
///
/// A zero or negative multiplier is replaced by 1.0 and reported as
/// [`PricingWarning::InvalidMultiplier`].
pub fn resolve_multipliers_checked(
    product: &Product,
    settings: &PricingSettings,
) -> (ResolvedMultipliers, Vec<PricingWarning>) {
    let mut resolved = resolve_for(product, settings);
    let mut warnings = Vec::new();

    for tier in PricingTier::BOTH {
        let value = resolved.for_tier(tier);
        if value <= Decimal::ZERO {
            warnings.push(PricingWarning::InvalidMultiplier {
                tier,
                level: resolved.level,
                value,
            });
            resolved.set(tier, Decimal::ONE);
        }
    }

    (resolved, warnings)
}
