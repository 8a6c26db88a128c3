//! Product Model

use super::tier::PricingTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Legacy discount rule kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// `value` is a percentage off the base price (30 = 30%)
    Percentage,
    /// `value` is the final price
    Fixed,
}

/// Per-tier rule of the legacy flat-discount model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl DiscountRule {
    pub fn percentage(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percentage,
            value,
        }
    }

    pub fn fixed(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Fixed,
            value,
        }
    }
}

/// Legacy pricing, used only when a product has no list price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPricing {
    pub base_price: Decimal,
    pub standard_rule: DiscountRule,
    pub premium_rule: DiscountRule,
}

impl LegacyPricing {
    pub fn rule_for(&self, tier: PricingTier) -> &DiscountRule {
        match tier {
            PricingTier::Standard => &self.standard_rule,
            PricingTier::Premium => &self.premium_rule,
        }
    }
}

/// Multipliers pinned on a single product by an admin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplierOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_multiplier: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_multiplier: Option<Decimal>,
}

impl MultiplierOverride {
    pub fn is_empty(&self) -> bool {
        self.standard_multiplier.is_none() && self.premium_multiplier.is_none()
    }

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

/// Product entity (one sellable SKU)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category key into the category-level pricing configuration
    pub category: String,
    /// Unit acquisition cost
    pub cost: Decimal,
    /// Retail (PVC) price tier prices derive from; takes precedence over `legacy_pricing`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual_override: Option<MultiplierOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_pricing: Option<LegacyPricing>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Last admin change (Unix millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            cost,
            list_price: None,
            individual_override: None,
            legacy_pricing: None,
            is_active: true,
            updated_at: None,
        }
    }

    pub fn with_list_price(mut self, list_price: Decimal) -> Self {
        self.list_price = Some(list_price);
        self
    }

    pub fn with_override(mut self, individual_override: MultiplierOverride) -> Self {
        self.individual_override = Some(individual_override);
        self
    }

    pub fn with_legacy_pricing(mut self, legacy_pricing: LegacyPricing) -> Self {
        self.legacy_pricing = Some(legacy_pricing);
        self
    }

    /// List price usable by the multiplier model (set and > 0)
    pub fn effective_list_price(&self) -> Option<Decimal> {
        self.list_price.filter(|p| *p > Decimal::ZERO)
    }

    /// Whether an admin has pinned at least one multiplier on this product
    pub fn has_individual_override(&self) -> bool {
        self.individual_override
            .as_ref()
            .is_some_and(|o| !o.is_empty())
    }
}
