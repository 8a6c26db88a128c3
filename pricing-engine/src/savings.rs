//! Premium Savings Calculator

use crate::calculator::quote_both;
use crate::settings::PricingSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsQuote {
    pub standard_price: Decimal,
    pub premium_price: Decimal,
    /// Never negative
    pub savings: Decimal,
    /// Premium priced above standard; savings reported as zero
    pub inverted: bool,
}

/// Saving of a premium buyer over a standard buyer, clamped at zero
pub fn compute_savings(product: &Product, settings: &PricingSettings) -> Decimal {
    savings_quote(product, settings).savings
}

/// Standard price minus premium price, never below zero
pub fn savings_between(standard_price: Decimal, premium_price: Decimal) -> Decimal {
    standard_price.saturating_sub(premium_price).max(Decimal::ZERO)
}

pub fn savings_quote(product: &Product, settings: &PricingSettings) -> SavingsQuote {
    let (standard, premium) = quote_both(product, settings);
    SavingsQuote {
        standard_price: standard.price,
        premium_price: premium.price,
        savings: savings_between(standard.price, premium.price),
        inverted: premium.price > standard.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CategoryConfigMap, GlobalPricingConfig, MultiplierOverride};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn settings() -> PricingSettings {
        PricingSettings::new(GlobalPricingConfig::default(), CategoryConfigMap::new())
    }

    #[test]
    fn test_savings() {
        let product = Product::new("P-1", "Peeling Gel", "Peeling", dec("40")).with_list_price(dec("100"));
        let quote = savings_quote(&product, &settings());
        assert_eq!(quote.savings, dec("12.08"));
        assert!(!quote.inverted);
    }

    #[test]
    fn test_savings_between_clamps_at_zero() {
        assert_eq!(savings_between(dec("55.56"), dec("43.48")), dec("12.08"));
        assert_eq!(savings_between(dec("40"), dec("40")), Decimal::ZERO);
        assert_eq!(savings_between(dec("30"), dec("45.50")), Decimal::ZERO);
    }

    #[test]
    fn test_inverted_tiers_report_zero() {
        let product = Product::new("P-1", "Peeling Gel", "Peeling", dec("40"))
            .with_list_price(dec("100"))
            .with_override(MultiplierOverride {
                standard_multiplier: Some(dec("2.5")),
                premium_multiplier: Some(dec("2.0")),
            });
        let quote = savings_quote(&product, &settings());
        assert_eq!(quote.standard_price, dec("40"));
        assert_eq!(quote.premium_price, dec("50"));
        assert_eq!(quote.savings, Decimal::ZERO);
        assert!(quote.inverted);
        assert_eq!(compute_savings(&product, &settings()), Decimal::ZERO);
    }
}
