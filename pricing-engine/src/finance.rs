//! Order Margin Summary
//!
//! Gross margin of a partner order priced at the buyer's tier.

use crate::calculator::compute_tier_price;
use crate::margin::{compute_margin, margin_percent};
use crate::settings::PricingSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::models::{Product, Tier};
use shared::money::{MAX_QUANTITY, round_money};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineMargin {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub unit_cost: Decimal,
    pub line_total: Decimal,
    pub line_cost: Decimal,
    pub line_margin: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMarginSummary {
    pub tier: Tier,
    pub lines: Vec<OrderLineMargin>,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub gross_margin: Decimal,
    pub margin_percent: Option<Decimal>,
    /// Products sold below cost in this order
    pub negative_margin_lines: Vec<String>,
}

/// Price every line at `tier` and total revenue, cost and margin
pub fn summarize_order(
    lines: &[OrderLine],
    products: &[Product],
    tier: Tier,
    settings: &PricingSettings,
) -> AppResult<OrderMarginSummary> {
    if lines.is_empty() {
        return Err(AppError::validation("Order has no lines"));
    }

    let catalog: HashMap<&str, &Product> = products.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            return Err(AppError::validation(format!(
                "Quantity for product {} must be at least 1",
                line.product_id
            ))
            .with_detail("product_id", line.product_id.clone()));
        }
        if line.quantity > MAX_QUANTITY {
            return Err(AppError::validation(format!(
                "Quantity {} for product {} exceeds the maximum of {}",
                line.quantity, line.product_id, MAX_QUANTITY
            ))
            .with_detail("product_id", line.product_id.clone())
            .with_detail("quantity", line.quantity));
        }
        let product = catalog
            .get(line.product_id.as_str())
            .ok_or_else(|| AppError::product_not_found(line.product_id.clone()))?;

        let quantity = Decimal::from(line.quantity);
        let unit_price = compute_tier_price(product, tier, settings);
        let (Some(line_total), Some(line_cost)) = (
            unit_price.checked_mul(quantity),
            product.cost.checked_mul(quantity),
        ) else {
            return Err(out_of_range(&line.product_id));
        };
        let (line_total, line_cost) = (round_money(line_total), round_money(line_cost));
        priced.push(OrderLineMargin {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price,
            unit_cost: product.cost,
            line_total,
            line_cost,
            line_margin: compute_margin(line_total, line_cost),
        });
    }

    let mut revenue = Decimal::ZERO;
    let mut cost = Decimal::ZERO;
    for line in &priced {
        revenue = revenue
            .checked_add(line.line_total)
            .ok_or_else(|| out_of_range(&line.product_id))?;
        cost = cost
            .checked_add(line.line_cost)
            .ok_or_else(|| out_of_range(&line.product_id))?;
    }
    let negative_margin_lines = priced
        .iter()
        .filter(|l| l.line_margin < Decimal::ZERO)
        .map(|l| l.product_id.clone())
        .collect();

    Ok(OrderMarginSummary {
        tier,
        lines: priced,
        revenue,
        cost,
        gross_margin: compute_margin(revenue, cost),
        margin_percent: margin_percent(revenue, cost),
        negative_margin_lines,
    })
}

fn out_of_range(product_id: &str) -> AppError {
    AppError::validation(format!("Order total for product {} is out of range", product_id))
        .with_detail("product_id", product_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::{CategoryConfigMap, GlobalPricingConfig};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn settings() -> PricingSettings {
        PricingSettings::new(GlobalPricingConfig::default(), CategoryConfigMap::new())
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("P-1", "Peeling Gel", "Peeling", dec("40")).with_list_price(dec("100")),
            Product::new("P-0", "Cheap Peel", "Peeling", dec("40")).with_list_price(dec("50")),
        ]
    }

    #[test]
    fn test_standard_order() {
        let lines = vec![OrderLine::new("P-1", 3)];
        let summary = summarize_order(&lines, &catalog(), Tier::Standard, &settings()).unwrap();
        assert_eq!(summary.revenue, dec("166.68"));
        assert_eq!(summary.cost, dec("120"));
        assert_eq!(summary.gross_margin, dec("46.68"));
        assert_eq!(summary.margin_percent, Some(dec("28.01")));
        assert!(summary.negative_margin_lines.is_empty());
    }

    #[test]
    fn test_premium_order_reports_loss_lines() {
        let lines = vec![OrderLine::new("P-1", 1), OrderLine::new("P-0", 2)];
        let summary = summarize_order(&lines, &catalog(), Tier::PremiumPro, &settings()).unwrap();
        assert_eq!(summary.lines[0].unit_price, dec("43.48"));
        assert_eq!(summary.lines[1].line_total, dec("43.48"));
        assert_eq!(summary.revenue, dec("86.96"));
        assert_eq!(summary.gross_margin, dec("-33.04"));
        assert_eq!(summary.negative_margin_lines, vec!["P-0".to_string()]);
    }

    #[test]
    fn test_unknown_product() {
        let lines = vec![OrderLine::new("NOPE", 1)];
        let err = summarize_order(&lines, &catalog(), Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
    }

    #[test]
    fn test_rejects_empty_and_zero_quantity() {
        let err = summarize_order(&[], &catalog(), Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let lines = vec![OrderLine::new("P-1", 0)];
        let err = summarize_order(&lines, &catalog(), Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_rejects_quantity_above_maximum() {
        let lines = vec![OrderLine::new("P-1", MAX_QUANTITY + 1)];
        let err = summarize_order(&lines, &catalog(), Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("quantity"), Some(&serde_json::json!(10000)));

        let lines = vec![OrderLine::new("P-1", MAX_QUANTITY)];
        assert!(summarize_order(&lines, &catalog(), Tier::Standard, &settings()).is_ok());
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let products = vec![
            Product::new("HUGE", "Legacy Import", "Peeling", dec("1"))
                .with_list_price(dec("50000000000000000000000000")),
        ];
        let lines = vec![OrderLine::new("HUGE", MAX_QUANTITY)];
        let err = summarize_order(&lines, &products, Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.detail("product_id"), Some(&serde_json::json!("HUGE")));
    }

    #[test]
    fn test_revenue_overflow_is_an_error() {
        let products = vec![
            Product::new("BIG", "Legacy Import", "Peeling", dec("1"))
                .with_list_price(dec("5000000000000000000000000")),
        ];
        let lines = vec![OrderLine::new("BIG", MAX_QUANTITY); 40];
        let err = summarize_order(&lines, &products, Tier::Standard, &settings()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
