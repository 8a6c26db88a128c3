//! Catalog Pricing Audit
//!
//! One row per active product for the admin pricing table: provenance badge,
//! tier prices, margins, risk bands and data-quality warnings.

use crate::calculator::{PriceSource, TierQuote, quote_both};
use crate::margin::{RiskBand, classify_risk_with, compute_margin, margin_percent};
use crate::resolver::resolve_for;
use crate::savings::savings_between;
use crate::settings::PricingSettings;
use crate::warning::PricingWarning;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{PricingTier, Product, ResolutionLevel};

/// Price point columns of a pricing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAudit {
    pub price: Decimal,
    pub source: PriceSource,
    pub margin: Decimal,
    pub margin_percent: Option<Decimal>,
    pub risk: RiskBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricingRow {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub cost: Decimal,
    pub list_price: Option<Decimal>,
    pub level: ResolutionLevel,
    pub standard_multiplier: Decimal,
    pub premium_multiplier: Decimal,
    pub standard: TierAudit,
    pub premium: TierAudit,
    pub savings: Decimal,
    pub warnings: Vec<PricingWarning>,
}

impl ProductPricingRow {
    /// Needs admin attention: below the floor, or any data-quality warning
    pub fn is_flagged(&self) -> bool {
        self.standard.risk.is_below_minimum()
            || self.premium.risk.is_below_minimum()
            || !self.warnings.is_empty()
    }

    pub fn has_negative_margin(&self) -> bool {
        self.standard.margin < Decimal::ZERO || self.premium.margin < Decimal::ZERO
    }

    pub fn is_inverted(&self) -> bool {
        self.premium.price > self.standard.price
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub product_count: usize,
    /// Standard-tier risk bands
    pub risk: usize,
    pub low: usize,
    pub optimal: usize,
    pub premium: usize,
    /// Resolution levels
    pub global_level: usize,
    pub category_level: usize,
    pub individual_level: usize,
    pub negative_margin: usize,
    pub inverted_tiers: usize,
    pub flagged: usize,
}

impl AuditSummary {
    fn record(&mut self, row: &ProductPricingRow) {
        self.product_count += 1;
        match row.standard.risk {
            RiskBand::Risk => self.risk += 1,
            RiskBand::Low => self.low += 1,
            RiskBand::Optimal => self.optimal += 1,
            RiskBand::Premium => self.premium += 1,
        }
        match row.level {
            ResolutionLevel::Global => self.global_level += 1,
            ResolutionLevel::Category => self.category_level += 1,
            ResolutionLevel::Individual => self.individual_level += 1,
        }
        if row.has_negative_margin() {
            self.negative_margin += 1;
        }
        if row.is_inverted() {
            self.inverted_tiers += 1;
        }
        if row.is_flagged() {
            self.flagged += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogAudit {
    /// Fallbacks taken while loading the configuration
    pub config_warnings: Vec<PricingWarning>,
    pub rows: Vec<ProductPricingRow>,
    pub summary: AuditSummary,
}

impl CatalogAudit {
    pub fn with_config_warnings(mut self, warnings: Vec<PricingWarning>) -> Self {
        self.config_warnings = warnings;
        self
    }
}

/// Audit every active product, ordered by category then product id
pub fn audit_catalog(products: &[Product], settings: &PricingSettings) -> CatalogAudit {
    let mut active: Vec<&Product> = products.iter().filter(|p| p.is_active).collect();
    active.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.id.cmp(&b.id)));

    let mut summary = AuditSummary::default();
    let rows: Vec<ProductPricingRow> = active
        .into_iter()
        .map(|product| {
            let row = audit_product(product, settings);
            summary.record(&row);
            row
        })
        .collect();

    CatalogAudit {
        config_warnings: Vec::new(),
        rows,
        summary,
    }
}

/// Pricing row for a single product
pub fn audit_product(product: &Product, settings: &PricingSettings) -> ProductPricingRow {
    let resolved = resolve_for(product, settings);
    let (standard_quote, premium_quote) = quote_both(product, settings);

    let mut warnings = Vec::new();
    if product.cost <= Decimal::ZERO {
        warnings.push(PricingWarning::NonPositiveCost { cost: product.cost });
    }
    for warning in standard_quote.warnings.iter().chain(&premium_quote.warnings) {
        if !warnings.contains(warning) {
            warnings.push(warning.clone());
        }
    }

    let standard = tier_audit(&standard_quote, product, settings);
    let premium = tier_audit(&premium_quote, product, settings);

    for (tier, audit) in [(PricingTier::Standard, &standard), (PricingTier::Premium, &premium)] {
        if audit.margin < Decimal::ZERO {
            warnings.push(PricingWarning::NegativeMargin {
                tier,
                margin: audit.margin,
            });
        }
    }
    if premium.price > standard.price {
        warnings.push(PricingWarning::PremiumAboveStandard {
            standard: standard.price,
            premium: premium.price,
        });
    }

    ProductPricingRow {
        product_id: product.id.clone(),
        name: product.name.clone(),
        category: product.category.clone(),
        cost: product.cost,
        list_price: product.list_price,
        level: resolved.level,
        standard_multiplier: resolved.standard_multiplier,
        premium_multiplier: resolved.premium_multiplier,
        savings: savings_between(standard.price, premium.price),
        standard,
        premium,
        warnings,
    }
}

fn tier_audit(quote: &TierQuote, product: &Product, settings: &PricingSettings) -> TierAudit {
    let global = &settings.global;
    let margin = compute_margin(quote.price, product.cost);
    TierAudit {
        price: quote.price,
        source: quote.source,
        margin,
        margin_percent: margin_percent(quote.price, product.cost),
        risk: classify_risk_with(margin, global.minimum_margin_absolute, &global.risk_thresholds),
    }
}
