//! Pricing Admin Service
//!
//! Lifecycle of the pricing configuration:
//! - global configuration created once with defaults, then edited
//! - category entries created lazily on first edit, removed by reset
//! - individual overrides set and cleared per product
//! - list-price commits validated against the minimum margin
//!
//! Reads never fail on bad configuration (conservative fallback with
//! warnings); writes refuse to build on configuration they cannot decode.

use crate::store::{ProductRepository, SettingsRepository};
use pricing_engine::{
    CatalogAudit, ListPriceEdit, LoadedSettings, OrderLine, OrderMarginSummary, PricingSettings,
    SavingsQuote, TierQuote, audit_catalog, quote_tier_price, savings_quote, summarize_order,
    validate_list_price_edit,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    CategoryConfigMap, CategoryPricingConfig, GlobalPricingConfig, PricingTier, Product,
    RiskThresholds, SETTINGS_KEY_CATEGORIES, SETTINGS_KEY_GLOBAL, Tier,
};
use shared::money::format_eur;

/// Partial update of the global configuration; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalPricingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_multiplier: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium_multiplier: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_margin_absolute: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_thresholds: Option<RiskThresholds>,
}

impl GlobalPricingUpdate {
    fn apply(self, config: &mut GlobalPricingConfig) -> AppResult<()> {
        if let Some(value) = self.standard_multiplier {
            config.standard_multiplier = check_multiplier(value)?;
        }
        if let Some(value) = self.premium_multiplier {
            config.premium_multiplier = check_multiplier(value)?;
        }
        if let Some(value) = self.minimum_margin_absolute {
            if value < Decimal::ZERO {
                return Err(AppError::with_message(
                    ErrorCode::PricingConfigInvalid,
                    format!("Minimum margin {} cannot be negative", format_eur(value)),
                ));
            }
            config.minimum_margin_absolute = value;
        }
        if let Some(bands) = self.risk_thresholds {
            if bands.low_band < Decimal::ZERO || bands.optimal_band < bands.low_band {
                return Err(AppError::with_message(
                    ErrorCode::PricingConfigInvalid,
                    format!(
                        "Risk bands must satisfy 0 <= low ({}) <= optimal ({})",
                        bands.low_band, bands.optimal_band
                    ),
                ));
            }
            config.risk_thresholds = bands;
        }
        Ok(())
    }
}

fn check_multiplier(value: Decimal) -> AppResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(AppError::with_message(
            ErrorCode::MultiplierInvalid,
            format!("Multiplier must be greater than zero, got {}", value),
        )
        .with_detail("value", value.to_string()));
    }
    Ok(value)
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, blob: Value) -> AppResult<T> {
    serde_json::from_value(blob).map_err(|e| {
        AppError::with_message(
            ErrorCode::PricingConfigInvalid,
            format!("Stored {} cannot be decoded: {}", key, e),
        )
        .with_detail("key", key)
    })
}

fn encode<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("Failed to encode settings: {}", e)))
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct PricingAdminService<S, P> {
    settings: S,
    products: P,
}

impl<S, P> PricingAdminService<S, P>
where
    S: SettingsRepository,
    P: ProductRepository,
{
    pub fn new(settings: S, products: P) -> Self {
        Self { settings, products }
    }

    pub fn settings_store(&self) -> &S {
        &self.settings
    }

    pub fn product_store(&self) -> &P {
        &self.products
    }

    // ==================== Configuration ====================

    /// Configuration in force, with every fallback taken
    ///
    /// A settings store that cannot be read counts as a missing blob.
    pub async fn load_settings(&self) -> LoadedSettings {
        let global = self.read_blob(SETTINGS_KEY_GLOBAL).await;
        let categories = self.read_blob(SETTINGS_KEY_CATEGORIES).await;
        PricingSettings::from_blobs(global.as_ref(), categories.as_ref())
    }

    async fn read_blob(&self, key: &str) -> Option<Value> {
        match self.settings.get(key).await {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Settings store unavailable");
                None
            }
        }
    }

    /// Stored global configuration for editing; defaults when absent
    async fn stored_global(&self) -> AppResult<Option<GlobalPricingConfig>> {
        match self.settings.get(SETTINGS_KEY_GLOBAL).await? {
            None | Some(Value::Null) => Ok(None),
            Some(blob) => decode(SETTINGS_KEY_GLOBAL, blob).map(Some),
        }
    }

    async fn stored_categories(&self) -> AppResult<CategoryConfigMap> {
        match self.settings.get(SETTINGS_KEY_CATEGORIES).await? {
            None | Some(Value::Null) => Ok(CategoryConfigMap::new()),
            Some(blob) => decode(SETTINGS_KEY_CATEGORIES, blob),
        }
    }

    /// Create the global configuration with defaults unless one is stored
    ///
    /// Returns `true` when it was created.
    pub async fn initialize_global(&self) -> AppResult<bool> {
        if self.settings.get(SETTINGS_KEY_GLOBAL).await?.is_some() {
            return Ok(false);
        }
        let config = GlobalPricingConfig::default();
        self.settings
            .put(SETTINGS_KEY_GLOBAL, encode(&config)?)
            .await?;
        tracing::info!(
            standard = %config.standard_multiplier,
            premium = %config.premium_multiplier,
            minimum_margin = %config.minimum_margin_absolute,
            "Global pricing configuration created"
        );
        Ok(true)
    }

    pub async fn update_global(&self, update: GlobalPricingUpdate) -> AppResult<GlobalPricingConfig> {
        let mut config = self.stored_global().await?.unwrap_or_default();
        update.apply(&mut config)?;
        self.settings
            .put(SETTINGS_KEY_GLOBAL, encode(&config)?)
            .await?;
        tracing::info!(
            standard = %config.standard_multiplier,
            premium = %config.premium_multiplier,
            minimum_margin = %config.minimum_margin_absolute,
            "Global pricing configuration updated"
        );
        Ok(config)
    }

    /// Set one category multiplier, creating the category entry if needed
    pub async fn set_category_multiplier(
        &self,
        category: &str,
        tier: PricingTier,
        value: Decimal,
    ) -> AppResult<CategoryPricingConfig> {
        let category = category.trim();
        if category.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }
        let value = check_multiplier(value)?;

        let mut categories = self.stored_categories().await?;
        let entry = categories.entry(category.to_string()).or_default();
        entry.set(tier, Some(value));
        let entry = entry.clone();

        self.settings
            .put(SETTINGS_KEY_CATEGORIES, encode(&categories)?)
            .await?;
        tracing::info!(category = %category, tier = %tier, multiplier = %value, "Category multiplier set");
        Ok(entry)
    }

    /// Remove a category entry; its products resolve to the global values again
    ///
    /// Returns `false` when the category had no entry.
    pub async fn reset_category(&self, category: &str) -> AppResult<bool> {
        let mut categories = self.stored_categories().await?;
        if categories.remove(category.trim()).is_none() {
            tracing::info!(category = %category, "Category has no pricing entry");
            return Ok(false);
        }
        self.settings
            .put(SETTINGS_KEY_CATEGORIES, encode(&categories)?)
            .await?;
        tracing::info!(category = %category, "Category pricing reset to global");
        Ok(true)
    }

    // ==================== Products ====================

    async fn product(&self, product_id: &str) -> AppResult<Product> {
        self.products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| AppError::product_not_found(product_id))
    }

    pub async fn set_individual_multiplier(
        &self,
        product_id: &str,
        tier: PricingTier,
        value: Decimal,
    ) -> AppResult<Product> {
        let value = check_multiplier(value)?;
        let mut product = self.product(product_id).await?;
        product
            .individual_override
            .get_or_insert_with(Default::default)
            .set(tier, Some(value));
        product.updated_at = Some(now_millis());

        let product = self.products.save(product).await?;
        tracing::info!(product_id = %product_id, tier = %tier, multiplier = %value, "Individual multiplier set");
        Ok(product)
    }

    /// Clear a product's override; it resolves through its category again
    pub async fn reset_individual(&self, product_id: &str) -> AppResult<Product> {
        let mut product = self.product(product_id).await?;
        if !product.has_individual_override() {
            return Err(AppError::new(ErrorCode::OverrideNotFound)
                .with_detail("product_id", product_id));
        }
        product.individual_override = None;
        product.updated_at = Some(now_millis());

        let product = self.products.save(product).await?;
        tracing::info!(product_id = %product_id, "Individual multiplier reset to inherited");
        Ok(product)
    }

    /// Validate and store a new list price
    ///
    /// Nothing is persisted when a tier margin would fall below the minimum.
    /// Commits are refused while any stored configuration is unreadable or a
    /// resolved multiplier is not positive, since substituted multipliers of
    /// 1.0 would accept almost any price.
    pub async fn commit_list_price(&self, product_id: &str, proposed: Decimal) -> AppResult<ListPriceEdit> {
        let mut product = self.product(product_id).await?;
        let loaded = self.load_settings().await;
        if let Some(warning) = loaded.warnings.iter().find(|w| w.is_config_warning()) {
            return Err(AppError::with_message(
                ErrorCode::PricingConfigInvalid,
                format!("Cannot validate list price: {}", warning),
            ));
        }

        let edit = validate_list_price_edit(&product, proposed, &loaded.settings)
            .into_result()
            .inspect_err(|e| {
                tracing::warn!(product_id = %product_id, proposed = %proposed, error = %e, "List price edit rejected");
            })?;

        product.list_price = Some(edit.list_price);
        product.updated_at = Some(now_millis());
        self.products.save(product).await?;
        tracing::info!(product_id = %product_id, list_price = %edit.list_price, "List price committed");
        Ok(edit)
    }

    // ==================== Queries ====================

    pub async fn quote(&self, product_id: &str, tier: Tier) -> AppResult<TierQuote> {
        let product = self.product(product_id).await?;
        let loaded = self.load_settings().await;
        let mut quote = quote_tier_price(&product, tier, &loaded.settings);
        let mut warnings = loaded.warnings;
        warnings.append(&mut quote.warnings);
        quote.warnings = warnings;
        Ok(quote)
    }

    pub async fn savings(&self, product_id: &str) -> AppResult<SavingsQuote> {
        let product = self.product(product_id).await?;
        let loaded = self.load_settings().await;
        Ok(savings_quote(&product, &loaded.settings))
    }

    /// Pricing table for the whole catalog
    pub async fn audit(&self) -> AppResult<CatalogAudit> {
        let products = self.products.find_all().await?;
        let loaded = self.load_settings().await;
        Ok(audit_catalog(&products, &loaded.settings).with_config_warnings(loaded.warnings))
    }

    pub async fn order_summary(&self, lines: &[OrderLine], tier: Tier) -> AppResult<OrderMarginSummary> {
        let products = self.products.find_all().await?;
        let loaded = self.load_settings().await;
        summarize_order(lines, &products, tier, &loaded.settings)
    }
}
