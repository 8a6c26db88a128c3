//! Admin lifecycle against JSON stores in a temporary work directory

use pricing_admin::{
    Command, Config, GlobalPricingUpdate, JsonProductStore, JsonSettingsStore,
    PricingAdminService, ProductRepository, SettingsRepository, execute, open_service,
};
use pricing_engine::{OrderLine, PriceSource, PricingWarning};
use rust_decimal::Decimal;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::{
    MultiplierOverride, PricingTier, Product, ResolutionLevel, SETTINGS_KEY_CATEGORIES, SETTINGS_KEY_GLOBAL, Tier,
};
use tempfile::TempDir;

type Service = PricingAdminService<JsonSettingsStore, JsonProductStore>;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn seeded() -> (TempDir, Service) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string());
    let service = open_service(&config);

    for product in [
        Product::new("P-1", "Peeling Gel", "Peeling", dec("40")).with_list_price(dec("100")),
        Product::new("S-1", "Vitamin Serum", "Serum", dec("20")).with_list_price(dec("60")),
    ] {
        service.product_store().save(product).await.unwrap();
    }
    (dir, service)
}

#[tokio::test]
async fn missing_configuration_falls_back_to_conservative_pricing() {
    let (_dir, service) = seeded().await;

    let loaded = service.load_settings().await;
    assert!(loaded.warnings.contains(&PricingWarning::GlobalConfigMissing));
    assert_eq!(loaded.settings.global.standard_multiplier, Decimal::ONE);

    let quote = service.quote("P-1", Tier::Standard).await.unwrap();
    assert_eq!(quote.price, dec("100"));
    assert_eq!(quote.warnings[0], PricingWarning::GlobalConfigMissing);

    let audit = service.audit().await.unwrap();
    assert_eq!(audit.config_warnings, vec![PricingWarning::GlobalConfigMissing]);
}

#[tokio::test]
async fn initialize_global_runs_once() {
    let (_dir, service) = seeded().await;

    assert!(service.initialize_global().await.unwrap());
    assert!(!service.initialize_global().await.unwrap());

    let quote = service.quote("P-1", Tier::PremiumElite).await.unwrap();
    assert_eq!(quote.price, dec("43.48"));
    assert_eq!(quote.source, PriceSource::Multiplier);
    assert!(quote.warnings.is_empty());
}

#[tokio::test]
async fn category_entry_created_lazily_and_reset() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    assert_eq!(
        service.settings_store().get(SETTINGS_KEY_CATEGORIES).await.unwrap(),
        None
    );

    service
        .set_category_multiplier("Peeling", PricingTier::Standard, dec("2.0"))
        .await
        .unwrap();
    let quote = service.quote("P-1", Tier::Standard).await.unwrap();
    assert_eq!(quote.price, dec("50"));
    assert_eq!(quote.level, Some(ResolutionLevel::Category));

    // Premium falls through to global
    let quote = service.quote("P-1", Tier::Premium).await.unwrap();
    assert_eq!(quote.price, dec("43.48"));

    assert!(service.reset_category("Peeling").await.unwrap());
    assert!(!service.reset_category("Peeling").await.unwrap());
    let quote = service.quote("P-1", Tier::Standard).await.unwrap();
    assert_eq!(quote.price, dec("55.56"));
    assert_eq!(quote.level, Some(ResolutionLevel::Global));
}

#[tokio::test]
async fn individual_override_set_and_reset() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let product = service
        .set_individual_multiplier("S-1", PricingTier::Premium, dec("3"))
        .await
        .unwrap();
    assert!(product.updated_at.is_some());

    let savings = service.savings("S-1").await.unwrap();
    assert_eq!(savings.standard_price, dec("33.33"));
    assert_eq!(savings.premium_price, dec("20"));
    assert_eq!(savings.savings, dec("13.33"));

    let product = service.reset_individual("S-1").await.unwrap();
    assert!(product.individual_override.is_none());

    let err = service.reset_individual("S-1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OverrideNotFound);
}

#[tokio::test]
async fn invalid_multipliers_are_refused() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let err = service
        .set_category_multiplier("Peeling", PricingTier::Standard, Decimal::ZERO)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MultiplierInvalid);

    let err = service
        .update_global(GlobalPricingUpdate {
            premium_multiplier: Some(dec("-1")),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MultiplierInvalid);

    let err = service
        .set_individual_multiplier("NOPE", PricingTier::Standard, dec("2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);
}

#[tokio::test]
async fn update_global_changes_minimum_margin() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let config = service
        .update_global(GlobalPricingUpdate {
            minimum_margin_absolute: Some(dec("20")),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(config.standard_multiplier, dec("1.8"));
    assert_eq!(config.minimum_margin_absolute, dec("20"));

    // 100 / 1.8 = 55.56, margin 15.56 < 20
    let err = service.commit_list_price("P-1", dec("100")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MarginBelowMinimum);
}

#[tokio::test]
async fn rejected_list_price_is_not_persisted() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let err = service.commit_list_price("P-1", dec("50")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MarginBelowMinimum);
    assert_eq!(err.detail("tier"), Some(&json!("STANDARD")));
    let shortfall = err.detail("shortfall").and_then(|v| v.as_f64()).unwrap();
    assert!((shortfall - 18.22).abs() < 1e-9);

    let stored = service.product_store().find_by_id("P-1").await.unwrap().unwrap();
    assert_eq!(stored.list_price, Some(dec("100")));

    let err = service.commit_list_price("P-1", Decimal::ZERO).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ListPriceInvalid);
}

#[tokio::test]
async fn accepted_list_price_is_stored_unchanged() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let edit = service.commit_list_price("P-1", dec("119.99")).await.unwrap();
    assert_eq!(edit.standard.price, dec("66.66"));

    let stored = service.product_store().find_by_id("P-1").await.unwrap().unwrap();
    assert_eq!(stored.list_price, Some(dec("119.99")));
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn list_price_commit_refused_without_global_config() {
    let (_dir, service) = seeded().await;

    let err = service.commit_list_price("P-1", dec("120")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PricingConfigInvalid);
}

#[tokio::test]
async fn malformed_category_blob_degrades_reads_and_blocks_writes() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();
    service
        .settings_store()
        .put(SETTINGS_KEY_CATEGORIES, json!(["not", "a", "map"]))
        .await
        .unwrap();

    let loaded = service.load_settings().await;
    assert!(loaded.settings.categories.is_empty());
    assert!(matches!(
        loaded.warnings[0],
        PricingWarning::CategoryConfigMalformed { .. }
    ));

    let err = service
        .set_category_multiplier("Peeling", PricingTier::Standard, dec("2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PricingConfigInvalid);

    let err = service.commit_list_price("P-1", dec("120")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PricingConfigInvalid);
}

#[tokio::test]
async fn zero_stored_override_blocks_list_price_commit() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let product = service.product_store().find_by_id("P-1").await.unwrap().unwrap();
    let product = product.with_override(MultiplierOverride {
        standard_multiplier: Some(Decimal::ZERO),
        premium_multiplier: Some(Decimal::ZERO),
    });
    service.product_store().save(product).await.unwrap();

    let err = service.commit_list_price("P-1", dec("50")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MultiplierInvalid);
    assert_eq!(err.detail("level"), Some(&json!("INDIVIDUAL")));

    let stored = service.product_store().find_by_id("P-1").await.unwrap().unwrap();
    assert_eq!(stored.list_price, Some(dec("100")));
}

#[tokio::test]
async fn list_price_above_maximum_is_invalid() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let err = service
        .commit_list_price("P-1", dec("50000000000000000000000000"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ListPriceInvalid);
}

#[tokio::test]
async fn order_summary_prices_at_buyer_tier() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let lines = vec![OrderLine::new("P-1", 2), OrderLine::new("S-1", 1)];
    let summary = service.order_summary(&lines, Tier::Standard).await.unwrap();
    // 2 x 55.56 + 33.33
    assert_eq!(summary.revenue, dec("144.45"));
    assert_eq!(summary.cost, dec("100"));
    assert_eq!(summary.gross_margin, dec("44.45"));

    let err = service
        .order_summary(&[OrderLine::new("NOPE", 1)], Tier::Standard)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);
}

#[tokio::test]
async fn cli_commands_round_through_the_service() {
    let (_dir, service) = seeded().await;
    service.initialize_global().await.unwrap();

    let command = Command::parse(["set-override", "P-1", "standard", "2.5"]).unwrap();
    execute(&service, command).await.unwrap();

    let output = execute(&service, Command::parse(["quote", "P-1", "standard"]).unwrap())
        .await
        .unwrap();
    assert_eq!(output["price"], json!(40.0));
    assert_eq!(output["level"], json!("INDIVIDUAL"));

    let output = execute(&service, Command::Audit).await.unwrap();
    assert_eq!(output["summary"]["product_count"], json!(2));
    assert_eq!(output["summary"]["individual_level"], json!(1));

    let stored = service
        .settings_store()
        .get(SETTINGS_KEY_GLOBAL)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["standard_multiplier"], json!(1.8));
}
