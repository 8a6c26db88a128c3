//! Pricing Admin - back-office for the partner portal's tier pricing
//!
//! # Module layout
//!
//! ```text
//! pricing-admin/src/
//! ├── core/      # configuration
//! ├── store/     # settings store and product repository (JSON files)
//! ├── service.rs # admin lifecycle operations
//! ├── cli.rs     # command parsing and dispatch
//! └── utils/     # logging
//! ```
//!
//! All pricing arithmetic lives in `pricing_engine`; this crate loads the
//! configuration and products, calls into the engine and persists the
//! admin's edits.

pub mod cli;
pub mod core;
pub mod service;
pub mod store;
pub mod utils;

pub use cli::{Command, execute};
pub use core::Config;
pub use service::{GlobalPricingUpdate, PricingAdminService};
pub use store::{JsonProductStore, JsonSettingsStore, ProductRepository, SettingsRepository};
pub use utils::init_logger_with_file;

use shared::error::{AppError, AppResult, ErrorCode};

/// Load `.env`, read the configuration, create the work directory and
/// start logging
pub fn setup_environment() -> AppResult<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir).map_err(|e| {
        AppError::with_message(
            ErrorCode::ConfigError,
            format!("Cannot create work directory {}: {}", config.work_dir, e),
        )
    })?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::debug!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Environment ready"
    );
    Ok(config)
}

/// Service over the JSON stores named in `config`
pub fn open_service(config: &Config) -> PricingAdminService<JsonSettingsStore, JsonProductStore> {
    PricingAdminService::new(
        JsonSettingsStore::new(&config.settings_file),
        JsonProductStore::new(&config.catalog_file),
    )
}
