//! Store Module
//!
//! The two collaborators the admin service persists through: a key-value
//! settings store holding the pricing configuration blobs and a product
//! repository. Both are JSON-file backed; last write wins.

mod json_file;
pub mod products;
pub mod settings;

pub use products::JsonProductStore;
pub use settings::JsonSettingsStore;

use async_trait::async_trait;
use serde_json::Value;
use shared::error::AppResult;
use shared::models::Product;

/// Key-value store for configuration blobs
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;
    async fn put(&self, key: &str, value: Value) -> AppResult<()>;
}

/// Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>>;
    /// Insert or replace by product id
    async fn save(&self, product: Product) -> AppResult<Product>;
}
