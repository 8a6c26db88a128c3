//! Settings Store (one JSON object, key -> blob)

use super::SettingsRepository;
use super::json_file::{read_document, write_document};
use async_trait::async_trait;
use serde_json::{Map, Value};
use shared::error::AppResult;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct JsonSettingsStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }


    async fn load(&self) -> AppResult<Map<String, Value>> {
        Ok(read_document(&self.path).await?.unwrap_or_default())
    }
}

#[async_trait]
impl SettingsRepository for JsonSettingsStore {
    async fn get(&self, key: &str) -> AppResult<Option<Value>> {
        let mut document = self.load().await?;
        Ok(document.remove(key))
    }

    async fn put(&self, key: &str, value: Value) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        document.insert(key.to_string(), value);
        write_document(&self.path, &document).await?;
        tracing::debug!(key = %key, path = %self.path.display(), "Setting stored");
        Ok(())
    }
}
