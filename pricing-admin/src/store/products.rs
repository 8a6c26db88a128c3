//! Product Store (one JSON array of products)

use super::ProductRepository;
use super::json_file::{read_document, write_document};
use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::Product;
use std::path::PathBuf;
use tokio::sync::Mutex;

pub struct JsonProductStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

}

#[async_trait]
impl ProductRepository for JsonProductStore {
    async fn find_all(&self) -> AppResult<Vec<Product>> {
        Ok(read_document(&self.path).await?.unwrap_or_default())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        Ok(self.find_all().await?.into_iter().find(|p| p.id == id))
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.find_all().await?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        write_document(&self.path, &products).await?;
        tracing::debug!(product_id = %product.id, "Product stored");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_save_inserts_then_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProductStore::new(dir.path().join("catalog.json"));
        assert!(store.find_all().await.unwrap().is_empty());

        let product = Product::new("P-1", "Peeling Gel", "Peeling", Decimal::from(40));
        store.save(product.clone()).await.unwrap();
        store
            .save(product.with_list_price(Decimal::from(100)))
            .await
            .unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].list_price, Some(Decimal::from(100)));
        assert!(store.find_by_id("missing").await.unwrap().is_none());
    }
}
