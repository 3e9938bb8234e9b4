use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductRepository, RepositoryError, RepositoryResult};
use crate::models::{Product, ProductFields};

/// Process-lifetime product store.
///
/// Every operation takes the lock for its whole duration, so concurrent
/// writers to the same id are serialized instead of racing.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    records: HashMap<Uuid, Entry>,
}

struct Entry {
    // creation order, used by `list`
    seq: u64,
    product: Product,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, fields: ProductFields) -> RepositoryResult<Product> {
        let mut inner = self.inner.write().await;
        let mut id = Uuid::new_v4();
        while inner.records.contains_key(&id) {
            id = Uuid::new_v4();
        }
        let product = Product::new(id, fields);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            id,
            Entry {
                seq,
                product: product.clone(),
            },
        );
        tracing::debug!(product_id = %id, "product stored in memory");
        Ok(product)
    }

    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&Entry> = inner.records.values().collect();
        entries.sort_by_key(|e| e.seq);
        Ok(entries.into_iter().map(|e| e.product.clone()).collect())
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Product> {
        let inner = self.inner.read().await;
        inner
            .records
            .get(&id)
            .map(|e| e.product.clone())
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn update(&self, id: Uuid, fields: ProductFields) -> RepositoryResult<Product> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .records
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound { id })?;
        entry.product.replace(fields);
        tracing::debug!(product_id = %id, "product updated in memory");
        Ok(entry.product.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<Product> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .records
            .remove(&id)
            .ok_or(RepositoryError::NotFound { id })?;
        tracing::debug!(product_id = %id, "product removed from memory");
        Ok(entry.product)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
