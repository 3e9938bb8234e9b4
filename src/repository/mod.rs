//! Storage for product records.
//!
//! Both backends implement [`ProductRepository`]; which one serves requests is
//! decided once at startup from `STORAGE_BACKEND`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Product, ProductFields};

pub mod database;
pub mod memory;

pub use database::DatabaseProductRepository;
pub use memory::InMemoryProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("product {id} not found")]
    NotFound { id: Uuid },

    #[error("storage error")]
    Storage(#[from] sea_orm::DbErr),

    /// A stored row could not be turned back into a [`Product`].
    #[error("invalid stored record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Stores a new record under a freshly generated id.
    async fn create(&self, fields: ProductFields) -> RepositoryResult<Product>;

    async fn list(&self) -> RepositoryResult<Vec<Product>>;

    async fn get(&self, id: Uuid) -> RepositoryResult<Product>;

    /// Replaces every mutable field and returns the new state.
    async fn update(&self, id: Uuid, fields: ProductFields) -> RepositoryResult<Product>;

    /// Removes the record and returns it as it was right before removal.
    async fn delete(&self, id: Uuid) -> RepositoryResult<Product>;

    async fn ping(&self) -> RepositoryResult<()>;

    fn backend(&self) -> &'static str;
}
