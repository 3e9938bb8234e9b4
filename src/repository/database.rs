use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{ProductRepository, RepositoryError, RepositoryResult};
use crate::{
    entity::products::{ActiveModel, Entity as Products, Model as ProductModel},
    models::{Product, ProductFields},
};

/// Product store backed by the `products` table.
///
/// Each call runs in its own transaction. The transaction is committed when
/// the call succeeds; on any early return the guard is dropped, which rolls
/// it back and hands the connection back to the pool.
#[derive(Clone)]
pub struct DatabaseProductRepository {
    conn: DatabaseConnection,
}

impl DatabaseProductRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    async fn session(&self) -> RepositoryResult<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    async fn find(txn: &DatabaseTransaction, id: Uuid) -> RepositoryResult<ProductModel> {
        Products::find_by_id(id.to_string())
            .one(txn)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }
}

#[async_trait]
impl ProductRepository for DatabaseProductRepository {
    async fn create(&self, fields: ProductFields) -> RepositoryResult<Product> {
        let txn = self.session().await?;
        let id = Uuid::new_v4();
        let active = ActiveModel {
            id: Set(id.to_string()),
            name: Set(fields.name().to_owned()),
            price: Set(fields.price()),
            stock: Set(fields.stock()),
            category: Set(fields.category().to_owned()),
        };
        let model = active.insert(&txn).await?;
        txn.commit().await?;

        tracing::debug!(product_id = %id, "product inserted");
        product_from_entity(model)
    }

    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        let txn = self.session().await?;
        let models = Products::find().all(&txn).await?;
        txn.commit().await?;

        models.into_iter().map(product_from_entity).collect()
    }

    async fn get(&self, id: Uuid) -> RepositoryResult<Product> {
        let txn = self.session().await?;
        let model = Self::find(&txn, id).await?;
        txn.commit().await?;

        product_from_entity(model)
    }

    async fn update(&self, id: Uuid, fields: ProductFields) -> RepositoryResult<Product> {
        let txn = self.session().await?;
        let existing = Self::find(&txn, id).await?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(fields.name().to_owned());
        active.price = Set(fields.price());
        active.stock = Set(fields.stock());
        active.category = Set(fields.category().to_owned());

        let model = active.update(&txn).await?;
        txn.commit().await?;

        tracing::debug!(product_id = %id, "product updated");
        product_from_entity(model)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<Product> {
        let txn = self.session().await?;
        let existing = Self::find(&txn, id).await?;
        Products::delete_by_id(existing.id.clone()).exec(&txn).await?;
        txn.commit().await?;

        tracing::debug!(product_id = %id, "product deleted");
        product_from_entity(existing)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.conn.ping().await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "database"
    }
}

fn product_from_entity(model: ProductModel) -> RepositoryResult<Product> {
    let id = Uuid::parse_str(&model.id).map_err(|err| RepositoryError::InvalidRecord {
        id: model.id.clone(),
        reason: err.to_string(),
    })?;
    Ok(Product {
        id,
        name: model.name,
        price: model.price,
        stock: model.stock,
        category: model.category,
    })
}
