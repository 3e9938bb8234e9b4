use uuid::Uuid;

use crate::{
    dto::products::{ProductEnvelope, ProductInput},
    error::AppResult,
    models::Product,
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<Vec<Product>> {
    Ok(state.products.list().await?)
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<Product> {
    Ok(state.products.get(id).await?)
}

pub async fn create_product(state: &AppState, payload: ProductInput) -> AppResult<ProductEnvelope> {
    let fields = payload.validate()?;
    let product = state.products.create(fields).await?;
    tracing::info!(product_id = %product.id, backend = state.products.backend(), "product created");

    Ok(ProductEnvelope::new("Product created successfully", product))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: ProductInput,
) -> AppResult<ProductEnvelope> {
    let fields = payload.validate()?;
    let product = state.products.update(id, fields).await?;
    tracing::info!(product_id = %id, "product updated");

    Ok(ProductEnvelope::new("Product updated successfully", product))
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<ProductEnvelope> {
    let product = state.products.delete(id).await?;
    tracing::info!(product_id = %id, "product deleted");

    Ok(ProductEnvelope::new("Product deleted successfully", product))
}
