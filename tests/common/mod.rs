#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use product_catalog_api::{
    db::{create_orm_conn, run_migrations},
    repository::{DatabaseProductRepository, InMemoryProductRepository, ProductRepository},
    routes::create_app,
    state::AppState,
};
use serde_json::Value;
use tower::ServiceExt;

pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/migrations");

pub fn memory_state() -> AppState {
    AppState::new(Arc::new(InMemoryProductRepository::new()))
}

/// Fresh SQLite database living only as long as its single pooled connection.
pub async fn sqlite_repository() -> anyhow::Result<DatabaseProductRepository> {
    let conn = create_orm_conn("sqlite::memory:", 1).await?;
    run_migrations(&conn, MIGRATIONS_DIR).await?;
    Ok(DatabaseProductRepository::new(conn))
}

pub async fn sqlite_state() -> anyhow::Result<AppState> {
    let repo: Arc<dyn ProductRepository> = Arc::new(sqlite_repository().await?);
    Ok(AppState::new(repo))
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn app(state: AppState) -> Router {
    create_app(state)
}
