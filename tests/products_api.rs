mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use product_catalog_api::state::AppState;
use serde_json::{Value, json};

use common::{app, memory_state, send, sqlite_repository, sqlite_state};

fn widget() -> Value {
    json!({"name": "Widget", "price": 9.99, "stock": 5, "category": "tools"})
}

// Full lifecycle: create -> get -> update -> delete -> get (404).
async fn lifecycle(router: axum::Router) {
    let (status, body) = send(&router, Method::POST, "/products", Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product created successfully");
    let product = &body["product"];
    let id = product["id"].as_str().expect("generated id").to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
    assert_eq!(product["name"], "Widget");
    assert_eq!(product["price"], 9.99);
    assert_eq!(product["stock"], 5);
    assert_eq!(product["category"], "tools");

    let (status, fetched) = send(&router, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched, product);

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/products/{id}"),
        Some(json!({"name": "Widget2", "price": 8.99, "stock": 3, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");
    assert_eq!(
        body["product"],
        json!({"id": id, "name": "Widget2", "price": 8.99, "stock": 3, "category": "tools"})
    );

    let (_, fetched) = send(&router, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(fetched, body["product"]);

    let (status, body) = send(&router, Method::DELETE, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");
    assert_eq!(body["product"], fetched);

    let (status, body) = send(&router, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Product not found"}));
}

#[tokio::test]
async fn product_lifecycle_in_memory() {
    lifecycle(app(memory_state())).await;
}

#[tokio::test]
async fn product_lifecycle_in_database() -> anyhow::Result<()> {
    lifecycle(app(sqlite_state().await?)).await;
    Ok(())
}

#[tokio::test]
async fn list_is_empty_then_returns_every_product_in_creation_order() {
    let router = app(memory_state());

    let (status, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let mut created = Vec::new();
    for i in 0..3 {
        let (_, body) = send(
            &router,
            Method::POST,
            "/products",
            Some(json!({"name": format!("item-{i}"), "price": i as f64, "stock": i, "category": "misc"})),
        )
        .await;
        created.push(body["product"].clone());
    }

    let (status, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(created));
}

#[tokio::test]
async fn invalid_fields_are_rejected_without_side_effects() {
    let router = app(memory_state());
    let cases = [
        (json!({"name": "", "price": 1.0, "stock": 1, "category": "tools"}), "name"),
        (json!({"name": "Widget", "price": 1.0, "stock": 1, "category": ""}), "category"),
        (json!({"name": "Widget", "price": -1.0, "stock": 1, "category": "tools"}), "price"),
        (json!({"name": "Widget", "price": 1.0, "stock": -1, "category": "tools"}), "stock"),
    ];

    for (payload, field) in cases {
        let (status, body) = send(&router, Method::POST, "/products", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let errors = body["errors"].as_array().expect("field errors");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["field"], field);
        assert!(body["detail"].as_str().unwrap().contains(field));
    }

    let (_, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    let router = app(memory_state());

    let (status, _) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "price": 1.0, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "price": "cheap", "stock": 1, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_with_invalid_fields_leaves_product_untouched() {
    let router = app(memory_state());
    let (_, created) = send(&router, Method::POST, "/products", Some(widget())).await;
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/products/{id}"),
        Some(json!({"name": "Widget", "price": -5.0, "stock": 1, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, fetched) = send(&router, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(fetched, created["product"]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let router = app(memory_state());
    let (_, created) = send(&router, Method::POST, "/products", Some(widget())).await;
    let missing = uuid::Uuid::new_v4();
    let uri = format!("/products/{missing}");

    let (status, body) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Product not found");

    let (status, _) = send(&router, Method::PUT, &uri, Some(widget())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(body, json!([created["product"].clone()]));
}

#[tokio::test]
async fn malformed_id_is_unprocessable() {
    let router = app(memory_state());
    let (status, body) = send(&router, Method::GET, "/products/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn unknown_route_falls_back_to_not_found() {
    let router = app(memory_state());
    let (status, body) = send(&router, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn closed_database_yields_generic_errors() -> anyhow::Result<()> {
    let repo = sqlite_repository().await?;
    let conn = repo.connection().clone();
    let router = app(AppState::new(Arc::new(repo)));
    conn.close().await?;

    let (status, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Internal Server Error"}));

    let (status, body) = send(&router, Method::POST, "/products", Some(widget())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Internal Server Error"}));

    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "unavailable", "storage": "database"}));
    Ok(())
}

#[tokio::test]
async fn whole_number_float_stock_is_accepted() {
    let router = app(memory_state());

    let (status, body) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "price": 9.99, "stock": 5.0, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["product"]["stock"], 5);

    let (status, _) = send(
        &router,
        Method::POST,
        "/products",
        Some(json!({"name": "Widget", "price": 9.99, "stock": 5.5, "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send(&router, Method::GET, "/products", None).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
