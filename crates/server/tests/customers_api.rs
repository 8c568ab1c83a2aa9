use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use service::customer::repo::MapCustomerRepository;

async fn build_app() -> Router {
    server::build_app(Arc::new(MapCustomerRepository::in_memory().await))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "GET", "/api/v1/customers", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_update_delete_lifecycle() -> anyhow::Result<()> {
    let app = build_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/customers",
        Some(json!({"name": "Alex", "email": "alex@example.com", "age": 30})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("generated id");

    let (_, listed) = send(&app, "GET", "/api/v1/customers", None).await?;
    assert_eq!(listed, json!([{"id": id, "name": "Alex", "email": "alex@example.com", "age": 30}]));

    let (status, updated) = send(&app, "PUT", &format!("/api/v1/customers/{id}"), Some(json!({"name": "Alexander"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": id, "name": "Alexander", "email": "alex@example.com", "age": 30}));

    let (_, listed) = send(&app, "GET", "/api/v1/customers", None).await?;
    assert_eq!(listed[0]["name"], "Alexander");
    assert_eq!(listed[0]["email"], "alex@example.com");
    assert_eq!(listed[0]["age"], 30);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/customers/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listed) = send(&app, "GET", "/api/v1/customers", None).await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn explicit_nulls_leave_record_unchanged() -> anyhow::Result<()> {
    let app = build_app().await;
    let (_, created) = send(&app, "POST", "/api/v1/customers", Some(json!({"name": "Kim", "email": "kim@example.com", "age": 44}))).await?;
    let id = created["id"].as_i64().expect("generated id");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/v1/customers/{id}"),
        Some(json!({"name": null, "email": null, "age": null})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_is_404_and_creates_nothing() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "PUT", "/api/v1/customers/999999", Some(json!({"name": "Nobody"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["detail"], "customer not found with id: 999999");

    let (_, listed) = send(&app, "GET", "/api/v1/customers", None).await?;
    assert_eq!(listed, json!([]));
    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_succeeds() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, _) = send(&app, "DELETE", "/api/v1/customers/31337", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn create_with_partial_payload_stores_nulls() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, created) = send(&app, "POST", "/api/v1/customers", Some(json!({"email": "only@example.com"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], Value::Null);
    assert_eq!(created["age"], Value::Null);
    assert_eq!(created["email"], "only@example.com");
    Ok(())
}

#[tokio::test]
async fn non_integer_id_is_rejected() -> anyhow::Result<()> {
    let app = build_app().await;
    let req = Request::builder().method("DELETE").uri("/api/v1/customers/abc").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = build_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let _ = send(&app, "GET", "/api/v1/customers", None).await?;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("customer_api_operations_total"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/customers/{customerId}"].is_object());
    Ok(())
}
