mod common;

use axum::http::StatusCode;
use catalog_services::database::MockCatalogStore;
use common::TestApp;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_check_integration() {
    // Case 1: Connected
    let app = TestApp::new();
    let response = app.server.get("/health").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "API is running", "status": "healthy"})
    );

    // Case 2: Disconnected
    let app = TestApp::with_store(MockCatalogStore::disconnected());
    let response = app.server.get("/health").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["status"], "unhealthy");
}

#[tokio::test]
async fn test_every_response_carries_cors_headers() {
    let app = TestApp::new();

    for path in ["/health", "/api/collections", "/missing", "/uploads/none.png"] {
        let response = app.server.get(path).await;
        assert_eq!(
            response.header("access-control-allow-origin"),
            "*",
            "missing CORS origin on {path}"
        );
        assert_eq!(
            response.header("access-control-allow-methods"),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            response.header("access-control-allow-headers"),
            "Content-Type, Authorization"
        );
    }
}

#[tokio::test]
async fn test_options_is_answered_without_routing() {
    let app = TestApp::new();

    for path in ["/api/collections", "/api/items/1", "/api/upload", "/anything"] {
        let response = app
            .server
            .method(axum::http::Method::OPTIONS, path)
            .await;
        response.assert_status(StatusCode::OK);
        assert!(response.as_bytes().is_empty());
    }
    assert_eq!(app.store.collection_count(), 0);
}
