//! Shared test utilities for integration tests.
//!
//! This module provides common test infrastructure including:
//! - `TestApp` - the router on top of `MockCatalogStore` and a temporary upload directory
//! - JSON helpers for seeding collections and items

use axum_test::TestServer;
use catalog_services::{config::Config, database::MockCatalogStore, routes};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub store: MockCatalogStore,
    /// Kept alive for the duration of the test.
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MockCatalogStore::new())
    }

    pub fn with_store(store: MockCatalogStore) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let config = Config::new_for_test(upload_dir.path());
        let server = TestServer::new(routes(store.clone(), &config)).unwrap();
        Self {
            server,
            store,
            upload_dir,
        }
    }

    /// Names of the files currently in the upload directory.
    #[allow(dead_code)]
    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Creates a collection through the API and returns the response body.
    #[allow(dead_code)]
    pub async fn create_collection(&self, name: &str) -> Value {
        let response = self
            .server
            .post("/api/collections")
            .json(&json!({"name": name, "description": format!("{name} description")}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }

    /// Creates an item through the API and returns the response body.
    #[allow(dead_code)]
    pub async fn create_item(&self, body: Value) -> Value {
        let response = self.server.post("/api/items").json(&body).await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }
}
