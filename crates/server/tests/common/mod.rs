//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that builds the real router with
//! mock index and peer-network dependencies injected, so the whole search
//! flow can be exercised in-process without external infrastructure.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use maglens_core::testing::{MockMetadataFetcher, MockSearchBackend};
use maglens_core::{
    BackendConfig, Config, FileResolver, MetadataConfig, MetadataFetcher, SearchBackend,
    ServerConfig, SessionController,
};
use maglens_server::api::create_router;
use maglens_server::state::AppState;

/// Re-export fixtures for test convenience
pub use maglens_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new();
///     fixture.backend.set_hits(vec![fixtures::hit("Title", "hash1")]).await;
///
///     let response = fixture.post("/api/v1/search", json!({ "query": "title" })).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock index backend - script search pages and file listings
    pub backend: Arc<MockSearchBackend>,
    /// Mock peer-network fetcher - script the fallback tier
    pub fetcher: Arc<MockMetadataFetcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub fn new() -> Self {
        Self::with_fallback_timeout(Duration::from_millis(200))
    }

    /// Create a test fixture with a custom peer fallback deadline.
    pub fn with_fallback_timeout(timeout: Duration) -> Self {
        let backend = Arc::new(MockSearchBackend::new());
        let fetcher = Arc::new(MockMetadataFetcher::new());

        let config = Config {
            server: ServerConfig::default(),
            backend: BackendConfig {
                url: "http://localhost:3333".to_string(),
                timeout_secs: 30,
            },
            metadata: MetadataConfig::default(),
        };

        let session = SessionController::new(Arc::clone(&backend) as Arc<dyn SearchBackend>);
        let resolver = FileResolver::new(
            Arc::clone(&backend) as Arc<dyn SearchBackend>,
            Some(Arc::clone(&fetcher) as Arc<dyn MetadataFetcher>),
            timeout,
        );

        let state = Arc::new(AppState::new(config, session, resolver));
        let router = create_router(state);

        Self {
            router,
            backend,
            fetcher,
        }
    }

    /// Issue a GET request against the in-process router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Issue a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, body }
    }
}
