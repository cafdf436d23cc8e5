use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use async_trait::async_trait;
use visitmeter_core::config::Config;
use visitmeter_core::store::VisitStore;
use visitmeter_core::visit::VisitRecord;
use visitmeter_server::app::build_app;
use visitmeter_server::state::AppState;

fn test_config() -> Config {
    Config {
        port: 0,
        db_host: "localhost".to_string(),
        db_port: 3306,
        db_user: "visitmeter".to_string(),
        db_password: String::new(),
        db_name: "visitmeter_test".to_string(),
        db_max_connections: 5,
    }
}

struct OkStore;

#[async_trait]
impl VisitStore for OkStore {
    async fn record_visit(&self, _visit: &VisitRecord) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn distinct_visitor_count(&self) -> anyhow::Result<i64> {
        Ok(0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct DeadStore;

#[async_trait]
impl VisitStore for DeadStore {
    async fn record_visit(&self, _visit: &VisitRecord) -> anyhow::Result<bool> {
        anyhow::bail!("connection refused")
    }

    async fn distinct_visitor_count(&self) -> anyhow::Result<i64> {
        anyhow::bail!("connection refused")
    }

    async fn ping(&self) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("parse JSON")
}

fn health_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build request")
}

// ============================================================
// Health check returns 200 when the store is reachable
// ============================================================
#[tokio::test]
async fn test_health_returns_200_when_store_reachable() {
    let state = Arc::new(AppState::new(Arc::new(OkStore), test_config()));
    let app = build_app(state);

    let response = app.oneshot(health_request()).await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// ============================================================
// Health check returns 503 when the store is unreachable
// ============================================================
#[tokio::test]
async fn test_health_returns_503_when_store_unreachable() {
    let state = Arc::new(AppState::new(Arc::new(DeadStore), test_config()));
    let app = build_app(state);

    let response = app.oneshot(health_request()).await.expect("request");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = json_body(response).await;
    assert_eq!(json["status"], "degraded");
}
