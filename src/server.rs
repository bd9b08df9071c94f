//! HTTP surface: the issues page plus a JSON view and a health probe.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Result;
use crate::fetcher::IssueFetcher;
use crate::render::render_page;

#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<IssueFetcher>,
    revalidate: Duration,
}

impl AppState {
    pub fn new(fetcher: IssueFetcher, revalidate: Duration) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            revalidate,
        }
    }

    fn cache_control(&self) -> String {
        format!("public, max-age={}", self.revalidate.as_secs())
    }
}

/// Whether an API key is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialStatus {
    Configured,
    Missing,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub credential: CredentialStatus,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(issues_page))
        .route("/issues.json", get(issues_json))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn issues_page(State(state): State<AppState>) -> impl IntoResponse {
    let issues = state.fetcher.fetch_assigned_issues().await;
    let html = render_page(&issues, state.fetcher.has_credential());
    ([(header::CACHE_CONTROL, state.cache_control())], Html(html))
}

async fn issues_json(State(state): State<AppState>) -> impl IntoResponse {
    let issues = state.fetcher.fetch_assigned_issues().await;
    ([(header::CACHE_CONTROL, state.cache_control())], Json(issues))
}

async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let credential = if state.fetcher.has_credential() {
        CredentialStatus::Configured
    } else {
        CredentialStatus::Missing
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        credential,
    })
}

/// Serve until Ctrl+C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::Ordering;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::fetcher::tests::{fetcher, node, MockConnector, MockTracker};

    async fn get_body(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, cache, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn test_app(key: Option<&str>, tracker: MockTracker) -> (Router, Arc<MockConnector>) {
        let connector = MockConnector::new(tracker);
        let state = AppState::new(fetcher(key, connector.clone()), Duration::from_secs(60));
        (router(state), connector)
    }

    #[tokio::test]
    async fn test_page_without_key_shows_setup() {
        let (app, connector) = test_app(None, MockTracker::default());

        let (status, cache, body) = get_body(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=60"));
        assert!(body.contains("Connect to Linear"));
        assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_page_lists_issues() {
        let (app, _) = test_app(
            Some("lin_api_key"),
            MockTracker {
                issues: vec![node(1), node(2)],
                ..MockTracker::default()
            },
        );

        let (status, _, body) = get_body(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<li class=\"issue\">").count(), 2);
        assert!(body.contains("Showing 2 tasks"));
    }

    #[tokio::test]
    async fn test_page_on_upstream_failure_shows_empty_state() {
        let (app, _) = test_app(
            Some("lin_api_key"),
            MockTracker {
                issues: vec![node(1)],
                fail_viewer: true,
                ..MockTracker::default()
            },
        );

        let (status, _, body) = get_body(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No tasks assigned to you."));
    }

    #[tokio::test]
    async fn test_issues_json() {
        let (app, _) = test_app(
            Some("lin_api_key"),
            MockTracker {
                issues: vec![node(3)],
                ..MockTracker::default()
            },
        );

        let (status, cache, body) = get_body(app, "/issues.json").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache.as_deref(), Some("public, max-age=60"));
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["identifier"], "ENG-3");
        assert_eq!(json[0]["createdAt"], "2024-05-03T09:30:00Z");
        assert_eq!(json[0]["team"]["key"], "ENG");
    }

    #[tokio::test]
    async fn test_healthz_reports_credential() {
        let (app, _) = test_app(None, MockTracker::default());
        let (_, _, body) = get_body(app, "/healthz").await;
        let health: HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.credential, CredentialStatus::Missing);

        let (app, _) = test_app(Some("lin_api_key"), MockTracker::default());
        let (_, _, body) = get_body(app, "/healthz").await;
        let health: HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.credential, CredentialStatus::Configured);
    }
}
