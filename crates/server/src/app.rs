//! Routes: `GET /scotch/{author}` plus static files.

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as RoutePath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use quill_core::error::DEFAULT_STATUS;
use quill_core::{Envelope, ProfileConfig, ProfileRecord, Transport, fetch_author_profile};
use tokio::runtime::Handle;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct AppState<T> {
    transport: Arc<T>,
    config: Arc<ProfileConfig>,
}

impl<T> AppState<T> {
    pub fn new(transport: T, config: ProfileConfig) -> Self {
        Self { transport: Arc::new(transport), config: Arc::new(config) }
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), config: Arc::clone(&self.config) }
    }
}

/// Builds the application router.
///
/// Anything that is not a profile route is served from `public_dir`.
pub fn router<T>(state: AppState<T>, public_dir: &Path) -> Router
where
    T: Transport + Send + Sync + 'static,
{
    Router::new()
        .route("/scotch/{author}", get(author_profile::<T>))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn author_profile<T>(State(state): State<AppState<T>>, RoutePath(author): RoutePath<String>) -> Response
where
    T: Transport + Send + Sync + 'static,
{
    let envelope = profile_envelope(state, author).await;
    let status = StatusCode::from_u16(envelope.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(envelope)).into_response()
}

/// Parsed documents are not `Send`, so extraction runs to completion on a
/// blocking thread.
async fn profile_envelope<T>(state: AppState<T>, author: String) -> Envelope<ProfileRecord>
where
    T: Transport + Send + Sync + 'static,
{
    let handle = Handle::current();
    let task = tokio::task::spawn_blocking(move || {
        handle.block_on(fetch_author_profile(state.transport.as_ref(), &state.config, &author))
    });

    match task.await {
        Ok(result) => {
            if let Err(err) = &result {
                tracing::warn!(error = %err, status = err.status(), "profile request failed");
            }
            Envelope::from_result(result)
        }
        Err(err) => {
            tracing::error!(error = %err, "profile task did not complete");
            Envelope::failure(DEFAULT_STATUS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use quill_core::QuillError;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const PROFILE: &str = include_str!("../../../tests/fixtures/profile.html");

    struct Pages(HashMap<String, String>);

    impl Transport for Pages {
        async fn get(&self, url: &str) -> quill_core::Result<String> {
            self.0
                .get(url)
                .cloned()
                .ok_or_else(|| QuillError::Fetch { status: 404, url: url.to_string() })
        }
    }

    struct Unavailable;

    impl Transport for Unavailable {
        async fn get(&self, url: &str) -> quill_core::Result<String> {
            Err(QuillError::Fetch { status: 503, url: url.to_string() })
        }
    }

    fn app<T: Transport + Send + Sync + 'static>(transport: T, public: &Path) -> Router {
        router(AppState::new(transport, ProfileConfig::default()), public)
    }

    fn pages() -> Pages {
        Pages(HashMap::from([("https://scotch.io/@chris".to_string(), PROFILE.to_string())]))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_profile_route() {
        let public = TempDir::new().unwrap();
        let (status, json) = get_json(app(pages(), public.path()), "/scotch/Chris").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["author"], "Chris Sev");
        assert_eq!(
            json["data"]["posts"][0],
            json!({
                "title": "Intro to X",
                "image": "https://cdn.scotch.io/posts/x.png",
                "url": "https://scotch.io/tutorials/x",
                "views": 1024,
                "comments": 12
            })
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_unknown_author_is_not_found() {
        let public = TempDir::new().unwrap();
        let (status, json) = get_json(app(pages(), public.path()), "/scotch/nobody").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json, json!({"status": "failure", "code": 404, "message": "Not found."}));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_upstream_failure_status_passes_through() {
        let public = TempDir::new().unwrap();
        let (status, json) = get_json(app(Unavailable, public.path()), "/scotch/chris").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["code"], 503);
        assert_eq!(json["message"], "Request failed.");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_static_files() {
        let public = TempDir::new().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>Quill</h1>").unwrap();

        let response = app(pages(), public.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<h1>Quill</h1>");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_static_file() {
        let public = TempDir::new().unwrap();

        let response = app(pages(), public.path())
            .oneshot(Request::builder().uri("/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
