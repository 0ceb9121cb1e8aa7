//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - catalog endpoints under `/api/v1/levels/:level/...`
/// - session endpoints under `/api/v1/sessions/:id/:level/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers); adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // Catalog
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/levels/:level/tasks", get(http::http_list_tasks))
        .route("/api/v1/levels/:level/tasks/:name", get(http::http_get_task))
        .route("/api/v1/levels/:level/toolkit", get(http::http_get_toolkit))
        // Sessions
        .route("/api/v1/sessions", post(http::http_create_session))
        .route("/api/v1/sessions/:id", axum::routing::delete(http::http_delete_session))
        .route("/api/v1/sessions/:id/:level/task", post(http::http_select_task))
        .route(
            "/api/v1/sessions/:id/:level/draft",
            axum::routing::put(http::http_put_draft).delete(http::http_delete_draft),
        )
        .route("/api/v1/sessions/:id/:level/draft/stats", get(http::http_get_draft_stats))
        .route(
            "/api/v1/sessions/:id/:level/chat",
            post(http::http_post_chat).delete(http::http_delete_chat),
        )
        .route("/api/v1/sessions/:id/:level/chat/quick", post(http::http_post_quick_question))
        .route("/api/v1/sessions/:id/:level/chat/export", get(http::http_export_chat))
        .route(
            "/api/v1/sessions/:id/:level/brainstorm",
            post(http::http_post_brainstorm).delete(http::http_delete_brainstorm),
        )
        .route(
            "/api/v1/sessions/:id/:level/goals",
            post(http::http_post_goal).delete(http::http_delete_goals),
        )
        .route("/api/v1/sessions/:id/:level/assessment", post(http::http_post_assessment))
        .route("/api/v1/sessions/:id/:level/encouragement", get(http::http_get_encouragement))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::catalog::Catalog;
    use crate::config::MentorConfig;
    use crate::dialogue::testing::{service_with, ScriptedEndpoint};
    use crate::protocol::SessionOut;

    fn app_with_state(reply: &str) -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::with_parts(
            Catalog::builtin(),
            service_with(ScriptedEndpoint::replying(reply)),
            &MentorConfig::default(),
        ));
        (build_router(state.clone()), state)
    }

    fn app(reply: &str) -> Router {
        app_with_state(reply).0
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call(app, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let out: SessionOut = serde_json::from_slice(&body).unwrap();
        out.session_id.to_string()
    }

    #[tokio::test]
    async fn catalog_lookups() {
        let app = app("x");
        let (status, body) = call(&app, Method::GET, "/api/v1/levels/intermediate/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["tasks"].as_array().unwrap().len(), 4);

        let (status, body) = call(&app, Method::GET, "/api/v1/levels/beginner/tasks/%EC%9E%90%EA%B8%B0%EC%86%8C%EA%B0%9C", None).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["kind"], "fill-blanks");
        assert!(v.get("genreGuide").is_none());

        let (_, body) = call(&app, Method::GET, "/api/v1/levels/advanced/tasks/%EB%B9%84%ED%8C%90%EC%A0%81%20%EB%A6%AC%EB%B7%B0", None).await;
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["kind"], "critical-review");
        assert_eq!(v["genreGuide"].as_array().unwrap().len(), 4);

        let (status, body) = call(&app, Method::GET, "/api/v1/levels/beginner/tasks/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert!(v["error"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn chat_round_trip_and_export() {
        let app = app("Try: Hello! My name is...");
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/beginner");

        let (status, body) = call(&app, Method::POST, &format!("{base}/chat"), Some(json!({ "text": "How do I start?" }))).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["transcript"].as_array().unwrap().len(), 2);
        assert_eq!(v["exchange"]["assistant"]["role"], "assistant");
        assert_eq!(v["exchange"]["fallback"], false);

        let (status, body) = call(&app, Method::POST, &format!("{base}/chat"), Some(json!({ "text": "   " }))).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert!(v["exchange"].is_null());
        assert_eq!(v["transcript"].as_array().unwrap().len(), 2);

        let (status, body) = call(&app, Method::GET, &format!("{base}/chat/export"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "user: How do I start?\nassistant: Try: Hello! My name is..."
        );

        let (status, _) = call(&app, Method::DELETE, &format!("{base}/chat"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, body) = call(&app, Method::GET, &format!("{base}/chat/export"), None).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let app = app("x");
        let uri = format!("/api/v1/sessions/{}/advanced/chat", uuid::Uuid::new_v4());
        let (status, _) = call(&app, Method::POST, &uri, Some(json!({ "text": "hi" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_input_is_bad_request() {
        let app = app("x");
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/advanced");

        let (status, _) = call(&app, Method::GET, &format!("{base}/draft/stats"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::POST, &format!("{base}/goals"), Some(json!({ "goal": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let scores = json!({ "content": [5, 5, 5, 5], "organization": [6, 5, 5, 5], "language": [5, 5, 5, 5] });
        let (status, _) = call(&app, Method::POST, &format!("{base}/assessment"), Some(scores)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::POST, &format!("{base}/brainstorm"), Some(json!({ "method": "Outline" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn draft_and_stats() {
        let app = app("x");
        let sid = new_session(&app).await;
        let base = format!("/api/v1/sessions/{sid}/intermediate");

        let (status, _) = call(&app, Method::PUT, &format!("{base}/draft"), Some(json!({ "text": "My dream is to be a chef." }))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = call(&app, Method::GET, &format!("{base}/draft/stats"), None).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["words"], 7);

        call(&app, Method::DELETE, &format!("{base}/draft"), None).await;
        let (status, _) = call(&app, Method::GET, &format!("{base}/draft/stats"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleted_sessions_are_freed() {
        let (app, state) = app_with_state("x");
        let mut sids = Vec::new();
        for _ in 0..20 {
            sids.push(new_session(&app).await);
        }
        assert_eq!(state.session_count().await, 20);

        for sid in &sids {
            let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/sessions/{sid}"), None).await;
            assert_eq!(status, StatusCode::NO_CONTENT);
        }
        assert_eq!(state.session_count().await, 0);

        let (status, _) = call(&app, Method::DELETE, &format!("/api/v1/sessions/{}", sids[0]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, Method::GET, &format!("/api/v1/sessions/{}/beginner/chat/export", sids[0]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let (app, state) = app_with_state("x");
        let idle = new_session(&app).await;
        assert_eq!(state.session_count().await, 1);

        let later = std::time::Instant::now() + state.session_idle + std::time::Duration::from_secs(1);
        assert_eq!(state.sweep_idle(later).await, 1);

        let (status, _) = call(&app, Method::GET, &format!("/api/v1/sessions/{idle}/advanced/encouragement"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(state.session_count().await, 0);
    }
}
