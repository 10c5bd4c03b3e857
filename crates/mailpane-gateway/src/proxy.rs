//! Pass-through proxy routes.
//!
//! Each handler forwards its request to the backend's identically-shaped
//! endpoint, preserving method, query parameters, body, and response
//! status. The only logic here is URL construction; payloads are relayed
//! as raw bytes, unvalidated and untransformed.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Shared state for the proxy handlers.
#[derive(Debug, Clone)]
pub struct ProxyState {
    http: reqwest::Client,
    backend: String,
}

impl ProxyState {
    /// Creates proxy state targeting a backend base URL.
    #[must_use]
    pub fn new(backend_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend: backend_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Builds the gateway router.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/emails", get(list_emails).post(create_email))
        .route(
            "/emails/{id}",
            get(get_email).put(update_email).delete(delete_email),
        )
        .with_state(state)
}

/// Query parameters of the list route, forwarded selectively: `tab` always
/// (defaulting to `all`), `q` only when non-empty.
#[derive(Debug, Deserialize, Default)]
struct ListParams {
    tab: Option<String>,
    q: Option<String>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_emails(
    State(state): State<ProxyState>,
    Query(params): Query<ListParams>,
) -> Response {
    let tab = params.tab.unwrap_or_else(|| "all".to_string());
    let mut request = state
        .http
        .get(format!("{}/emails", state.backend))
        .query(&[("tab", tab.as_str())]);
    if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
        request = request.query(&[("q", q)]);
    }
    forward(request.send().await).await
}

async fn get_email(State(state): State<ProxyState>, Path(id): Path<i64>) -> Response {
    let request = state.http.get(format!("{}/emails/{id}", state.backend));
    forward(request.send().await).await
}

async fn update_email(
    State(state): State<ProxyState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Response {
    let request = state
        .http
        .put(format!("{}/emails/{id}", state.backend))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    forward(request.send().await).await
}

async fn create_email(State(state): State<ProxyState>, body: Bytes) -> Response {
    let request = state
        .http
        .post(format!("{}/emails", state.backend))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    forward(request.send().await).await
}

async fn delete_email(State(state): State<ProxyState>, Path(id): Path<i64>) -> Response {
    let request = state.http.delete(format!("{}/emails/{id}", state.backend));
    forward(request.send().await).await
}

/// Relays the backend response verbatim: its status code and its body.
/// A transport failure toward the backend surfaces as 502.
async fn forward(result: reqwest::Result<reqwest::Response>) -> Response {
    match result {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            match upstream.bytes().await {
                Ok(body) if body.is_empty() => status.into_response(),
                Ok(body) => {
                    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
                }
                Err(error) => bad_gateway(&error),
            }
        }
        Err(error) => bad_gateway(&error),
    }
}

fn bad_gateway(error: &reqwest::Error) -> Response {
    warn!("Backend request failed: {error}");
    StatusCode::BAD_GATEWAY.into_response()
}
