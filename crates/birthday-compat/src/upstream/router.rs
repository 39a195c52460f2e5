use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::gateway::UpstreamGateway;
use super::UpstreamError;

const PREVIEW_CHARS: usize = 400;

/// Router builder exposing the allow-listed proxy and the geocoder.
pub fn upstream_router(gateway: Arc<UpstreamGateway>) -> Router {
    Router::new()
        .route("/api/proxy", get(proxy_handler))
        .route("/api/geocode", get(geocode_handler))
        .with_state(gateway)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProxyQuery {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    debug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GeocodeQuery {
    #[serde(default)]
    q: Option<String>,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn proxy_handler(
    State(gateway): State<Arc<UpstreamGateway>>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let url = query.url.unwrap_or_default();
    if url.is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "missing url");
    }
    let debug = query.debug.as_deref() == Some("1");

    match gateway.fetch_text(&url).await {
        Ok(upstream) => {
            let preview: String = upstream.body.chars().take(PREVIEW_CHARS).collect();
            info!(
                status = upstream.status,
                url = %url,
                preview = %preview.replace('\n', " "),
                "proxied upstream call"
            );

            if debug {
                let payload = json!({
                    "proxied_url": url,
                    "status": upstream.status,
                    "preview": preview,
                });
                return (StatusCode::OK, axum::Json(payload)).into_response();
            }

            let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(CONTENT_TYPE, "text/plain; charset=utf-8")],
                upstream.body,
            )
                .into_response()
        }
        Err(UpstreamError::Disallowed { .. }) => {
            let payload = json!({
                "error": "url must start with an allowed upstream prefix",
                "allowed": gateway.allow_list().prefixes(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(other) => {
            warn!(url = %url, error = %other, "proxy call failed");
            let payload = json!({
                "error": "proxy failed",
                "detail": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn geocode_handler(
    State(gateway): State<Arc<UpstreamGateway>>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    let q = query.q.unwrap_or_default();
    let q = q.trim();
    if q.is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "missing query q");
    }

    match gateway.geocode(q).await {
        Ok(hit) => (StatusCode::OK, axum::Json(hit)).into_response(),
        Err(UpstreamError::NotFound { .. }) => error_body(StatusCode::NOT_FOUND, "place not found"),
        Err(UpstreamError::Status { status }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            error_body(status, "geocode upstream error")
        }
        Err(other) => {
            warn!(query = q, error = %other, "geocode failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "geocode error")
        }
    }
}
