//! Router assembly and the response hook that gives framework errors a JSON body.

mod common;
mod resources;

pub use common::common_routes;
pub use resources::resource_routes;

use crate::error::{describe, reason, ErrorBody};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Response, StatusCode},
    middleware,
    response::IntoResponse,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

const BODY_LIMIT: usize = 1024 * 1024;

/// Full application: all routes, JSON 404 fallback, error-body normalization, tracing, body limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes(state))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::map_response(json_error_bodies))
                .layer(DefaultBodyLimit::max(BODY_LIMIT)),
        )
}

async fn not_found() -> crate::error::AppError {
    crate::error::AppError::http(StatusCode::NOT_FOUND)
}

/// Error responses produced by axum itself (405, body rejections, 413) carry plain
/// text or nothing. Rewrite them as `{"error": <reason>, "detail": <text>}`,
/// keeping the status and the Allow header.
async fn json_error_bodies(response: Response<Body>) -> Response<Body> {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let detail = match axum::body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).into_owned(),
        _ => describe(status).to_string(),
    };
    let body = ErrorBody {
        error: reason(status).to_string(),
        detail: Some(detail),
    };
    let mut rewritten = (status, Json(body)).into_response();
    if let Some(allow) = parts.headers.get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}
