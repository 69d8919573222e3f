//! Common routes: status page, health, version.

use crate::state::AppState;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Game Store API</title>
</head>
<body>
  <h1>Game Store API</h1>
  <p>Database status: <strong>{db_status}</strong></p>
  <ul>
    <li><code>/users</code></li>
    <li><code>/wallets/&lt;uid&gt;</code></li>
    <li><code>/games</code></li>
    <li><code>/purchases</code></li>
  </ul>
</body>
</html>
"#;

/// GET / probes the store and reports whether a connection could be made.
async fn index(State(state): State<AppState>) -> Html<String> {
    let db_status = if state.db.ping().await {
        "Connected"
    } else {
        "Connection Failed"
    };
    Html(INDEX_TEMPLATE.replace("{db_status}", db_status))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, GET /health, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
}
