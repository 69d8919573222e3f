//! /purchases handlers.

use crate::error::AppError;
use crate::handlers::parse_id;
use crate::models::PURCHASES;
use crate::response::{created, deleted, ok};
use crate::service::{PurchaseFilter, PurchaseService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::object(body)?;
    let purchase = PurchaseService::create(&state.db, &body).await?;
    tracing::info!(pid = purchase.pid, game_id = purchase.game_id, user_id = purchase.user_id, "purchase recorded");
    Ok(created(purchase))
}

/// GET /purchases?user_id=&game_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = PurchaseFilter::from_query(&params);
    Ok(ok(PurchaseService::list(&state.db, filter).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pid = parse_id(&id_str)?;
    let purchase = PurchaseService::get(&state.db, pid)
        .await?
        .ok_or(AppError::NotFound(PURCHASES.label))?;
    Ok(ok(purchase))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let pid = parse_id(&id_str)?;
    let body = RequestValidator::object(body)?;
    let purchase = PurchaseService::update(&state.db, pid, &body)
        .await?
        .ok_or(AppError::NotFound(PURCHASES.label))?;
    Ok(ok(purchase))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let pid = parse_id(&id_str)?;
    if !PurchaseService::delete(&state.db, pid).await? {
        return Err(AppError::NotFound(PURCHASES.label));
    }
    Ok(deleted(PURCHASES.label, pid))
}
