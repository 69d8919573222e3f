//! /wallets handlers. A wallet is addressed by its owner's uid.

use crate::error::AppError;
use crate::handlers::parse_id;
use crate::models::WALLETS;
use crate::response::ok;
use crate::service::{RequestValidator, WalletService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let uid = parse_id(&id_str)?;
    let wallet = WalletService::get(&state.db, uid)
        .await?
        .ok_or(AppError::NotFound(WALLETS.label))?;
    Ok(ok(wallet))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let uid = parse_id(&id_str)?;
    let body = RequestValidator::object(body)?;
    let wallet = WalletService::update(&state.db, uid, &body)
        .await?
        .ok_or(AppError::NotFound(WALLETS.label))?;
    Ok(ok(wallet))
}
