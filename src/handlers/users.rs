//! /users handlers.

use crate::error::AppError;
use crate::handlers::parse_id;
use crate::models::USERS;
use crate::response::{created, deleted, ok};
use crate::service::{RequestValidator, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::object(body)?;
    let user = UserService::create(&state.db, &body).await?;
    Ok(created(user))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(UserService::list(&state.db).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let uid = parse_id(&id_str)?;
    let user = UserService::get(&state.db, uid)
        .await?
        .ok_or(AppError::NotFound(USERS.label))?;
    Ok(ok(user))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let uid = parse_id(&id_str)?;
    let body = RequestValidator::object(body)?;
    let user = UserService::update(&state.db, uid, &body)
        .await?
        .ok_or(AppError::NotFound(USERS.label))?;
    Ok(ok(user))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let uid = parse_id(&id_str)?;
    if !UserService::delete(&state.db, uid).await? {
        return Err(AppError::NotFound(USERS.label));
    }
    tracing::info!(uid, "user deleted");
    Ok(deleted(USERS.label, uid))
}
