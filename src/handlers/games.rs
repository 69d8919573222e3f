//! /games handlers.

use crate::error::AppError;
use crate::handlers::parse_id;
use crate::models::GAMES;
use crate::response::{created, deleted, ok};
use crate::service::{GameService, RequestValidator};
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
    let game = GameService::create(&state.db, &body).await?;
    tracing::info!(gid = game.gid, publisher = game.publisher, "game created");
    Ok(created(game))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(GameService::list(&state.db).await?))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let gid = parse_id(&id_str)?;
    let game = GameService::get(&state.db, gid)
        .await?
        .ok_or(AppError::NotFound(GAMES.label))?;
    Ok(ok(game))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let gid = parse_id(&id_str)?;
    let body = RequestValidator::object(body)?;
    let game = GameService::update(&state.db, gid, &body)
        .await?
        .ok_or(AppError::NotFound(GAMES.label))?;
    Ok(ok(game))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let gid = parse_id(&id_str)?;
    if !GameService::delete(&state.db, gid).await? {
        return Err(AppError::NotFound(GAMES.label));
    }
    Ok(deleted(GAMES.label, gid))
}
