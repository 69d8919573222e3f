//! HTTP handlers, one module per resource.

pub mod games;
pub mod purchases;
pub mod users;
pub mod wallets;

use crate::error::AppError;
use axum::http::StatusCode;

/// Ids in paths are unsigned decimal integers; anything else means the route did not match.
pub(crate) fn parse_id(id_str: &str) -> Result<i32, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::http(StatusCode::NOT_FOUND));
    }
    id_str.parse().map_err(|_| AppError::http(StatusCode::NOT_FOUND))
}
