//! Response helpers. Rows go out as bare JSON, not wrapped in an envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// `{"message": "<Label> <id> deleted successfully"}`
pub fn deleted(label: &str, id: i32) -> (StatusCode, Json<Message>) {
    ok(Message {
        message: format!("{} {} deleted successfully", label, id),
    })
}
