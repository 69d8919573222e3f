//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Every failure a request can end in. `IntoResponse` below is the one place
/// where these become status codes and bodies.
#[derive(Error, Debug)]
pub enum AppError {
    /// No connection could be obtained from the store.
    #[error("Could not connect to the database.")]
    Unavailable(#[source] sqlx::Error),
    /// The store rejected or failed a statement on a live connection.
    #[error(transparent)]
    Db(#[from] sqlx::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    /// Framework-level failure (unknown route, wrong method) passed through as-is.
    #[error("{detail}")]
    Http { status: StatusCode, detail: String },
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
        }
    }

    /// Routing failure with the stock description for `status`.
    pub fn http(status: StatusCode) -> Self {
        AppError::Http {
            status,
            detail: describe(status).to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                ErrorBody {
                    error: "Database error".into(),
                    detail: Some(db_message(e)),
                }
            }
            AppError::Unavailable(source) => {
                tracing::error!(error = %source, "database connection error");
                ErrorBody {
                    error: "Database connection failed".into(),
                    detail: Some(self.to_string()),
                }
            }
            AppError::NotFound(_) => ErrorBody {
                error: self.to_string(),
                detail: None,
            },
            AppError::BadRequest(msg) | AppError::Http { detail: msg, .. } => ErrorBody {
                error: reason(status).into(),
                detail: Some(msg.clone()),
            },
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "unexpected error");
                ErrorBody {
                    error: "Internal Server Error".into(),
                    detail: Some("An unexpected error occurred.".into()),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// The store's own message when there is one, without sqlx's prefix.
fn db_message(e: &sqlx::Error) -> String {
    match e {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}

pub fn reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Error")
}

pub fn describe(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "The browser (or proxy) sent a request that this server could not understand.",
        404 => "The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again.",
        405 => "The method is not allowed for the requested URL.",
        413 => "The data value transmitted exceeds the capacity limit.",
        415 => "The server does not support the media type transmitted in the request.",
        422 => "The request was well-formed but was unable to be followed due to semantic errors.",
        500..=599 => "The server encountered an internal error and was unable to complete your request.",
        _ => "The request could not be completed.",
    }
}
