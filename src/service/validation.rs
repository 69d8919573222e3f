//! Request body shape checks: key presence and per-column coercion.

use crate::error::AppError;
use crate::sql::{BindValue, Coerce};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Body must be a JSON object.
    pub fn object(value: Value) -> Result<Map<String, Value>, AppError> {
        match value {
            Value::Object(m) => Ok(m),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }

    /// A key that must be present (null counts as present), coerced for its column.
    pub fn required(body: &Map<String, Value>, key: &str, coerce: Coerce) -> Result<BindValue, AppError> {
        let v = body
            .get(key)
            .ok_or_else(|| AppError::BadRequest(format!("missing required field: {}", key)))?;
        coerce.apply(key, v)
    }

    /// A key that falls back to `default` when absent.
    pub fn optional(
        body: &Map<String, Value>,
        key: &str,
        coerce: Coerce,
        default: BindValue,
    ) -> Result<BindValue, AppError> {
        match body.get(key) {
            Some(v) => coerce.apply(key, v),
            None => Ok(default),
        }
    }
}
