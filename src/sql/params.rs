//! Convert serde_json::Value to types that sqlx can bind.

use crate::error::AppError;
use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::postgres::{PgTypeInfo, Postgres};
use sqlx::{Database, Type};

/// A value that can be bound to a PostgreSQL query. Reports its own wire type,
/// so one statement can mix integers, booleans and text.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

/// How a JSON request value is turned into a bind value for a given column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coerce {
    Text,
    Integer,
    Boolean,
}

impl Coerce {
    pub fn apply(self, column: &str, v: &Value) -> Result<BindValue, AppError> {
        let bad = || AppError::BadRequest(format!("invalid value for {}: {}", column, v));
        match self {
            Coerce::Integer => match v {
                Value::Number(n) => n
                    .as_i64()
                    .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                    .map(BindValue::Int)
                    .ok_or_else(bad),
                Value::String(s) => s.trim().parse::<i64>().map(BindValue::Int).map_err(|_| bad()),
                Value::Bool(b) => Ok(BindValue::Int(*b as i64)),
                _ => Err(bad()),
            },
            Coerce::Boolean => match v {
                Value::Bool(b) => Ok(BindValue::Bool(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(BindValue::Bool(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(BindValue::Bool(false)),
                _ => Err(bad()),
            },
            Coerce::Text => match v {
                Value::Null => Ok(BindValue::Null),
                Value::String(s) => Ok(BindValue::Text(s.clone())),
                Value::Number(n) => Ok(BindValue::Text(n.to_string())),
                Value::Bool(b) => Ok(BindValue::Text(b.to_string())),
                Value::Array(_) | Value::Object(_) => Err(bad()),
            },
        }
    }
}

impl<'q> Encode<'q, Postgres> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            BindValue::Null => Ok(IsNull::Yes),
            BindValue::Bool(b) => <bool as Encode<Postgres>>::encode_by_ref(b, buf),
            BindValue::Int(n) => <i64 as Encode<Postgres>>::encode_by_ref(n, buf),
            BindValue::Text(s) => <&str as Encode<Postgres>>::encode_by_ref(&s.as_str(), buf),
        }
    }

    fn produces(&self) -> Option<PgTypeInfo> {
        Some(match self {
            BindValue::Bool(_) => <bool as Type<Postgres>>::type_info(),
            BindValue::Int(_) => <i64 as Type<Postgres>>::type_info(),
            BindValue::Null | BindValue::Text(_) => <&str as Type<Postgres>>::type_info(),
        })
    }
}

impl Type<Postgres> for BindValue {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }
}
