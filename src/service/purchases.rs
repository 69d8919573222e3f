//! Purchase records. The store stamps `date`; clients only ever change `hours_played`.

use crate::error::AppError;
use crate::models::{Purchase, PurchaseRecord, PURCHASES};
use crate::service::crud::id_param;
use crate::service::{CrudService, RequestValidator};
use crate::sql::{self, Coerce, PURCHASE_RECORD_SELECT};
use crate::store::{settle, Database};
use serde_json::{Map, Value};
use sqlx::Connection;
use std::collections::HashMap;

/// Optional list filters, combined with AND.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub user_id: Option<i64>,
    pub game_id: Option<i64>,
}

impl PurchaseFilter {
    /// Values that are not integers are ignored rather than rejected. Integers beyond
    /// the key range still filter, and simply match nothing.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let int = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());
        PurchaseFilter {
            user_id: int("user_id"),
            game_id: int("game_id"),
        }
    }
}

pub struct PurchaseService;

impl PurchaseService {
    pub async fn create(db: &Database, body: &Map<String, Value>) -> Result<Purchase, AppError> {
        let params = [
            RequestValidator::required(body, "game_id", Coerce::Integer)?,
            RequestValidator::required(body, "user_id", Coerce::Integer)?,
        ];
        let statement = sql::insert(&PURCHASES, &["game_id", "user_id"]);
        let mut conn = db.acquire().await?;
        let mut tx = conn.begin().await?;
        let outcome = CrudService::fetch_optional::<Purchase>(&mut tx, &statement, &params).await;
        settle(tx, outcome)
            .await?
            .ok_or_else(|| AppError::Internal("purchase insert returned no row".into()))
    }

    /// Newest first.
    pub async fn list(db: &Database, filter: PurchaseFilter) -> Result<Vec<PurchaseRecord>, AppError> {
        let q = sql::select_purchases(filter.user_id, filter.game_id);
        let mut conn = db.acquire().await?;
        Ok(CrudService::fetch_all(&mut conn, &q.sql, &q.params).await?)
    }

    pub async fn get(db: &Database, pid: i32) -> Result<Option<PurchaseRecord>, AppError> {
        let mut conn = db.acquire().await?;
        let statement = format!("{} WHERE p.pid = $1", PURCHASE_RECORD_SELECT);
        Ok(CrudService::fetch_optional(&mut conn, &statement, &[id_param(pid)]).await?)
    }

    pub async fn update(db: &Database, pid: i32, body: &Map<String, Value>) -> Result<Option<Purchase>, AppError> {
        CrudService::update(db, &PURCHASES, pid, body).await
    }

    pub async fn delete(db: &Database, pid: i32) -> Result<bool, AppError> {
        CrudService::delete(db, &PURCHASES, pid).await
    }
}
