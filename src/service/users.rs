//! User accounts. Every user owns exactly one wallet, created with it.

use crate::error::AppError;
use crate::models::{User, USERS};
use crate::service::{CrudService, RequestValidator};
use crate::sql::{self, BindValue, Coerce};
use crate::store::{settle, Database};
use serde_json::{Map, Value};
use sqlx::{Connection, PgConnection};

pub struct UserService;

impl UserService {
    /// Insert the user and a zero-balance wallet in one transaction.
    pub async fn create(db: &Database, body: &Map<String, Value>) -> Result<User, AppError> {
        let params = [
            RequestValidator::required(body, "email", Coerce::Text)?,
            RequestValidator::required(body, "passwd", Coerce::Text)?,
            RequestValidator::optional(body, "is_publisher", Coerce::Boolean, BindValue::Bool(false))?,
            RequestValidator::optional(body, "is_admin", Coerce::Boolean, BindValue::Bool(false))?,
        ];
        let mut conn = db.acquire().await?;
        let mut tx = conn.begin().await?;
        let outcome = insert_with_wallet(&mut tx, &params).await;
        let user = settle(tx, outcome.map(Some))
            .await?
            .ok_or_else(|| AppError::Internal("user insert returned no row".into()))?;
        tracing::info!(uid = user.uid, "user created");
        Ok(user)
    }

    pub async fn list(db: &Database) -> Result<Vec<User>, AppError> {
        CrudService::list(db, &USERS).await
    }

    pub async fn get(db: &Database, uid: i32) -> Result<Option<User>, AppError> {
        CrudService::read(db, &USERS, uid).await
    }

    pub async fn update(db: &Database, uid: i32, body: &Map<String, Value>) -> Result<Option<User>, AppError> {
        CrudService::update(db, &USERS, uid, body).await
    }

    /// The wallet and anything the user published or bought go with it (ON DELETE CASCADE).
    pub async fn delete(db: &Database, uid: i32) -> Result<bool, AppError> {
        CrudService::delete(db, &USERS, uid).await
    }
}

async fn insert_with_wallet(conn: &mut PgConnection, params: &[BindValue]) -> Result<User, sqlx::Error> {
    let statement = sql::insert(&USERS, &["email", "passwd", "is_publisher", "is_admin"]);
    let user: User = CrudService::fetch_optional(&mut *conn, &statement, params)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;
    sqlx::query("INSERT INTO wallets (uid, balance) VALUES ($1, 0)")
        .bind(user.uid)
        .execute(&mut *conn)
        .await?;
    Ok(user)
}
