//! Statement execution shared by every resource service.

use crate::error::AppError;
use crate::models::Resource;
use crate::sql::{self, BindValue};
use crate::store::{settle, Database};
use sqlx::postgres::PgRow;
use sqlx::{Connection, FromRow, PgConnection};

pub struct CrudService;

impl CrudService {
    /// Run a partial UPDATE built from `body` in its own transaction. The statement is
    /// built before a connection is taken, so a body with nothing to update never reaches the store.
    pub async fn update<T>(
        db: &Database,
        resource: &Resource,
        id: i32,
        body: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let q = sql::update(resource, id, body)?;
        let mut conn = db.acquire().await?;
        let mut tx = conn.begin().await?;
        let outcome = Self::fetch_optional(&mut tx, &q.sql, &q.params).await;
        settle(tx, outcome).await
    }

    /// Delete one row by id. Returns false when no row had that id.
    pub async fn delete(db: &Database, resource: &Resource, id: i32) -> Result<bool, AppError> {
        let statement = sql::delete(resource);
        let mut conn = db.acquire().await?;
        let mut tx = conn.begin().await?;
        tracing::debug!(sql = %statement, "query (tx)");
        let outcome = sqlx::query_scalar::<_, i32>(&statement)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await;
        Ok(settle(tx, outcome).await?.is_some())
    }

    /// Fetch one row by primary key.
    pub async fn read<T>(db: &Database, resource: &Resource, id: i32) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = db.acquire().await?;
        let row = Self::fetch_optional(&mut conn, &sql::select_by_id(resource), &[id_param(id)]).await?;
        Ok(row)
    }

    /// Every row of the table ordered by primary key.
    pub async fn list<T>(db: &Database, resource: &Resource) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let mut conn = db.acquire().await?;
        let rows = Self::fetch_all(&mut conn, &sql::select_all(resource), &[]).await?;
        Ok(rows)
    }

    pub async fn fetch_optional<T>(
        conn: &mut PgConnection,
        sql: &str,
        params: &[BindValue],
    ) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = params.len(), "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        query.fetch_optional(conn).await
    }

    pub async fn fetch_all<T>(
        conn: &mut PgConnection,
        sql: &str,
        params: &[BindValue],
    ) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = params.len(), "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        query.fetch_all(conn).await
    }
}

pub(crate) fn id_param(id: i32) -> BindValue {
    BindValue::Int(id.into())
}
