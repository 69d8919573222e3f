//! Connection factory and table DDL.
//!
//! `Database::acquire` is the only way handlers get a connection. A failure there is
//! "connection unavailable" (503); anything that fails once a connection is held is a
//! store failure (500).

use crate::config::DbSettings;
use crate::error::AppError;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        uid SERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        passwd TEXT NOT NULL,
        is_publisher BOOLEAN NOT NULL DEFAULT FALSE,
        is_admin BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS wallets (
        uid INTEGER PRIMARY KEY REFERENCES users (uid) ON DELETE CASCADE,
        balance INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS games (
        gid SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT DEFAULT '',
        price INTEGER NOT NULL,
        publisher INTEGER NOT NULL REFERENCES users (uid) ON DELETE CASCADE,
        status TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS purchases (
        pid SERIAL PRIMARY KEY,
        game_id INTEGER NOT NULL REFERENCES games (gid) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users (uid) ON DELETE CASCADE,
        date TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        hours_played INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

/// Bounded, lazily connecting pool. Nothing is dialed until the first request.
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn connect_lazy(settings: &DbSettings) -> Self {
        let opts = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name);
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy_with(opts);
        Database { pool }
    }

    /// Check out a connection; it goes back to the pool when dropped, on every path.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        self.pool.acquire().await.map_err(AppError::Unavailable)
    }

    /// True when a connection can be obtained right now.
    pub async fn ping(&self) -> bool {
        match self.acquire().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = ?e, "database probe failed");
                false
            }
        }
    }

    /// Create the four store tables if they do not exist yet.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;
        for ddl in TABLES_DDL {
            sqlx::query(ddl).execute(&mut *conn).await?;
        }
        tracing::info!("store tables ready");
        Ok(())
    }
}

/// Finish a write transaction: commit when the statement produced a row, roll back
/// when it produced none or failed. A failed rollback is logged; the statement's
/// outcome is still what the caller gets.
pub async fn settle<T>(
    tx: Transaction<'_, Postgres>,
    outcome: Result<Option<T>, sqlx::Error>,
) -> Result<Option<T>, AppError> {
    match outcome {
        Ok(Some(row)) => {
            tx.commit().await?;
            Ok(Some(row))
        }
        Ok(None) => {
            tx.rollback().await?;
            Ok(None)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "error during rollback");
            }
            Err(AppError::Db(e))
        }
    }
}
