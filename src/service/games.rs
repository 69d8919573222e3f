//! Game listings, always shown with the publisher's email.

use crate::error::AppError;
use crate::models::{Game, GameListing, GAMES};
use crate::service::crud::id_param;
use crate::service::{CrudService, RequestValidator};
use crate::sql::{self, BindValue, Coerce, GAME_LISTING_SELECT};
use crate::store::{settle, Database};
use serde_json::{Map, Value};
use sqlx::Connection;

pub struct GameService;

impl GameService {
    /// Insert a game. `publisher` must name an existing user or the store rejects it.
    pub async fn create(db: &Database, body: &Map<String, Value>) -> Result<Game, AppError> {
        let params = [
            RequestValidator::required(body, "name", Coerce::Text)?,
            RequestValidator::optional(body, "description", Coerce::Text, BindValue::Text(String::new()))?,
            RequestValidator::required(body, "price", Coerce::Integer)?,
            RequestValidator::required(body, "publisher", Coerce::Integer)?,
            RequestValidator::required(body, "status", Coerce::Text)?,
        ];
        let statement = sql::insert(&GAMES, &["name", "description", "price", "publisher", "status"]);
        let mut conn = db.acquire().await?;
        let mut tx = conn.begin().await?;
        let outcome = CrudService::fetch_optional::<Game>(&mut tx, &statement, &params).await;
        settle(tx, outcome)
            .await?
            .ok_or_else(|| AppError::Internal("game insert returned no row".into()))
    }

    pub async fn list(db: &Database) -> Result<Vec<GameListing>, AppError> {
        let mut conn = db.acquire().await?;
        let statement = format!("{} ORDER BY g.gid", GAME_LISTING_SELECT);
        Ok(CrudService::fetch_all(&mut conn, &statement, &[]).await?)
    }

    pub async fn get(db: &Database, gid: i32) -> Result<Option<GameListing>, AppError> {
        let mut conn = db.acquire().await?;
        let statement = format!("{} WHERE g.gid = $1", GAME_LISTING_SELECT);
        Ok(CrudService::fetch_optional(&mut conn, &statement, &[id_param(gid)]).await?)
    }

    pub async fn update(db: &Database, gid: i32, body: &Map<String, Value>) -> Result<Option<Game>, AppError> {
        CrudService::update(db, &GAMES, gid, body).await
    }

    pub async fn delete(db: &Database, gid: i32) -> Result<bool, AppError> {
        CrudService::delete(db, &GAMES, gid).await
    }
}
