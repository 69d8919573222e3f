//! Wallets are created with their user; here they are only read and rebalanced.

use crate::error::AppError;
use crate::models::{Wallet, WALLETS};
use crate::service::CrudService;
use crate::store::Database;
use serde_json::{Map, Value};

pub struct WalletService;

impl WalletService {
    pub async fn get(db: &Database, uid: i32) -> Result<Option<Wallet>, AppError> {
        CrudService::read(db, &WALLETS, uid).await
    }

    /// Sets `balance` as given (coerced to an integer). Negative balances are stored as-is.
    pub async fn update(db: &Database, uid: i32, body: &Map<String, Value>) -> Result<Option<Wallet>, AppError> {
        CrudService::update(db, &WALLETS, uid, body).await
    }
}
