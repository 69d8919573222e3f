//! Game store REST backend: users, wallets, games and purchases over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DbSettings, Settings};
pub use error::{AppError, ConfigError};
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::Database;
