//! Store rows as returned to clients, and the per-table descriptors the SQL builder works from.

use crate::sql::Coerce;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Static description of one table: its key, what a write returns, and which
/// columns a partial update may touch (in the order they are emitted).
#[derive(Debug)]
pub struct Resource {
    /// Singular label used in messages, e.g. "User not found".
    pub label: &'static str,
    pub table: &'static str,
    pub pk: &'static str,
    pub returning: &'static str,
    pub updatable: &'static [(&'static str, Coerce)],
}

pub const USERS: Resource = Resource {
    label: "User",
    table: "users",
    pk: "uid",
    returning: "uid, email, is_publisher, is_admin",
    updatable: &[
        ("email", Coerce::Text),
        ("passwd", Coerce::Text),
        ("is_publisher", Coerce::Boolean),
        ("is_admin", Coerce::Boolean),
    ],
};

pub const WALLETS: Resource = Resource {
    label: "Wallet",
    table: "wallets",
    pk: "uid",
    returning: "uid, balance",
    updatable: &[("balance", Coerce::Integer)],
};

pub const GAMES: Resource = Resource {
    label: "Game",
    table: "games",
    pk: "gid",
    returning: "gid, name, description, price, publisher, status",
    updatable: &[
        ("name", Coerce::Text),
        ("description", Coerce::Text),
        ("price", Coerce::Integer),
        ("status", Coerce::Text),
    ],
};

pub const PURCHASES: Resource = Resource {
    label: "Purchase",
    table: "purchases",
    pk: "pid",
    returning: "pid, game_id, user_id, date, hours_played",
    updatable: &[("hours_played", Coerce::Integer)],
};

/// A user account. The password is write-only and never selected.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct User {
    pub uid: i32,
    pub email: String,
    pub is_publisher: bool,
    pub is_admin: bool,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Wallet {
    pub uid: i32,
    pub balance: i32,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Game {
    pub gid: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub publisher: i32,
    pub status: String,
}

/// Game joined with its publisher's email.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct GameListing {
    pub gid: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: i32,
    pub publisher: i32,
    pub publisher_email: String,
    pub status: String,
}

#[derive(Clone, Debug, Serialize, FromRow)]
pub struct Purchase {
    pub pid: i32,
    pub game_id: i32,
    pub user_id: i32,
    pub date: NaiveDateTime,
    pub hours_played: i32,
}

/// Purchase joined with the game's name and the buyer's email.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct PurchaseRecord {
    pub pid: i32,
    pub game_id: i32,
    pub game_name: String,
    pub user_id: i32,
    pub user_email: String,
    pub date: NaiveDateTime,
    pub hours_played: i32,
}
