//! Store resource routes: users, wallets, games, purchases.

use crate::handlers::{games, purchases, users, wallets};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:uid",
            get(users::read).put(users::update).delete(users::delete),
        )
        .route("/wallets/:uid", get(wallets::read).put(wallets::update))
        .route("/games", get(games::list).post(games::create))
        .route(
            "/games/:gid",
            get(games::read).put(games::update).delete(games::delete),
        )
        .route("/purchases", get(purchases::list).post(purchases::create))
        .route(
            "/purchases/:pid",
            get(purchases::read)
                .put(purchases::update)
                .delete(purchases::delete),
        )
        .with_state(state)
}
