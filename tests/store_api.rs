//! End-to-end behavior against a real PostgreSQL. Runs only when DB_HOST is set
//! (DB_PORT, DB_USER, DB_PASSWORD, DB_NAME as for the server); otherwise each test returns early.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gamestore::{app, AppState, Database, Settings};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

const MISSING_ID: i32 = i32::MAX;

async fn setup() -> Option<(Router, Database)> {
    dotenvy::dotenv().ok();
    if std::env::var("DB_HOST").is_err() {
        eprintln!("DB_HOST not set; skipping store test");
        return None;
    }
    let settings = Settings::from_env().expect("valid DB_* settings");
    let db = Database::connect_lazy(&settings.database);
    db.ensure_tables().await.expect("store reachable");
    Some((app(AppState { db: db.clone() }), db))
}

fn unique_email(tag: &str) -> String {
    static SEQ: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{}-{}-{}@example.test", tag, nanos, SEQ.fetch_add(1, Ordering::Relaxed))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn new_user(app: &Router, tag: &str, publisher: bool) -> Value {
    let (status, user) = call(
        app,
        Method::POST,
        "/users",
        Some(json!({"email": unique_email(tag), "passwd": "secret", "is_publisher": publisher})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    user
}

/// Rows tied to one user in users, wallets, games and purchases.
async fn owned_rows(db: &Database, uid: i64) -> (i64, i64, i64, i64) {
    let mut conn = db.acquire().await.unwrap();
    sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM users WHERE uid = $1), \
                (SELECT COUNT(*) FROM wallets WHERE uid = $1), \
                (SELECT COUNT(*) FROM games WHERE publisher = $1), \
                (SELECT COUNT(*) FROM purchases WHERE user_id = $1)",
    )
    .bind(uid as i32)
    .fetch_one(&mut *conn)
    .await
    .unwrap()
}

async fn new_game(app: &Router, publisher: i64, price: Value) -> Value {
    let (status, game) = call(
        app,
        Method::POST,
        "/games",
        Some(json!({"name": "Chess", "price": price, "publisher": publisher, "status": "active"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    game
}

#[tokio::test]
async fn creating_a_user_creates_an_empty_wallet() {
    let Some((app, _)) = setup().await else { return };
    let user = new_user(&app, "wallet", false).await;
    assert!(user.get("passwd").is_none());
    assert_eq!(user["is_admin"], false);

    let uid = user["uid"].as_i64().unwrap();
    let (status, wallet) = call(&app, Method::GET, &format!("/wallets/{}", uid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wallet, json!({"uid": uid, "balance": 0}));
}

#[tokio::test]
async fn duplicate_email_is_a_store_failure_and_leaves_no_wallet_behind() {
    let Some((app, db)) = setup().await else { return };
    let email = unique_email("dup");
    let body = json!({"email": email, "passwd": "x"});
    let (status, _) = call(&app, Method::POST, "/users", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = call(&app, Method::POST, "/users", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Database error");
    assert!(err["detail"].as_str().unwrap().contains("duplicate key"));

    let orphans: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM wallets w LEFT JOIN users u ON u.uid = w.uid WHERE u.uid IS NULL",
    )
    .fetch_one(&mut *db.acquire().await.unwrap())
    .await
    .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn game_round_trip_coerces_price_and_joins_publisher() {
    let Some((app, _)) = setup().await else { return };
    let publisher = new_user(&app, "publisher", true).await;
    let uid = publisher["uid"].as_i64().unwrap();
    let game = new_game(&app, uid, json!("500")).await;
    assert_eq!(game["description"], "");

    let (status, fetched) = call(&app, Method::GET, &format!("/games/{}", game["gid"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], 500);
    assert_eq!(fetched["publisher_email"], publisher["email"]);
    assert_eq!(fetched["status"], "active");

    let (status, all) = call(&app, Method::GET, "/games", None).await;
    assert_eq!(status, StatusCode::OK);
    let gids: Vec<i64> = all.as_array().unwrap().iter().map(|g| g["gid"].as_i64().unwrap()).collect();
    assert!(gids.windows(2).all(|w| w[0] < w[1]));
    assert!(gids.contains(&game["gid"].as_i64().unwrap()));
}

#[tokio::test]
async fn game_update_ignores_unknown_fields() {
    let Some((app, _)) = setup().await else { return };
    let publisher = new_user(&app, "upd", true).await;
    let game = new_game(&app, publisher["uid"].as_i64().unwrap(), json!(100)).await;

    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/games/{}", game["gid"]),
        Some(json!({"price": "750", "unknown_field": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 750);
    assert_eq!(updated["name"], game["name"]);
    assert_eq!(updated["status"], game["status"]);
    assert!(updated.get("unknown_field").is_none());
}

#[tokio::test]
async fn wallet_accepts_negative_balance() {
    let Some((app, _)) = setup().await else { return };
    let user = new_user(&app, "debt", false).await;
    let uri = format!("/wallets/{}", user["uid"]);
    let (status, wallet) = call(&app, Method::PUT, &uri, Some(json!({"balance": "-250"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wallet["balance"], -250);
}

#[tokio::test]
async fn missing_ids_are_not_found_and_change_nothing() {
    let Some((app, db)) = setup().await else { return };
    let user = new_user(&app, "missing", true).await;
    let uid = user["uid"].as_i64().unwrap();
    let game = new_game(&app, uid, json!(10)).await;
    let (status, _) = call(
        &app,
        Method::POST,
        "/purchases",
        Some(json!({"game_id": game["gid"], "user_id": uid})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let before = owned_rows(&db, uid).await;
    assert_eq!(before, (1, 1, 1, 1));

    for (uri, body) in [
        (format!("/users/{}", MISSING_ID), json!({"email": "nobody@example.test"})),
        (format!("/wallets/{}", MISSING_ID), json!({"balance": 5})),
        (format!("/games/{}", MISSING_ID), json!({"price": 5})),
        (format!("/purchases/{}", MISSING_ID), json!({"hours_played": 5})),
    ] {
        let (status, err) = call(&app, Method::PUT, &uri, Some(body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {}", uri);
        assert!(err["error"].as_str().unwrap().ends_with("not found"));
    }
    for uri in [
        format!("/users/{}", MISSING_ID),
        format!("/games/{}", MISSING_ID),
        format!("/purchases/{}", MISSING_ID),
    ] {
        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }

    assert_eq!(owned_rows(&db, uid).await, before);
    let (_, still) = call(&app, Method::GET, &format!("/games/{}", game["gid"]), None).await;
    assert_eq!(still["price"], 10);
    let (_, still) = call(&app, Method::GET, &format!("/users/{}", uid), None).await;
    assert_eq!(still["email"], user["email"]);
}

#[tokio::test]
async fn purchases_filter_and_order_newest_first() {
    let Some((app, _)) = setup().await else { return };
    let publisher = new_user(&app, "pub", true).await;
    let buyer = new_user(&app, "buyer", false).await;
    let other = new_user(&app, "other", false).await;
    let p_uid = publisher["uid"].as_i64().unwrap();
    let chess = new_game(&app, p_uid, json!(5)).await;
    let go = new_game(&app, p_uid, json!(7)).await;

    let mut created = Vec::new();
    for (user, game) in [(&buyer, &chess), (&buyer, &go), (&other, &chess), (&buyer, &chess)] {
        let (status, p) = call(
            &app,
            Method::POST,
            "/purchases",
            Some(json!({"game_id": game["gid"], "user_id": user["uid"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(p["hours_played"], 0);
        assert!(p["date"].is_string());
        created.push(p["pid"].as_i64().unwrap());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let (status, rows) = call(
        &app,
        Method::GET,
        &format!("/purchases?user_id={}&game_id={}", buyer["uid"], chess["gid"]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let pids: Vec<i64> = rows.as_array().unwrap().iter().map(|r| r["pid"].as_i64().unwrap()).collect();
    assert_eq!(pids, vec![created[3], created[0]]);
    for row in rows.as_array().unwrap() {
        assert_eq!(row["game_name"], "Chess");
        assert_eq!(row["user_email"], buyer["email"]);
    }

    let (status, none) = call(&app, Method::GET, "/purchases?user_id=99999999999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));

    let (_, all) = call(&app, Method::GET, "/purchases", None).await;
    let dates: Vec<String> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap().to_string())
        .collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn purchase_hours_update_and_delete() {
    let Some((app, _)) = setup().await else { return };
    let user = new_user(&app, "player", true).await;
    let uid = user["uid"].as_i64().unwrap();
    let game = new_game(&app, uid, json!(1)).await;
    let (_, purchase) = call(
        &app,
        Method::POST,
        "/purchases",
        Some(json!({"game_id": game["gid"], "user_id": uid})),
    )
    .await;
    let uri = format!("/purchases/{}", purchase["pid"]);

    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({"hours_played": 12.0}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["hours_played"], 12);
    assert_eq!(updated["date"], purchase["date"]);

    let (status, msg) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg["message"], format!("Purchase {} deleted successfully", purchase["pid"]));
    let (status, _) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_removes_the_wallet() {
    let Some((app, _)) = setup().await else { return };
    let user = new_user(&app, "leaving", false).await;
    let (status, msg) = call(&app, Method::DELETE, &format!("/users/{}", user["uid"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(msg["message"], format!("User {} deleted successfully", user["uid"]));
    let (status, err) = call(&app, Method::GET, &format!("/wallets/{}", user["uid"]), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err, json!({"error": "Wallet not found"}));
}

#[tokio::test]
async fn game_for_unknown_publisher_is_a_store_failure() {
    let Some((app, _)) = setup().await else { return };
    let (status, err) = call(
        &app,
        Method::POST,
        "/games",
        Some(json!({"name": "Ghost", "price": 1, "publisher": MISSING_ID, "status": "draft"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Database error");
}

#[tokio::test]
async fn user_update_coerces_booleans_and_hides_password() {
    let Some((app, _)) = setup().await else { return };
    let user = new_user(&app, "promote", false).await;
    let email = unique_email("promoted");
    let (status, updated) = call(
        &app,
        Method::PUT,
        &format!("/users/{}", user["uid"]),
        Some(json!({"is_admin": "true", "passwd": "rotated", "email": email, "nickname": "ignored"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"uid": user["uid"], "email": email, "is_publisher": false, "is_admin": true})
    );

    let (_, fetched) = call(&app, Method::GET, &format!("/users/{}", user["uid"]), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn users_are_listed_by_id() {
    let Some((app, _)) = setup().await else { return };
    let first = new_user(&app, "first", false).await;
    let second = new_user(&app, "second", true).await;

    let (status, all) = call(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    let uids: Vec<i64> = all.as_array().unwrap().iter().map(|u| u["uid"].as_i64().unwrap()).collect();
    assert!(uids.windows(2).all(|w| w[0] < w[1]));
    let pos = |u: &Value| uids.iter().position(|&id| id == u["uid"].as_i64().unwrap()).unwrap();
    assert!(pos(&first) < pos(&second));
    assert!(all.as_array().unwrap().iter().all(|u| u.get("passwd").is_none()));
}

#[tokio::test]
async fn game_description_can_be_cleared() {
    let Some((app, _)) = setup().await else { return };
    let publisher = new_user(&app, "clear", true).await;
    let game = new_game(&app, publisher["uid"].as_i64().unwrap(), json!(3)).await;
    let uri = format!("/games/{}", game["gid"]);

    let (status, updated) = call(&app, Method::PUT, &uri, Some(json!({"description": null, "status": "retired"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["status"], "retired");

    let (_, fetched) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["description"], Value::Null);
    assert_eq!(fetched["price"], 3);
}
