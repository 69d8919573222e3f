//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the store tables.
//! Identifiers only ever come from the static `Resource` descriptors; values are always parameters.

use crate::error::AppError;
use crate::models::Resource;
use crate::sql::BindValue;
use serde_json::{Map, Value};

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Games with the publisher's email.
pub const GAME_LISTING_SELECT: &str = "SELECT g.gid, g.name, g.description, g.price, g.publisher, \
     u.email AS publisher_email, g.status \
     FROM games g JOIN users u ON g.publisher = u.uid";

/// Purchases with the game's name and the buyer's email.
pub const PURCHASE_RECORD_SELECT: &str = "SELECT p.pid, p.game_id, g.name AS game_name, p.user_id, \
     u.email AS user_email, p.date, p.hours_played \
     FROM purchases p \
     JOIN games g ON p.game_id = g.gid \
     JOIN users u ON p.user_id = u.uid";

/// SELECT all rows ORDER BY pk.
pub fn select_all(resource: &Resource) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        resource.returning, resource.table, resource.pk
    )
}

/// SELECT by primary key. Caller binds the id as $1.
pub fn select_by_id(resource: &Resource) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        resource.returning, resource.table, resource.pk
    )
}

/// INSERT of `columns` with one placeholder each, returning the resource's columns.
pub fn insert(resource: &Resource, columns: &[&str]) -> String {
    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        resource.table,
        columns.join(", "),
        placeholders.join(", "),
        resource.returning
    )
}

/// UPDATE by id: SET only whitelisted columns present in body, in whitelist order.
/// Values are coerced per column; the id is always the last parameter.
/// Fails with BadRequest when no whitelisted key is present.
pub fn update(resource: &Resource, id: i32, body: &Map<String, Value>) -> Result<QueryBuf, AppError> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (column, coerce) in resource.updatable {
        let Some(v) = body.get(*column) else { continue };
        let param_num = q.push_param(coerce.apply(column, v)?);
        sets.push(format!("{} = ${}", column, param_num));
    }
    if sets.is_empty() {
        let allowed: Vec<&str> = resource.updatable.iter().map(|(c, _)| *c).collect();
        return Err(AppError::BadRequest(format!(
            "No updatable fields provided (expected any of: {})",
            allowed.join(", ")
        )));
    }
    let id_param = q.push_param(BindValue::Int(id.into()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        resource.table,
        sets.join(", "),
        resource.pk,
        id_param,
        resource.returning
    );
    Ok(q)
}

/// DELETE by id, returning the key. Caller binds the id as $1.
pub fn delete(resource: &Resource) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        resource.table, resource.pk, resource.pk
    )
}

/// Purchase records filtered by buyer and/or game (AND), newest first.
pub fn select_purchases(user_id: Option<i64>, game_id: Option<i64>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    if let Some(uid) = user_id {
        let n = q.push_param(BindValue::Int(uid));
        where_parts.push(format!("p.user_id = ${}", n));
    }
    if let Some(gid) = game_id {
        let n = q.push_param(BindValue::Int(gid));
        where_parts.push(format!("p.game_id = ${}", n));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!("{}{} ORDER BY p.date DESC", PURCHASE_RECORD_SELECT, where_clause);
    q
}
