//! Admin user-directory handlers: list, fetch, delete, and the atomic
//! upsert behind the dashboard form.
//!
//! `email` is the natural key on this surface; the internal ObjectId never
//! appears in the JSON responses.

use axum::{
    extract::{Path, State},
    Json,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::db::{Db, User, UserResponse};
use crate::AppState;

/// List all users (GET /admin/users)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let db = state.db()?;
    let users = fetch_users(db).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch a single user by email (GET /admin/users/:email)
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let db = state.db()?;

    let user = db
        .users()
        .find_one(doc! { "email": &email })
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete all users matching an email (DELETE /admin/users/:email)
///
/// The unique index keeps the match count at one in practice, but the
/// contract is "delete everything with this email and report whether at
/// least one record was removed".
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let db = state.db()?;

    let result = db.users().delete_many(doc! { "email": &email }).await?;
    if result.deleted_count == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(json!({ "message": "User deleted successfully!" })))
}

/// Whether an upsert overwrote an existing record or created a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Added,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Added => "added",
            UpsertOutcome::Updated => "updated",
        }
    }
}

/// Atomically update-or-insert a user keyed by email.
///
/// A single find-one-and-update with upsert; the pre-image tells added and
/// updated apart without a separate read.
pub(crate) async fn upsert_user(db: &Db, user: &User) -> Result<UpsertOutcome, ApiError> {
    let previous = db
        .users()
        .find_one_and_update(doc! { "email": &user.email }, upsert_update(user))
        .upsert(true)
        .return_document(ReturnDocument::Before)
        .await?;

    Ok(if previous.is_some() {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Added
    })
}

pub(crate) fn upsert_update(user: &User) -> Document {
    doc! {
        "$set": {
            "name": &user.name,
            "email": &user.email,
            "phone_number": user.phone_number,
        }
    }
}

pub(crate) async fn fetch_users(db: &Db) -> Result<Vec<User>, ApiError> {
    let users = db
        .users()
        .find(Document::new())
        .await?
        .try_collect()
        .await?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_update_sets_exactly_the_three_fields() {
        let user = User {
            id: None,
            name: "Ann".to_string(),
            phone_number: 9876543210,
            email: "ann@x.com".to_string(),
        };

        let update = upsert_update(&user);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get_str("name").unwrap(), "Ann");
        assert_eq!(set.get_str("email").unwrap(), "ann@x.com");
        assert_eq!(set.get_i64("phone_number").unwrap(), 9876543210);
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn test_upsert_outcome_strings() {
        assert_eq!(UpsertOutcome::Added.as_str(), "added");
        assert_eq!(UpsertOutcome::Updated.as_str(), "updated");
    }
}
