//! User directory models and DTOs.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A directory entry as stored in the `Users` collection.
///
/// `email` is the natural key: the admin API looks up, upserts and deletes
/// by it, and a unique index keeps at most one document per address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone_number: i64,
    pub email: String,
}

/// Admin API projection of a user. The internal id never leaves the service
/// on this surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub phone_number: i64,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            phone_number: user.phone_number,
            email: user.email,
        }
    }
}

/// A user submission as it arrives from the admin dashboard form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_excludes_internal_id() {
        let user = User {
            id: Some(ObjectId::new()),
            name: "Ann".to_string(),
            phone_number: 9876543210,
            email: "ann@x.com".to_string(),
        };
        let response = UserResponse::from(user);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("_id").is_none());
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["phone_number"], 9876543210i64);
        assert_eq!(json["email"], "ann@x.com");
    }
}
