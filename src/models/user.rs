use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user as returned by the API: the read-path projection.
///
/// The password hash is deliberately not part of this type, so it can never
/// leak through serialization. Code that needs the hash (login, password
/// change) goes through [`UserRecord`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A full user row including the stored password hash.
///
/// Never serialized; only the store and the user service touch it.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            role: record.role,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Fields needed to insert a new user. The id and timestamps are assigned by
/// the store; the password arrives here already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_projection_drops_hash() {
        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        };

        let user: User = record.clone().into();
        assert_eq!(user.id, record.id);
        assert_eq!(user.email, record.email);

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));
    }
}
