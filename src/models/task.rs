use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a task entity as stored in the database and returned by the API.
///
/// Task names are unique across all users (a global unique index, not
/// per-owner), and every read or write of a task is filtered by both `id`
/// and `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier for the task (UUID v4, store-assigned).
    pub id: Uuid,
    /// The name of the task. At most 30 characters, globally unique.
    pub name: String,
    /// Whether the task has been completed. Defaults to false.
    pub completed: bool,
    /// Identifier of the user who owns the task.
    #[serde(rename = "userID")]
    pub user_id: Uuid,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a new task; id and timestamps are store-assigned.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub name: String,
    pub completed: bool,
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_owner_as_user_id() {
        let now = Utc::now();
        let owner = Uuid::new_v4();
        let task = Task {
            id: Uuid::new_v4(),
            name: "Groceries".to_string(),
            completed: false,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["userID"], serde_json::json!(owner));
        assert_eq!(json["completed"], serde_json::json!(false));
    }
}
