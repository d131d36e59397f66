//!
//! # Persistence Layer
//!
//! The services talk to storage through the `UserStore` and `TaskStore` traits
//! rather than to a concrete database, so the backing store can be swapped out
//! (Postgres in production, the in-memory store in tests and local development).
//!
//! Uniqueness of user emails and task names is enforced here, by the store's
//! own index. The traits surface a violation as `StoreError::Duplicate` naming
//! the field, which the service layer translates into its duplicate-field error.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, User, UserRecord};

pub use memory::MemoryStore;
pub use postgres::{PgTaskStore, PgUserStore};

/// Errors produced by a store implementation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A unique index rejected the write. `field` names the offending column.
    #[error("duplicate value for unique field {field}")]
    Duplicate { field: &'static str },

    /// Any other backend failure (connection loss, malformed row, ...).
    #[error("{0}")]
    Backend(String),
}

/// Storage operations over user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user, assigning id and timestamps.
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Looks up a user by id, returning the hashless projection.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Looks up the full record (including the password hash) by id.
    async fn find_record_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Looks up the full record (including the password hash) by email.
    async fn find_record_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Applies the supplied profile fields; `None` leaves a field untouched.
    /// Returns `None` when no user with `id` exists.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    /// Replaces the stored password hash. Returns false when `id` is unknown.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str)
        -> Result<bool, StoreError>;

    /// Hard-deletes the user. Returns false when `id` is unknown.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Storage operations over task records.
///
/// Every read and write is scoped by `(id, owner)` in the query itself, so a
/// task owned by someone else behaves exactly like a missing task.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Inserts a new task, assigning id and timestamps.
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError>;

    /// Fetches the task matching both `id` and `owner`.
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, StoreError>;

    /// Lists every task owned by `owner`, in stored (insertion) order.
    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Task>, StoreError>;

    /// Applies the supplied fields to the task matching `(id, owner)`;
    /// `None` leaves a field untouched. Returns `None` on an ownership miss.
    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        name: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Task>, StoreError>;

    /// Hard-deletes the task matching `(id, owner)`. Returns false on a miss.
    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError>;
}
