use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, User, UserRecord};
use crate::store::{StoreError, TaskStore, UserStore};

/// Maps an sqlx failure to a `StoreError`.
///
/// Unique-index violations (SQLSTATE 23505) are translated to
/// `StoreError::Duplicate` with the field derived from the constraint name;
/// everything else becomes a backend error.
fn map_sqlx_error(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = error {
        if db_err.code().as_deref() == Some("23505") {
            let field = match db_err.constraint() {
                Some("users_email_key") => "email",
                Some("tasks_name_key") => "name",
                _ => "unique",
            };
            return StoreError::Duplicate { field };
        }
    }
    StoreError::Backend(error.to_string())
}

/// `UserStore` backed by a Postgres `users` table (see migrations/0001_init.sql).
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING id, name, email, role, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.role)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_record_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_record_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, role, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "UPDATE users \
             SET name = COALESCE($2, name), email = COALESCE($3, email), updated_at = $4 \
             WHERE id = $1 \
             RETURNING id, name, email, role, created_at, updated_at",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// `TaskStore` backed by a Postgres `tasks` table.
///
/// Ownership is enforced inside the SQL: every statement filters on both
/// `id` and `user_id`, so a non-owner can neither see nor touch a task.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, name, completed, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING id, name, completed, user_id, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_task.name)
        .bind(new_task.completed)
        .bind(new_task.user_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            "SELECT id, name, completed, user_id, created_at, updated_at \
             FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            "SELECT id, name, completed, user_id, created_at, updated_at \
             FROM tasks WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        name: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Task>, StoreError> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks \
             SET name = COALESCE($3, name), completed = COALESCE($4, completed), updated_at = $5 \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id, name, completed, user_id, created_at, updated_at",
        )
        .bind(id)
        .bind(owner)
        .bind(name)
        .bind(completed)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
