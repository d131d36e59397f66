use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{NewTask, NewUser, Task, User, UserRecord};
use crate::store::{StoreError, TaskStore, UserStore};

/// An in-memory store implementing both `UserStore` and `TaskStore`.
///
/// Backs the integration tests (no database required) and is handy for local
/// development. It mirrors the Postgres schema's behavior: unique user emails,
/// globally unique task names, and insertion-ordered listings.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserRecord>>,
    tasks: Mutex<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_users(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserRecord>>, StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::Backend("user store mutex poisoned".into()))
    }

    fn lock_tasks(&self) -> Result<std::sync::MutexGuard<'_, Vec<Task>>, StoreError> {
        self.tasks
            .lock()
            .map_err(|_| StoreError::Backend("task store mutex poisoned".into()))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.lock_users()?;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(record.clone());
        Ok(record.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.lock_users()?;
        Ok(users.iter().find(|u| u.id == id).cloned().map(User::from))
    }

    async fn find_record_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let users = self.lock_users()?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_record_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.lock_users()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.lock_users()?;

        if let Some(new_email) = email {
            if users.iter().any(|u| u.email == new_email && u.id != id) {
                return Err(StoreError::Duplicate { field: "email" });
            }
        }

        match users.iter_mut().find(|u| u.id == id) {
            Some(record) => {
                if let Some(name) = name {
                    record.name = name.to_string();
                }
                if let Some(email) = email {
                    record.email = email.to_string();
                }
                record.updated_at = Utc::now();
                Ok(Some(record.clone().into()))
            }
            None => Ok(None),
        }
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let mut users = self.lock_users()?;
        match users.iter_mut().find(|u| u.id == id) {
            Some(record) => {
                record.password_hash = password_hash.to_string();
                record.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.lock_users()?;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert(&self, new_task: NewTask) -> Result<Task, StoreError> {
        let mut tasks = self.lock_tasks()?;
        // Task names are unique across all owners, matching the global index.
        if tasks.iter().any(|t| t.name == new_task.name) {
            return Err(StoreError::Duplicate { field: "name" });
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            name: new_task.name,
            completed: new_task.completed,
            user_id: new_task.user_id,
            created_at: now,
            updated_at: now,
        };
        tasks.push(task.clone());
        Ok(task)
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<Task>, StoreError> {
        let tasks = self.lock_tasks()?;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == owner)
            .cloned())
    }

    async fn list_owned(&self, owner: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = self.lock_tasks()?;
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect())
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner: Uuid,
        name: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.lock_tasks()?;

        if let Some(new_name) = name {
            if tasks.iter().any(|t| t.name == new_name && t.id != id) {
                return Err(StoreError::Duplicate { field: "name" });
            }
        }

        match tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        {
            Some(task) => {
                if let Some(name) = name {
                    task.name = name.to_string();
                }
                if let Some(completed) = completed {
                    task.completed = completed;
                }
                task.updated_at = Utc::now();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, id: Uuid, owner: Uuid) -> Result<bool, StoreError> {
        let mut tasks = self.lock_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == owner));
        Ok(tasks.len() < before)
    }
}
