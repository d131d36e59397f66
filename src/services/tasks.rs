use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{NewTask, Task};
use crate::store::TaskStore;

/// Ownership-scoped CRUD over tasks.
///
/// Every operation carries the owner's id alongside the task id, and the
/// store applies both in the same filter, so a non-owner gets the same
/// `NotFound` as a missing task and can never learn that it exists.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Creates a task for `owner`. `completed` defaults to false when unset.
    /// Task names are globally unique; a clash surfaces as
    /// `AppError::DuplicateField("name")`.
    pub async fn create_task(
        &self,
        name: &str,
        completed: Option<bool>,
        owner: Uuid,
    ) -> Result<Task, AppError> {
        let task = self
            .store
            .insert(NewTask {
                name: name.to_string(),
                completed: completed.unwrap_or(false),
                user_id: owner,
            })
            .await?;
        Ok(task)
    }

    pub async fn get_task(&self, id: Uuid, owner: Uuid) -> Result<Task, AppError> {
        self.store
            .find_owned(id, owner)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn get_all_tasks(&self, owner: Uuid) -> Result<Vec<Task>, AppError> {
        Ok(self.store.list_owned(owner).await?)
    }

    /// Applies the supplied fields. At least one of `name`/`completed` must be
    /// given. An explicit `completed: false` is honored; absence means "leave
    /// unchanged".
    pub async fn update_task(
        &self,
        id: Uuid,
        owner: Uuid,
        name: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Task, AppError> {
        if name.is_none() && completed.is_none() {
            return Err(AppError::Validation("Please provide updated values".into()));
        }

        self.store
            .update_owned(id, owner, name, completed)
            .await?
            .ok_or_else(|| AppError::NotFound("Task does not exist".into()))
    }

    pub async fn delete_task(&self, id: Uuid, owner: Uuid) -> Result<String, AppError> {
        if self.store.delete_owned(id, owner).await? {
            Ok("Task deleted successfully".into())
        } else {
            Err(AppError::NotFound("Task does not exist".into()))
        }
    }
}
