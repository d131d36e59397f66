use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::AppState;

/// Payload for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// The task name. Required, at most 30 characters, globally unique.
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    /// Completion flag; defaults to false when omitted.
    pub completed: Option<bool>,
}

/// Payload for updating a task. At least one field must be supplied
/// (enforced by the service). `completed: false` is a real update, distinct
/// from leaving the field out.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 30))]
    pub name: Option<String>,
    pub completed: Option<bool>,
}

/// Create a task owned by the authenticated user.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<CreateTaskRequest>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .task_service()
        .create_task(&task_data.name, task_data.completed, current_user.0.id)
        .await?;

    Ok(HttpResponse::Created().json(json!({ "task": task })))
}

/// Fetch one of the authenticated user's tasks by id.
///
/// Ownership is part of the lookup filter: someone else's task produces the
/// same 404 as a task that does not exist.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .task_service()
        .get_task(path.into_inner(), current_user.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// List all tasks owned by the authenticated user, in insertion order.
#[get("")]
pub async fn get_all_tasks(
    state: web::Data<AppState>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.task_service().get_all_tasks(current_user.0.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Update one of the authenticated user's tasks.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    task_data: web::Json<UpdateTaskRequest>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state
        .task_service()
        .update_task(
            path.into_inner(),
            current_user.0.id,
            task_data.name.as_deref(),
            task_data.completed,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "task": task })))
}

/// Delete one of the authenticated user's tasks.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let message = state
        .task_service()
        .delete_task(path.into_inner(), current_user.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_validation() {
        let valid = CreateTaskRequest {
            name: "Groceries".to_string(),
            completed: None,
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateTaskRequest {
            name: "".to_string(),
            completed: Some(false),
        };
        assert!(empty_name.validate().is_err());

        let long_name = CreateTaskRequest {
            name: "x".repeat(31),
            completed: None,
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_update_task_request_distinguishes_false_from_absent() {
        let with_false: UpdateTaskRequest =
            serde_json::from_value(serde_json::json!({ "completed": false })).unwrap();
        assert_eq!(with_false.completed, Some(false));
        assert!(with_false.name.is_none());

        let absent: UpdateTaskRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(absent.completed.is_none());
    }
}
