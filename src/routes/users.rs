use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::AppState;

/// Payload for a profile update. Both fields are optional, but the service
/// rejects a request that supplies neither.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 30))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Payload for a password change.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[serde(rename = "currentPassword")]
    #[validate(length(min = 8))]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Register a new user.
///
/// Creates the account with role "user" and immediately issues a token
/// (auto-login on registration).
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let response = state
        .user_service()
        .register(
            &register_data.name,
            &register_data.email,
            &register_data.password,
            "user",
        )
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// Login an existing user.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let response = state
        .user_service()
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Fetch a user by id. The password hash is never part of the projection.
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user = state.user_service().get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Update a user's name and/or email.
#[put("/updateUser/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    update_data: web::Json<UpdateUserRequest>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;

    let user = state
        .user_service()
        .update_user(
            path.into_inner(),
            update_data.name.as_deref(),
            update_data.email.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "user": user })))
}

/// Change a user's password after verifying the current one.
#[put("/updatePassword/{id}")]
pub async fn update_password(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    update_data: web::Json<UpdatePasswordRequest>,
) -> Result<impl Responder, AppError> {
    update_data.validate()?;

    let message = state
        .user_service()
        .update_password(
            path.into_inner(),
            &update_data.current_password,
            &update_data.new_password,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

/// Delete a user account (hard delete, no task cascade).
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let message = state.user_service().delete_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_request_validation() {
        let valid = UpdateUserRequest {
            name: Some("New Name".to_string()),
            email: None,
        };
        assert!(valid.validate().is_ok());

        let both_absent = UpdateUserRequest {
            name: None,
            email: None,
        };
        // Presence of at least one field is a service-level rule, not a
        // schema rule; the DTO alone accepts it.
        assert!(both_absent.validate().is_ok());

        let bad_email = UpdateUserRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        };
        assert!(bad_email.validate().is_err());

        let long_name = UpdateUserRequest {
            name: Some("x".repeat(31)),
            email: None,
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_update_password_request_validation() {
        let valid = UpdatePasswordRequest {
            current_password: "password123".to_string(),
            new_password: "password456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_new = UpdatePasswordRequest {
            current_password: "password123".to_string(),
            new_password: "short".to_string(),
        };
        assert!(short_new.validate().is_err());
    }

    #[test]
    fn test_update_password_wire_names() {
        let parsed: UpdatePasswordRequest = serde_json::from_value(serde_json::json!({
            "currentPassword": "password123",
            "newPassword": "password456"
        }))
        .unwrap();
        assert_eq!(parsed.current_password, "password123");
        assert_eq!(parsed.new_password, "password456");
    }
}
