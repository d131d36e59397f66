//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! the error conditions that can occur, from store failures to validation problems.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application
//! errors into HTTP responses with JSON bodies. `From` implementations for
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, `bcrypt::BcryptError`
//! and `store::StoreError` allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a distinct failure kind and carries a message
/// detailing the issue. The kinds stay distinguishable internally even where
/// they end up sharing an HTTP status.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// Missing, malformed or expired bearer token (HTTP 401).
    Unauthorized(String),
    /// Login or password-change attempt with a wrong password (HTTP 401).
    InvalidCredentials(String),
    /// Requested entity absent, or an ownership filter missed (HTTP 404).
    NotFound(String),
    /// A unique-constraint violation, naming the offending field (HTTP 409).
    DuplicateField(String),
    /// Failed input validation: missing, mistyped or out-of-bounds field (HTTP 400).
    Validation(String),
    /// An error originating from the persistence layer (HTTP 500).
    Database(String),
    /// Any other unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "Invalid Credentials: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DuplicateField(field) => {
                write!(f, "Duplicate value entered for {} field", field)
            }
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation lets Actix Web translate `AppError` results from handlers
/// into the correct HTTP status codes and JSON error bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::InvalidCredentials(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::DuplicateField(field) => HttpResponse::Conflict().json(json!({
                "error": format!("Duplicate value entered for {} field. Please enter another value", field)
            })),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            // Store errors are presented as generic internal server errors to the client.
            AppError::Database(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `StoreError` into `AppError`.
///
/// The store's duplicate-key signal becomes `AppError::DuplicateField` naming the
/// field; everything else becomes `AppError::Database`.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        match error {
            StoreError::Duplicate { field } => AppError::DuplicateField(field.to_string()),
            StoreError::Backend(msg) => AppError::Database(msg),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the detailed per-field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// Used when JWT verification fails; the jsonwebtoken error kind stays in the
/// message so expired and bad-signature tokens remain distinguishable.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// Covers failures during password hashing or verification. A wrong password is
/// not an error at this level; it surfaces as `Ok(false)` from verify.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::InvalidCredentials("Wrong credentials provided".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::NotFound("Task not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::DuplicateField("email".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::Validation("name is too long".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::Internal("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_store_error_conversion() {
        let err: AppError = StoreError::Duplicate { field: "name" }.into();
        assert_eq!(err, AppError::DuplicateField("name".into()));

        let err: AppError = StoreError::Backend("connection reset".into()).into();
        assert_eq!(err, AppError::Database("connection reset".into()));
    }
}
