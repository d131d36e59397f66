use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, AuthResponse, TokenService};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// User credential lifecycle: registration, login, profile reads and updates,
/// password changes and account deletion.
///
/// Takes its store and token service as explicit constructor arguments so
/// tests can substitute the in-memory store.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Creates a user with a hashed password and logs them straight in,
    /// returning a freshly issued token. A duplicate email surfaces as
    /// `AppError::DuplicateField("email")`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<AuthResponse, AppError> {
        let password_hash = hash_password(password)?;

        let user = self
            .store
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
                role: role.to_string(),
            })
            .await?;

        let token = self.tokens.issue(user.id)?;
        Ok(AuthResponse {
            user_token: token,
            user_id: user.id,
        })
    }

    /// Authenticates an email/password pair. An unknown email is `NotFound`;
    /// a failed password check is `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let record = self
            .store
            .find_record_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No user with email: {}", email)))?;

        if verify_password(password, &record.password_hash)? {
            let token = self.tokens.issue(record.id)?;
            Ok(AuthResponse {
                user_token: token,
                user_id: record.id,
            })
        } else {
            Err(AppError::InvalidCredentials(
                "Wrong credentials provided".into(),
            ))
        }
    }

    /// Fetches a user by id. The password hash never leaves the store here.
    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Applies the supplied profile fields. At least one of `name`/`email`
    /// must be given.
    pub async fn update_user(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        if name.is_none() && email.is_none() {
            return Err(AppError::Validation("Missing update field(s)".into()));
        }

        self.store
            .update_profile(id, name, email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Replaces the stored password after verifying the current one.
    ///
    /// Previously issued tokens stay valid until they expire; verification is
    /// stateless and there is no revocation list.
    pub async fn update_password(
        &self,
        id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, AppError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AppError::Validation(
                "Please provide current password and new password".into(),
            ));
        }

        let record = self
            .store
            .find_record_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        if !verify_password(current_password, &record.password_hash)? {
            return Err(AppError::InvalidCredentials("Password is incorrect".into()));
        }

        let new_hash = hash_password(new_password)?;
        if !self.store.update_password_hash(id, &new_hash).await? {
            return Err(AppError::NotFound("User not found".into()));
        }

        Ok("Password has been updated".into())
    }

    /// Hard-deletes the account. The user's tasks are left in place; they are
    /// unreachable through the API since every task read filters by owner.
    pub async fn delete_user(&self, id: Uuid) -> Result<String, AppError> {
        if self.store.delete(id).await? {
            Ok("User deleted".into())
        } else {
            Err(AppError::NotFound("User not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn service() -> UserService {
        UserService::new(
            Arc::new(MemoryStore::new()),
            TokenService::new("unit-test-secret", 24),
        )
    }

    #[actix_rt::test]
    async fn test_register_duplicate_email() {
        let users = service();
        let first = users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();
        assert!(!first.user_token.is_empty());

        let err = users
            .register("Ada Again", "ada@example.com", "password456", "user")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::DuplicateField("email".into()));
    }

    #[actix_rt::test]
    async fn test_register_token_resolves_to_user() {
        let users = service();
        let tokens = TokenService::new("unit-test-secret", 24);
        let response = users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();

        let claims = tokens.verify(&response.user_token).unwrap();
        assert_eq!(claims.sub, response.user_id);
    }

    #[actix_rt::test]
    async fn test_login_wrong_password() {
        let users = service();
        users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();

        let err = users.login("ada@example.com", "nope-nope-nope").await.unwrap_err();
        assert_eq!(
            err,
            AppError::InvalidCredentials("Wrong credentials provided".into())
        );

        let err = users.login("ghost@example.com", "password123").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let ok = users.login("ada@example.com", "password123").await.unwrap();
        assert!(!ok.user_token.is_empty());
    }

    #[actix_rt::test]
    async fn test_update_user_requires_a_field() {
        let users = service();
        let registered = users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();

        let err = users
            .update_user(registered.user_id, None, None)
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Validation("Missing update field(s)".into()));

        let updated = users
            .update_user(registered.user_id, Some("Countess"), None)
            .await
            .unwrap();
        assert_eq!(updated.name, "Countess");
        assert_eq!(updated.email, "ada@example.com");
    }

    #[actix_rt::test]
    async fn test_update_password_wrong_current_leaves_hash() {
        let users = service();
        let registered = users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();

        let err = users
            .update_password(registered.user_id, "wrong-current", "newpassword1")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AppError::InvalidCredentials("Password is incorrect".into())
        );

        // The old password must still verify.
        users.login("ada@example.com", "password123").await.unwrap();

        let message = users
            .update_password(registered.user_id, "password123", "newpassword1")
            .await
            .unwrap();
        assert_eq!(message, "Password has been updated");

        users.login("ada@example.com", "newpassword1").await.unwrap();
        let err = users.login("ada@example.com", "password123").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials(_)));
    }

    #[actix_rt::test]
    async fn test_delete_user() {
        let users = service();
        let registered = users
            .register("Ada", "ada@example.com", "password123", "user")
            .await
            .unwrap();

        let message = users.delete_user(registered.user_id).await.unwrap();
        assert_eq!(message, "User deleted");

        let err = users.delete_user(registered.user_id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
