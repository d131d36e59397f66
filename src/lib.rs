#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the TaskNest backend."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use auth::TokenService;
use services::{TaskService, UserService};
use store::{TaskStore, UserStore};

/// Shared application state, registered as `web::Data<AppState>`.
///
/// Holds the store trait objects and the token service; the per-domain
/// services are assembled on demand from cheap `Arc` clones. Tests build an
/// `AppState` over the in-memory store, production over Postgres.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, tasks: Arc<dyn TaskStore>, tokens: TokenService) -> Self {
        Self {
            users,
            tasks,
            tokens,
        }
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(Arc::clone(&self.users), self.tokens.clone())
    }

    pub fn task_service(&self) -> TaskService {
        TaskService::new(Arc::clone(&self.tasks))
    }
}
