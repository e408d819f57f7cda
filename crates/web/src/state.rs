//! Application state for dependency injection.

use std::sync::Arc;

use user_repository_lib::{Database, UserRepository};

use crate::controllers::UserController;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserRepository>, database: Database) -> Self {
        Self { users, database }
    }

    /// Fresh controller for one request.
    pub fn user_controller(&self) -> UserController {
        UserController::new(self.users.clone())
    }
}
