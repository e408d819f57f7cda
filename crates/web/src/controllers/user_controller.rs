//! User controller.
//!
//! Calls the repository and renders the result. It never builds SQL and
//! never looks at the request; the dispatcher hands it typed arguments.

use std::sync::Arc;

use axum::{http::StatusCode, response::Html};
use tracing::info;

use common::{AppResult, OptionExt};
use domain::{NewUser, UserId};
use user_repository_lib::UserRepository;

use crate::views;

/// Controller for the user pages.
pub struct UserController {
    users: Arc<dyn UserRepository>,
}

impl UserController {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Render one user's profile, or "User not found" when the id is unknown.
    pub async fn profile(&self, id: UserId) -> AppResult<Html<String>> {
        let user = self.users.find_by_id(id).await?.ok_or_not_found()?;
        Ok(Html(views::profile_page(&user)))
    }

    /// Render every user.
    pub async fn list(&self) -> AppResult<Html<String>> {
        let users = self.users.list().await?;
        Ok(Html(views::list_page(&users)))
    }

    /// Persist a new user and render its profile.
    pub async fn save(&self, new_user: NewUser) -> AppResult<(StatusCode, Html<String>)> {
        let user = self.users.save(new_user).await?;
        info!(id = user.id, "user saved");
        Ok((StatusCode::CREATED, Html(views::profile_page(&user))))
    }
}
