//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::constants::is_valid_user_id;
use crate::error::{DomainError, DomainResult};

/// Store-assigned user identifier
pub type UserId = i32;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a user from already persisted fields
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// User fields supplied by a caller before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewUser {
    /// User display name
    #[cfg_attr(feature = "openapi", schema(example = "driss"))]
    pub name: String,
    /// User email address
    #[cfg_attr(feature = "openapi", schema(example = "driss@gmail.com"))]
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach the identifier the store assigned on insert
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Parse a raw request identifier into a positive user id.
pub fn parse_user_id(raw: &str) -> DomainResult<UserId> {
    raw.trim()
        .parse::<UserId>()
        .ok()
        .filter(|id| is_valid_user_id(*id))
        .ok_or_else(|| DomainError::validation(format!("Invalid id: {}", raw)))
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: UserId,
    /// User display name
    pub name: String,
    /// User email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
