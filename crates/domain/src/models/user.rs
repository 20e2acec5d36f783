//! User domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// A persisted user account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // Never serialize the password to API responses
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// A user row handed to `UserStore::save`.
///
/// `id` is `None` until the store assigns one; a record carrying an id
/// replaces the stored row in full.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Option<i64>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl UserRecord {
    /// Replaces name, last name and email; id and password are kept.
    pub fn replace_with(self, request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            last_name: request.last_name,
            email: request.email,
            ..self
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            name: user.name,
            last_name: user.last_name,
            email: user.email,
            password: user.password,
        }
    }
}

/// Request body for creating a user, also used for full updates.
///
/// The email is intentionally not format-checked here: the workflow reports
/// a malformed address as its own typed failure.
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    pub last_name: String,
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<CreateUserRequest> for UserRecord {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            last_name: request.last_name,
            email: request.email,
            password: request.password,
        }
    }
}
