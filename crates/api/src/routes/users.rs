//! User endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use domain::models::{CreateUserRequest, User};
use shared::password::hash_password;
use validator::Validate;

use super::conclude;
use crate::app::AppState;
use crate::document::ApiDocument;
use crate::error::{require_positive_id, ApiError};
use crate::extractors::{ApiJson, ApiPath};

/// List all users.
///
/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiDocument<Vec<User>>>, ApiError> {
    let outcome = state.users.list_users().await?;
    let users = conclude("list_users", outcome)?;
    Ok(Json(ApiDocument::data(users)))
}

/// Create a user. The password is stored as an Argon2id hash.
///
/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiDocument<User>>), ApiError> {
    request.validate()?;

    let request = CreateUserRequest {
        password: hash_password(&request.password)?,
        ..request
    };

    let outcome = state.users.create_user(request).await?;
    let user = conclude("create_user", outcome)?;
    Ok((StatusCode::CREATED, Json(ApiDocument::data(user))))
}

/// Replace a user's name, last name and email. The stored password is kept.
///
/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<Json<ApiDocument<User>>, ApiError> {
    let id = require_positive_id(id)?;
    request.validate()?;

    let outcome = state.users.update_user(id, request).await?;
    let user = conclude("update_user", outcome)?;
    Ok(Json(ApiDocument::data(user)))
}
