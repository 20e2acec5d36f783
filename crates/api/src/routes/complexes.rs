//! Complex endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use domain::models::{Complex, CreateComplexRequest};
use validator::Validate;

use super::conclude;
use crate::app::AppState;
use crate::document::ApiDocument;
use crate::error::{require_positive_id, ApiError};
use crate::extractors::{ApiJson, ApiPath};

/// List all complexes. An empty store yields an empty list.
///
/// GET /api/v1/complexes
pub async fn list_complexes(
    State(state): State<AppState>,
) -> Result<Json<ApiDocument<Vec<Complex>>>, ApiError> {
    let complexes = state.complexes.list_complexes().await?;
    Ok(Json(ApiDocument::data(complexes)))
}

/// Create a complex with its location and fields.
///
/// POST /api/v1/complexes
pub async fn create_complex(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateComplexRequest>,
) -> Result<(StatusCode, Json<ApiDocument<Complex>>), ApiError> {
    request.validate()?;

    let outcome = state.complexes.create_complex(request).await?;
    let complex = conclude("create_complex", outcome)?;
    Ok((StatusCode::CREATED, Json(ApiDocument::data(complex))))
}

/// Replace a complex's name, address, location and field list.
///
/// PUT /api/v1/complexes/:id
pub async fn update_complex(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<CreateComplexRequest>,
) -> Result<Json<ApiDocument<Complex>>, ApiError> {
    let id = require_positive_id(id)?;
    request.validate()?;

    let outcome = state.complexes.update_complex(id, request).await?;
    let complex = conclude("update_complex", outcome)?;
    Ok(Json(ApiDocument::data(complex)))
}

/// Delete a complex together with its location and fields.
///
/// DELETE /api/v1/complexes/:id
pub async fn delete_complex(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiDocument<bool>>, ApiError> {
    let id = require_positive_id(id)?;

    let outcome = state.complexes.delete_complex(id).await?;
    let deleted = conclude("delete_complex", outcome)?;
    Ok(Json(
        ApiDocument::data(deleted).with_message(StatusCode::OK.as_u16(), "Complex deleted."),
    ))
}
