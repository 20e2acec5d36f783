use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::services::{ComplexFailure, ListUsersFailure, StoreError, UserFailure};
use shared::password::PasswordError;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::document::{ApiDocument, ErrorObject};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {title}")]
    BadRequest { title: &'static str, detail: String },

    #[error("Not found: {title}")]
    NotFound { title: &'static str, detail: String },

    #[error("Conflict: {title}")]
    Conflict { title: &'static str, detail: String },

    #[error("Validation error: {} field error(s)", .0.len())]
    Validation(Vec<ValidationDetail>),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_objects(&self) -> Vec<ErrorObject> {
        let code = self.status().as_u16();
        let object = |title: &str, detail: &str| ErrorObject {
            code,
            title: title.to_string(),
            detail: detail.to_string(),
        };

        match self {
            ApiError::BadRequest { title, detail }
            | ApiError::NotFound { title, detail }
            | ApiError::Conflict { title, detail } => vec![object(*title, detail.as_str())],
            ApiError::Validation(details) => details
                .iter()
                .map(|d| object("Invalid request.", &format!("{}: {}", d.field, d.message)))
                .collect(),
            ApiError::Internal(_) => vec![object(
                "Internal server error.",
                "An internal error occurred",
            )],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!("Internal error: {}", msg);
        }

        let status = self.status();
        let body = ApiDocument::<()>::failure(self.error_objects());
        (status, Json(body)).into_response()
    }
}

/// Path ids are positive; anything else is rejected before the workflow runs.
pub fn require_positive_id(id: i64) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::BadRequest {
            title: "Invalid id.",
            detail: "An id must be a positive number".to_string(),
        })
    }
}

impl From<UserFailure> for ApiError {
    fn from(failure: UserFailure) -> Self {
        match failure {
            UserFailure::InvalidEmail => ApiError::BadRequest {
                title: "Invalid email address.",
                detail: "Invalid email address.".to_string(),
            },
            UserFailure::EmailConflict => ApiError::Conflict {
                title: "Email address already in use.",
                detail: "Email address already in use.".to_string(),
            },
            UserFailure::NotFound => ApiError::NotFound {
                title: "User not found.",
                detail: "User not found in the database.".to_string(),
            },
        }
    }
}

impl From<ListUsersFailure> for ApiError {
    fn from(failure: ListUsersFailure) -> Self {
        match failure {
            ListUsersFailure::UsersNotFound => ApiError::NotFound {
                title: "No users found.",
                detail: "There are no users in the database.".to_string(),
            },
        }
    }
}

impl From<ComplexFailure> for ApiError {
    fn from(failure: ComplexFailure) -> Self {
        match failure {
            ComplexFailure::NameConflict => ApiError::Conflict {
                title: "Complex name already in use.",
                detail: "A complex with this name already exists.".to_string(),
            },
            ComplexFailure::LocationConflict => ApiError::Conflict {
                title: "Complex location already in use.",
                detail: "A complex already exists at this location.".to_string(),
            },
            ComplexFailure::NotFound => ApiError::NotFound {
                title: "Complex not found.",
                detail: "Complex not found in the database.".to_string(),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(format!("Storage error: {}", err))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password hashing failed: {}", err))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            title: "Invalid request body.",
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            title: "Invalid path parameter.",
            detail: rejection.body_text(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_details("", &errors, &mut details);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(details)
    }
}

/// Flattens nested struct and list errors into dotted field paths such as
/// `location.latitude` or `fields[0].max_capacity`.
fn collect_details(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationDetail>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|e| ValidationDetail {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_details(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_details(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}
