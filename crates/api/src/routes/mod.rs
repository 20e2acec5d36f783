//! HTTP route handlers.

pub mod complexes;
pub mod health;
pub mod users;

use domain::services::Outcome;
use std::fmt;

use crate::error::ApiError;
use crate::middleware::record_workflow_outcome;

/// Records the outcome of a workflow call and turns a typed failure into its
/// error response.
fn conclude<T, F>(operation: &'static str, outcome: Outcome<T, F>) -> Result<T, ApiError>
where
    F: fmt::Display + Into<ApiError>,
{
    outcome
        .into_result()
        .map(|value| {
            record_workflow_outcome(operation, "success");
            value
        })
        .map_err(|failure| {
            record_workflow_outcome(operation, failure.to_string());
            Into::<ApiError>::into(failure)
        })
}
