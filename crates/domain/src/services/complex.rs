//! Complex workflow: name and location uniqueness, then persist.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::diagnostics::OperationLog;
use super::outcome::Outcome;
use super::store::{ComplexStore, LocationStore, StoreError};
use crate::models::{Complex, ComplexRecord, CreateComplexRequest};

const CREATE_COMPLEX: &str = "create_complex";
const UPDATE_COMPLEX: &str = "update_complex";
const DELETE_COMPLEX: &str = "delete_complex";

/// Typed failures of the complex mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexFailure {
    NameConflict,
    LocationConflict,
    NotFound,
}

impl ComplexFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexFailure::NameConflict => "NAME_CONFLICT",
            ComplexFailure::LocationConflict => "LOCATION_CONFLICT",
            ComplexFailure::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for ComplexFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ComplexWorkflow {
    complexes: Arc<dyn ComplexStore>,
    locations: Arc<dyn LocationStore>,
    log: Arc<dyn OperationLog>,
}

impl ComplexWorkflow {
    pub fn new(
        complexes: Arc<dyn ComplexStore>,
        locations: Arc<dyn LocationStore>,
        log: Arc<dyn OperationLog>,
    ) -> Self {
        Self {
            complexes,
            locations,
            log,
        }
    }

    /// All complexes; an empty store is an empty list.
    pub async fn list_complexes(&self) -> Result<Vec<Complex>, StoreError> {
        self.complexes.find_all().await
    }

    /// Checks, in order: name uniqueness, then location uniqueness.
    pub async fn create_complex(
        &self,
        request: CreateComplexRequest,
    ) -> Result<Outcome<Complex, ComplexFailure>, StoreError> {
        if let Some(failure) = self.check_uniqueness(&request).await? {
            return Ok(self.reject(CREATE_COMPLEX, failure));
        }

        let complex = self.save(CREATE_COMPLEX, request.into()).await?;
        self.log.succeeded(CREATE_COMPLEX, complex.id);
        Ok(Outcome::Success(complex))
    }

    /// Checks, in order: existence, name uniqueness, location uniqueness.
    /// Neither uniqueness check exempts the complex's own current values.
    pub async fn update_complex(
        &self,
        id: i64,
        request: CreateComplexRequest,
    ) -> Result<Outcome<Complex, ComplexFailure>, StoreError> {
        let Some(existing) = self.complexes.find_by_id(id).await? else {
            return Ok(self.reject(UPDATE_COMPLEX, ComplexFailure::NotFound));
        };

        if let Some(failure) = self.check_uniqueness(&request).await? {
            return Ok(self.reject(UPDATE_COMPLEX, failure));
        }

        let record = ComplexRecord::from(existing).replace_with(request);
        let complex = self.save(UPDATE_COMPLEX, record).await?;
        self.log.succeeded(UPDATE_COMPLEX, complex.id);
        Ok(Outcome::Success(complex))
    }

    /// Removes the complex with its location and fields.
    pub async fn delete_complex(&self, id: i64) -> Result<Outcome<bool, ComplexFailure>, StoreError> {
        let Some(existing) = self.complexes.find_by_id(id).await? else {
            return Ok(self.reject(DELETE_COMPLEX, ComplexFailure::NotFound));
        };

        if let Err(err) = self.complexes.delete(&existing).await {
            self.log.failed(DELETE_COMPLEX, &existing, &err);
            return Err(err);
        }

        self.log.succeeded(DELETE_COMPLEX, existing.id);
        Ok(Outcome::Success(true))
    }

    async fn check_uniqueness(
        &self,
        request: &CreateComplexRequest,
    ) -> Result<Option<ComplexFailure>, StoreError> {
        if self.complexes.exists_by_name(&request.name).await? {
            return Ok(Some(ComplexFailure::NameConflict));
        }
        let location = &request.location;
        if self
            .locations
            .exists_by_latitude_and_longitude(location.latitude, location.longitude)
            .await?
        {
            return Ok(Some(ComplexFailure::LocationConflict));
        }
        Ok(None)
    }

    fn reject<T>(
        &self,
        operation: &'static str,
        failure: ComplexFailure,
    ) -> Outcome<T, ComplexFailure> {
        self.log.rejected(operation, &failure);
        Outcome::Failure(failure)
    }

    async fn save(
        &self,
        operation: &'static str,
        record: ComplexRecord,
    ) -> Result<Complex, StoreError> {
        match self.complexes.save(record.clone()).await {
            Ok(complex) => Ok(complex),
            Err(err) => {
                self.log.failed(operation, &record, &err);
                Err(err)
            }
        }
    }
}
