//! Complex, location and field domain models.
//!
//! A complex owns exactly one location and any number of fields; neither has
//! a lifecycle of its own.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Geographic position of a complex. Unique by (latitude, longitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// A playable field inside a complex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: i64,
    pub name: String,
    pub max_capacity: i32,
}

/// A persisted sports complex with its owned location and fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complex {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: Location,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    pub id: Option<i64>,
    pub name: String,
    pub max_capacity: i32,
}

/// A complex handed to `ComplexStore::save`.
///
/// With `id: None` the store inserts the complex, its location and its fields.
/// With an id it replaces name, address, location values and the whole field
/// list of the stored complex.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexRecord {
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub location: LocationRecord,
    pub fields: Vec<FieldRecord>,
}

impl ComplexRecord {
    /// Full replacement for an update. The location row is rewritten in
    /// place, so its id carries over; fields are recreated.
    pub fn replace_with(self, request: CreateComplexRequest) -> Self {
        let location = LocationRecord {
            id: self.location.id,
            ..LocationRecord::from(request.location)
        };
        Self {
            id: self.id,
            name: request.name,
            address: request.address,
            location,
            fields: request.fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        Self {
            id: Some(location.id),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

impl From<Field> for FieldRecord {
    fn from(field: Field) -> Self {
        Self {
            id: Some(field.id),
            name: field.name,
            max_capacity: field.max_capacity,
        }
    }
}

impl From<Complex> for ComplexRecord {
    fn from(complex: Complex) -> Self {
        Self {
            id: Some(complex.id),
            name: complex.name,
            address: complex.address,
            location: complex.location.into(),
            fields: complex.fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Location part of a complex request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,
    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,
}

/// Field part of a complex request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
    #[validate(length(min = 1, max = 255, message = "Field name must be 1-255 characters"))]
    pub name: String,
    #[validate(range(min = 1, message = "Max capacity must be a positive number"))]
    pub max_capacity: i32,
}

/// Request body for creating a complex, also used for full updates.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplexRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Address must be 1-255 characters"))]
    pub address: String,
    #[validate(nested)]
    pub location: CreateLocationRequest,
    /// Omitted means no fields.
    #[serde(default)]
    #[validate(nested)]
    pub fields: Vec<CreateFieldRequest>,
}

impl From<CreateLocationRequest> for LocationRecord {
    fn from(request: CreateLocationRequest) -> Self {
        Self {
            id: None,
            latitude: request.latitude,
            longitude: request.longitude,
        }
    }
}

impl From<CreateFieldRequest> for FieldRecord {
    fn from(request: CreateFieldRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            max_capacity: request.max_capacity,
        }
    }
}

impl From<CreateComplexRequest> for ComplexRecord {
    fn from(request: CreateComplexRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            address: request.address,
            location: request.location.into(),
            fields: request.fields.into_iter().map(Into::into).collect(),
        }
    }
}
