//! Complex entity (database row mapping).

use domain::models::{Complex, Location};
use sqlx::FromRow;

use super::FieldEntity;

/// A complexes row joined with its complex_locations row.
#[derive(Debug, Clone, FromRow)]
pub struct ComplexEntity {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl ComplexEntity {
    /// Assembles the domain model from the joined row and its field rows.
    pub fn into_complex(self, fields: Vec<FieldEntity>) -> Complex {
        Complex {
            id: self.id,
            name: self.name,
            address: self.address,
            location: Location {
                id: self.location_id,
                latitude: self.latitude,
                longitude: self.longitude,
            },
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}
