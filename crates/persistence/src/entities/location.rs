//! Complex location entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the complex_locations table.
#[derive(Debug, Clone, FromRow)]
pub struct LocationEntity {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<LocationEntity> for domain::models::Location {
    fn from(entity: LocationEntity) -> Self {
        Self {
            id: entity.id,
            latitude: entity.latitude,
            longitude: entity.longitude,
        }
    }
}
