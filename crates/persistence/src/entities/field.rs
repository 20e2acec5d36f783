//! Field entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the fields table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldEntity {
    pub id: i64,
    pub complex_id: i64,
    pub name: String,
    pub max_capacity: i32,
}

impl From<FieldEntity> for domain::models::Field {
    fn from(entity: FieldEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            max_capacity: entity.max_capacity,
        }
    }
}
