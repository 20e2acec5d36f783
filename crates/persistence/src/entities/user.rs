//! User entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            last_name: entity.last_name,
            email: entity.email,
            password: entity.password,
        }
    }
}
