//! Persistence collaborators consumed by the workflows.
//!
//! Implementations live in the `persistence` crate (Postgres and in-memory).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Complex, ComplexRecord, User, UserRecord};

/// Unexpected storage failure. Never a business outcome.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. The workflows check uniqueness
    /// before writing, so this only surfaces when concurrent writers race.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Record not found: {0}")]
    Missing(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                StoreError::UniqueViolation(
                    db_err
                        .constraint()
                        .map(str::to_string)
                        .unwrap_or_else(|| db_err.message().to_string()),
                )
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Inserts when `user.id` is `None` (assigning an id), replaces otherwise.
    async fn save(&self, user: UserRecord) -> Result<User, StoreError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplexStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Complex>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Complex>, StoreError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;

    /// Inserts when `complex.id` is `None`, replaces otherwise. The location
    /// and field list are written together with the complex.
    async fn save(&self, complex: ComplexRecord) -> Result<Complex, StoreError>;

    /// Removes the complex together with its location and fields.
    async fn delete(&self, complex: &Complex) -> Result<(), StoreError>;
}

/// Location lookups, independent of the owning complex.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn exists_by_latitude_and_longitude(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, StoreError>;
}
