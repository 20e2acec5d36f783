//! Complex location repository for database operations.

use async_trait::async_trait;
use domain::services::{LocationStore, StoreError};
use sqlx::PgPool;

use crate::metrics::QueryTimer;

/// Repository for complex location lookups.
#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStore for LocationRepository {
    async fn exists_by_latitude_and_longitude(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("location_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM complex_locations WHERE latitude = $1 AND longitude = $2
            )
            "#,
        )
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result?)
    }
}
