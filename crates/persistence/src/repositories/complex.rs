//! Complex repository for database operations.
//!
//! A complex is stored across three tables: `complexes`, its single
//! `complex_locations` row and its `fields` rows. Writes touching more than
//! one table run in a transaction.

use async_trait::async_trait;
use domain::models::{Complex, ComplexRecord, FieldRecord};
use domain::services::{ComplexStore, StoreError};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

use crate::entities::{ComplexEntity, FieldEntity, LocationEntity};
use crate::metrics::QueryTimer;

const SELECT_COMPLEX: &str = r#"
    SELECT c.id, c.name, c.address, l.id AS location_id, l.latitude, l.longitude
    FROM complexes c
    JOIN complex_locations l ON l.id = c.location_id
"#;

/// Repository for complex database operations.
#[derive(Clone)]
pub struct ComplexRepository {
    pool: PgPool,
}

impl ComplexRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, complex: ComplexRecord) -> Result<Complex, StoreError> {
        let timer = QueryTimer::new("insert_complex");
        let mut tx = self.pool.begin().await?;

        let location = sqlx::query_as::<_, LocationEntity>(
            r#"
            INSERT INTO complex_locations (latitude, longitude)
            VALUES ($1, $2)
            RETURNING id, latitude, longitude
            "#,
        )
        .bind(complex.location.latitude)
        .bind(complex.location.longitude)
        .fetch_one(&mut *tx)
        .await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO complexes (name, address, location_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&complex.name)
        .bind(&complex.address)
        .bind(location.id)
        .fetch_one(&mut *tx)
        .await?;

        let fields = insert_fields(&mut *tx, id, &complex.fields).await?;

        tx.commit().await?;
        timer.record();

        Ok(Complex {
            id,
            name: complex.name,
            address: complex.address,
            location: location.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }

    async fn replace(&self, id: i64, complex: ComplexRecord) -> Result<Complex, StoreError> {
        let timer = QueryTimer::new("update_complex");
        let mut tx = self.pool.begin().await?;

        // The location row is rewritten in place so its id survives the update
        let location = sqlx::query_as::<_, LocationEntity>(
            r#"
            UPDATE complex_locations l
            SET latitude = $2, longitude = $3
            FROM complexes c
            WHERE c.id = $1 AND l.id = c.location_id
            RETURNING l.id, l.latitude, l.longitude
            "#,
        )
        .bind(id)
        .bind(complex.location.latitude)
        .bind(complex.location.longitude)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| StoreError::Missing(format!("complex {}", id)))?;

        sqlx::query(
            r#"
            UPDATE complexes
            SET name = $2, address = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&complex.name)
        .bind(&complex.address)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM fields WHERE complex_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let fields = insert_fields(&mut *tx, id, &complex.fields).await?;

        tx.commit().await?;
        timer.record();

        Ok(Complex {
            id,
            name: complex.name,
            address: complex.address,
            location: location.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        })
    }
}

async fn insert_fields(
    conn: &mut PgConnection,
    complex_id: i64,
    fields: &[FieldRecord],
) -> Result<Vec<FieldEntity>, sqlx::Error> {
    let mut inserted = Vec::with_capacity(fields.len());
    for field in fields {
        let entity = sqlx::query_as::<_, FieldEntity>(
            r#"
            INSERT INTO fields (complex_id, name, max_capacity)
            VALUES ($1, $2, $3)
            RETURNING id, complex_id, name, max_capacity
            "#,
        )
        .bind(complex_id)
        .bind(&field.name)
        .bind(field.max_capacity)
        .fetch_one(&mut *conn)
        .await?;
        inserted.push(entity);
    }
    Ok(inserted)
}

#[async_trait]
impl ComplexStore for ComplexRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Complex>, StoreError> {
        let timer = QueryTimer::new("find_complex_by_id");
        let sql = format!("{} WHERE c.id = $1", SELECT_COMPLEX);
        let entity = sqlx::query_as::<_, ComplexEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(entity) = entity else {
            timer.record();
            return Ok(None);
        };

        let fields = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT id, complex_id, name, max_capacity
            FROM fields
            WHERE complex_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        Ok(Some(entity.into_complex(fields)))
    }

    async fn find_all(&self) -> Result<Vec<Complex>, StoreError> {
        let timer = QueryTimer::new("find_all_complexes");
        let sql = format!("{} ORDER BY c.id", SELECT_COMPLEX);
        let entities = sqlx::query_as::<_, ComplexEntity>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i64> = entities.iter().map(|entity| entity.id).collect();
        let fields = sqlx::query_as::<_, FieldEntity>(
            r#"
            SELECT id, complex_id, name, max_capacity
            FROM fields
            WHERE complex_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        timer.record();

        let mut by_complex: HashMap<i64, Vec<FieldEntity>> = HashMap::new();
        for field in fields {
            by_complex.entry(field.complex_id).or_default().push(field);
        }

        Ok(entities
            .into_iter()
            .map(|entity| {
                let fields = by_complex.remove(&entity.id).unwrap_or_default();
                entity.into_complex(fields)
            })
            .collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("complex_name_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM complexes WHERE name = $1)
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result?)
    }

    async fn save(&self, complex: ComplexRecord) -> Result<Complex, StoreError> {
        match complex.id {
            Some(id) => self.replace(id, complex).await,
            None => self.insert(complex).await,
        }
    }

    async fn delete(&self, complex: &Complex) -> Result<(), StoreError> {
        let timer = QueryTimer::new("delete_complex");
        let mut tx = self.pool.begin().await?;

        // Fields go with the complex through ON DELETE CASCADE
        sqlx::query("DELETE FROM complexes WHERE id = $1")
            .bind(complex.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM complex_locations WHERE id = $1")
            .bind(complex.location.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(complex_id = complex.id, "Deleted complex with its location");
        Ok(())
    }
}
