//! User repository for database operations.

use async_trait::async_trait;
use domain::models::{User, UserRecord};
use domain::services::{StoreError, UserStore};
use sqlx::PgPool;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: UserRecord) -> Result<User, StoreError> {
        let timer = QueryTimer::new("insert_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, last_name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result?.into())
    }

    async fn replace(&self, id: i64, user: UserRecord) -> Result<User, StoreError> {
        let timer = QueryTimer::new("update_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users
            SET name = $2, last_name = $3, email = $4, password = $5
            WHERE id = $1
            RETURNING id, name, last_name, email, password
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        result?
            .map(Into::into)
            .ok_or_else(|| StoreError::Missing(format!("user {}", id)))
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, last_name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        Ok(result?.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let timer = QueryTimer::new("find_all_users");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, last_name, email, password
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();

        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("user_email_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        Ok(result?)
    }

    async fn save(&self, user: UserRecord) -> Result<User, StoreError> {
        match user.id {
            Some(id) => self.replace(id, user).await,
            None => self.insert(user).await,
        }
    }
}
