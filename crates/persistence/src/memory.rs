//! In-memory store implementing every domain store trait.
//!
//! Backs the `memory` storage backend and the scenario tests. It enforces the
//! same unique constraints as the Postgres schema and reports violations as
//! `StoreError::UniqueViolation` with the matching constraint name.

use async_trait::async_trait;
use domain::models::{Complex, ComplexRecord, Field, Location, User, UserRecord};
use domain::services::{ComplexStore, LocationStore, StoreError, UserStore};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

const USERS_EMAIL_KEY: &str = "users_email_key";
const COMPLEXES_NAME_KEY: &str = "complexes_name_key";
const LOCATIONS_COORDINATES_KEY: &str = "complex_locations_latitude_longitude_key";

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    complexes: BTreeMap<i64, Complex>,
    last_user_id: i64,
    last_complex_id: i64,
    last_location_id: i64,
    last_field_id: i64,
}

impl Tables {
    fn next_id(counter: &mut i64) -> i64 {
        *counter += 1;
        *counter
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|user| user.email == email && Some(user.id) != except)
    }

    fn check_complex_constraints(
        &self,
        record: &ComplexRecord,
        except: Option<i64>,
    ) -> Result<(), StoreError> {
        let others = || {
            self.complexes
                .values()
                .filter(move |complex| Some(complex.id) != except)
        };
        if others().any(|complex| complex.name == record.name) {
            return Err(StoreError::UniqueViolation(COMPLEXES_NAME_KEY.to_string()));
        }
        if others().any(|complex| {
            complex.location.latitude == record.location.latitude
                && complex.location.longitude == record.location.longitude
        }) {
            return Err(StoreError::UniqueViolation(
                LOCATIONS_COORDINATES_KEY.to_string(),
            ));
        }
        Ok(())
    }
}

/// Thread-safe in-memory storage. Cheap to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.tables.read().await.email_taken(email, None))
    }

    async fn save(&self, user: UserRecord) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if let Some(id) = user.id {
            if !tables.users.contains_key(&id) {
                return Err(StoreError::Missing(format!("user {}", id)));
            }
        }
        if tables.email_taken(&user.email, user.id) {
            return Err(StoreError::UniqueViolation(USERS_EMAIL_KEY.to_string()));
        }

        let id = match user.id {
            Some(id) => id,
            None => Tables::next_id(&mut tables.last_user_id),
        };
        let saved = User {
            id,
            name: user.name,
            last_name: user.last_name,
            email: user.email,
            password: user.password,
        };
        tables.users.insert(id, saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl ComplexStore for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Complex>, StoreError> {
        Ok(self.tables.read().await.complexes.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Complex>, StoreError> {
        Ok(self.tables.read().await.complexes.values().cloned().collect())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .complexes
            .values()
            .any(|complex| complex.name == name))
    }

    async fn save(&self, complex: ComplexRecord) -> Result<Complex, StoreError> {
        let mut tables = self.tables.write().await;

        let location_id = match complex.id {
            Some(id) => match tables.complexes.get(&id) {
                Some(existing) => existing.location.id,
                None => return Err(StoreError::Missing(format!("complex {}", id))),
            },
            None => 0,
        };
        tables.check_complex_constraints(&complex, complex.id)?;

        let (id, location_id) = match complex.id {
            Some(id) => (id, location_id),
            None => (
                Tables::next_id(&mut tables.last_complex_id),
                Tables::next_id(&mut tables.last_location_id),
            ),
        };

        let mut fields = Vec::with_capacity(complex.fields.len());
        for field in complex.fields {
            fields.push(Field {
                id: Tables::next_id(&mut tables.last_field_id),
                name: field.name,
                max_capacity: field.max_capacity,
            });
        }

        let saved = Complex {
            id,
            name: complex.name,
            address: complex.address,
            location: Location {
                id: location_id,
                latitude: complex.location.latitude,
                longitude: complex.location.longitude,
            },
            fields,
        };
        tables.complexes.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, complex: &Complex) -> Result<(), StoreError> {
        self.tables.write().await.complexes.remove(&complex.id);
        Ok(())
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn exists_by_latitude_and_longitude(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .complexes
            .values()
            .any(|complex| {
                complex.location.latitude == latitude && complex.location.longitude == longitude
            }))
    }
}
