//! Common test utilities for integration tests.
//!
//! The application is built over the in-memory store so every test starts
//! from an empty database without any external service.

// Helpers are shared across test binaries; not every binary uses all of them.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use fut_api::{
    app::{create_app, AppState, Storage},
    config::{
        Config, DatabaseConfig, LogFormat, LoggingConfig, SecurityConfig, ServerConfig,
        StorageBackend, StorageConfig,
    },
};
use persistence::InMemoryStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Test configuration backed by the in-memory store.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig::default(),
        storage: StorageConfig {
            backend: StorageBackend::Memory,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
        },
        security: SecurityConfig::default(),
    }
}

/// Create a test application router over a fresh, empty store.
pub fn create_test_app() -> Router {
    create_app(AppState::new(
        test_config(),
        Storage::Memory(Arc::new(InMemoryStore::new())),
    ))
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_response_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Test user data.
pub struct TestUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl TestUser {
    pub fn new() -> Self {
        Self {
            name: FirstName().fake(),
            last_name: LastName().fake(),
            email: SafeEmail().fake(),
            password: "SecureP@ss123!".to_string(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn body(&self) -> Value {
        json!({
            "name": self.name,
            "lastName": self.last_name,
            "email": self.email,
            "password": self.password,
        })
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a user through the API and return the response `data`.
pub async fn create_test_user(app: &Router, user: &TestUser) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/users", user.body()))
        .await
        .unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;

    if !status.is_success() {
        panic!("User creation failed with status: {}, body: {}", status, body);
    }
    body["data"].clone()
}

/// Request body for a complex at the given coordinates.
pub fn complex_body(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "name": name,
        "address": "742 Evergreen Terrace",
        "location": { "latitude": latitude, "longitude": longitude },
        "fields": [
            { "name": "Soccer Field 1", "maxCapacity": 10 },
            { "name": "Soccer Field 2", "maxCapacity": 14 }
        ]
    })
}

/// Create a complex through the API and return the response `data`.
pub async fn create_test_complex(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/complexes", body))
        .await
        .unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;

    if !status.is_success() {
        panic!("Complex creation failed with status: {}, body: {}", status, body);
    }
    body["data"].clone()
}
