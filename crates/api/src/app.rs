use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use domain::services::{
    ComplexStore, ComplexWorkflow, LocationStore, TracingOperationLog, UserStore, UserWorkflow,
};
use persistence::repositories::{ComplexRepository, LocationRepository, UserRepository};
use persistence::InMemoryStore;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{complexes, health, users};

/// Backing storage selected at startup.
pub enum Storage {
    Postgres(PgPool),
    Memory(Arc<InMemoryStore>),
}

struct Stores {
    users: Arc<dyn UserStore>,
    complexes: Arc<dyn ComplexStore>,
    locations: Arc<dyn LocationStore>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Present only for the postgres backend; used by the health probes.
    pub pool: Option<PgPool>,
    pub users: Arc<UserWorkflow>,
    pub complexes: Arc<ComplexWorkflow>,
}

impl AppState {
    pub fn new(config: Config, storage: Storage) -> Self {
        let (stores, pool) = match storage {
            Storage::Postgres(pool) => (
                Stores {
                    users: Arc::new(UserRepository::new(pool.clone())),
                    complexes: Arc::new(ComplexRepository::new(pool.clone())),
                    locations: Arc::new(LocationRepository::new(pool.clone())),
                },
                Some(pool),
            ),
            Storage::Memory(store) => (
                Stores {
                    users: store.clone(),
                    complexes: store.clone(),
                    locations: store,
                },
                None,
            ),
        };

        Self {
            config: Arc::new(config),
            pool,
            users: Arc::new(UserWorkflow::new(
                stores.users,
                Arc::new(TracingOperationLog::new("users")),
            )),
            complexes: Arc::new(ComplexWorkflow::new(
                stores.complexes,
                stores.locations,
                Arc::new(TracingOperationLog::new("complexes")),
            )),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route("/api/v1/users/:id", put(users::update_user))
        .route(
            "/api/v1/complexes",
            get(complexes::list_complexes).post(complexes::create_complex),
        )
        .route(
            "/api/v1/complexes/:id",
            put(complexes::update_complex).delete(complexes::delete_complex),
        );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
