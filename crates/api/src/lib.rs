pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
