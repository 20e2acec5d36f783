//! Persistence layer for the fut backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - Postgres repositories implementing the domain store traits
//! - An in-memory store with the same constraints

pub mod db;
pub mod entities;
pub mod memory;
pub mod metrics;
pub mod repositories;

pub use memory::InMemoryStore;
