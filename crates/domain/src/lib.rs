//! Domain layer for the fut backend.
//!
//! This crate contains:
//! - Domain models (User, Complex, Location, Field) and their request types
//! - The persistence collaborator traits the workflows depend on
//! - The user and complex workflows (validate, then persist)

pub mod models;
pub mod services;
