//! Shared utilities for the fut backend.
//!
//! - Input validation helpers (email pattern, coordinate ranges)
//! - Password hashing with Argon2id

pub mod password;
pub mod validation;
