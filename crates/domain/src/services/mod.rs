//! Domain services.
//!
//! Workflows validate a request against the persistence collaborators and
//! then persist it, reporting expected business outcomes as typed failures.

pub mod complex;
pub mod diagnostics;
pub mod outcome;
pub mod store;
pub mod user;

pub use complex::{ComplexFailure, ComplexWorkflow};
pub use diagnostics::{OperationLog, TracingOperationLog};
pub use outcome::Outcome;
pub use store::{ComplexStore, LocationStore, StoreError, UserStore};
pub use user::{ListUsersFailure, UserFailure, UserWorkflow};
