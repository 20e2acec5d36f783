//! Operation log injected into the workflows.
//!
//! Workflows report what happened to a call through this collaborator instead
//! of reaching for a global logger, so tests can observe it directly.

use std::fmt;

use super::store::StoreError;

pub trait OperationLog: Send + Sync {
    /// A mutation was persisted.
    fn succeeded(&self, operation: &'static str, id: i64);

    /// The call ended in a typed business failure.
    fn rejected(&self, operation: &'static str, reason: &dyn fmt::Display);

    /// Storage failed while writing `record`; the error is about to be
    /// returned to the caller.
    fn failed(&self, operation: &'static str, record: &dyn fmt::Debug, error: &StoreError);
}

/// Forwards operation events to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingOperationLog {
    component: &'static str,
}

impl TracingOperationLog {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl OperationLog for TracingOperationLog {
    fn succeeded(&self, operation: &'static str, id: i64) {
        tracing::info!(
            component = self.component,
            operation = operation,
            id = id,
            "Operation completed"
        );
    }

    fn rejected(&self, operation: &'static str, reason: &dyn fmt::Display) {
        tracing::warn!(
            component = self.component,
            operation = operation,
            reason = %reason,
            "Operation rejected"
        );
    }

    fn failed(&self, operation: &'static str, record: &dyn fmt::Debug, error: &StoreError) {
        tracing::error!(
            component = self.component,
            operation = operation,
            record = ?record,
            error = %error,
            "Operation failed"
        );
    }
}
