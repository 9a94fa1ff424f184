//! Error types for the service client adapter.
//!
//! Uses `thiserror` for typed errors that propagate unchanged to the
//! control loop. The adapter performs no retries of its own -- every
//! failure is reported to the caller as one of these variants.

/// Errors reported by the simulation service adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service refused the submitted configuration.
    #[error("configuration rejected by the service: {0}")]
    ValidationRejected(String),

    /// A step or state fetch was attempted before any simulation existed.
    #[error("no active simulation on the service: {0}")]
    NoActiveSimulation(String),

    /// Transport failure, a 5xx response, or an undecodable body.
    #[error("simulation service unavailable: {0}")]
    ServiceUnavailable(String),
}
