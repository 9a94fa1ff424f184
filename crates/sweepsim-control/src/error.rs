//! Error types for the simulation control loop.
//!
//! Uses `thiserror` for typed errors. The control loop never lets an
//! error escape its own boundary: every failure is published to
//! observers as a value, with the previous valid state and snapshot left
//! untouched. Stale step responses are filtered internally and have no
//! error variant here by design -- they are not a caller-visible event.

use sweepsim_client::ServiceError;

/// Errors that can occur during a control loop transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    /// A reset was requested before any configuration was ever submitted.
    #[error("nothing to reset: no simulation has been configured yet")]
    NothingToReset,

    /// A service round trip failed; carries the adapter's tagged error.
    #[error("service call failed: {0}")]
    Service(#[from] ServiceError),
}
