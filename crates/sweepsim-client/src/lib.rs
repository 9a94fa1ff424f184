//! Service client adapter for the remote cleaning-robot simulation.
//!
//! Defines an enum-based dispatch over service backends, avoiding the
//! dyn-compatibility issues with async trait methods. Concrete
//! implementations exist for the service's HTTP API and for a scripted
//! in-memory stand-in used by tests and offline runs.
//!
//! The adapter is deliberately thin: it translates intents into round
//! trips, decodes responses into the shared wire types, and maps failures
//! to tagged [`ServiceError`] values. It performs no retries and no
//! validation beyond type shape -- both belong to its callers.

mod error;
mod http;
mod scripted;

pub use error::ServiceError;
pub use http::HttpService;
pub use scripted::{ScriptedService, ServiceCall};

use sweepsim_types::{SimulationConfig, SimulationDescriptor, Snapshot};

/// A backend that can serve the four simulation service operations.
///
/// Uses enum dispatch instead of trait objects because async methods
/// are not dyn-compatible in Rust.
#[derive(Clone)]
pub enum ServiceBackend {
    /// The real service, over HTTP.
    Http(HttpService),
    /// Canned responses for tests and offline runs.
    Scripted(ScriptedService),
}

impl ServiceBackend {
    /// Create a new simulation from `config` and return its descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ValidationRejected`] if the service refuses
    /// the configuration, [`ServiceError::ServiceUnavailable`] on
    /// transport failure.
    pub async fn create(
        &self,
        config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        match self {
            Self::Http(backend) => backend.create(config).await,
            Self::Scripted(backend) => backend.create(config).await,
        }
    }

    /// Advance the active simulation one turn and return the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NoActiveSimulation`] if nothing has been
    /// created yet, [`ServiceError::ServiceUnavailable`] on transport
    /// failure.
    pub async fn step(&self) -> Result<Snapshot, ServiceError> {
        match self {
            Self::Http(backend) => backend.step().await,
            Self::Scripted(backend) => backend.step().await,
        }
    }

    /// Fetch the current snapshot without advancing turns.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::step`].
    pub async fn fetch_state(&self) -> Result<Snapshot, ServiceError> {
        match self {
            Self::Http(backend) => backend.fetch_state().await,
            Self::Scripted(backend) => backend.fetch_state().await,
        }
    }

    /// Replace the active simulation with a fresh run of `config`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::create`].
    pub async fn reset(
        &self,
        config: &SimulationConfig,
    ) -> Result<SimulationDescriptor, ServiceError> {
        match self {
            Self::Http(backend) => backend.reset(config).await,
            Self::Scripted(backend) => backend.reset(config).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::Scripted(_) => "scripted",
        }
    }
}
