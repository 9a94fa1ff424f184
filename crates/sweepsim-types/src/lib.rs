//! Shared type definitions for the sweepsim client.
//!
//! This crate is the single source of truth for all types used across the
//! sweepsim workspace. The wire types mirror the remote simulation
//! service's JSON shapes exactly -- field names and cell tag strings are a
//! compatibility contract and must not drift.
//!
//! # Modules
//!
//! - [`config`] -- simulation configuration and the totals remembered at
//!   create time
//! - [`snapshot`] -- the authoritative grid state reported by the service
//! - [`descriptor`] -- the record returned by create/reset

pub mod config;
pub mod descriptor;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use config::{RememberedTotals, SimulationConfig};
pub use descriptor::SimulationDescriptor;
pub use snapshot::{CellTag, Robot, Snapshot};
