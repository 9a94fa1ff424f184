//! Pure presentation derivations for the sweepsim client.
//!
//! Everything here is a function of the snapshot currently displayed
//! (plus the totals remembered at create time) -- no hidden counters, no
//! incremental accumulation, no side effects. Derivations are re-run on
//! every state change, so a re-render after configure or reset is always
//! consistent with the snapshot it displays.
//!
//! # Modules
//!
//! - [`stats`] -- collected/percent/carrying/throughput metrics
//! - [`grid`] -- the renderable cell matrix with robot precedence

pub mod grid;
pub mod stats;

pub use grid::{CellClass, CellView, grid_view};
pub use stats::{CollectionStats, collection_stats};
