//! Movement highlight overlay built on the generic grid
//!
//! This module contains:
//! - The per-cell highlight payload
//! - The overlay consumer with bulk and single-cell mutation
//! - Snapshot save/load of the overlay's cell states

/// Flat ordered snapshots of overlay state
pub mod snapshot;
/// Per-cell highlight payload
pub mod tile;
/// Highlight overlay over a grid of tile states
pub mod tilemap;

pub use snapshot::{CellRecord, OverlaySnapshot};
pub use tile::{Highlight, TileState};
pub use tilemap::{OverlayLoaded, TileOverlay, VisualBinder};
