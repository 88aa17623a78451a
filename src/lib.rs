//! Generic world-space cell grid with synchronous change notification
//!
//! A `Grid<T>` maps world positions on the XZ plane to cells, builds each
//! cell through a factory, and tells its subscribers whenever a cell changes.
//! The tile overlay is a grid of highlight states used for movement ranges,
//! with snapshot save/load through an opaque blob store.

#![forbid(unsafe_code)]

/// Input/output operations, configuration and error handling
pub mod io;
/// World-space vector math
pub mod math;
/// Highlight overlay, tile payload and snapshots
pub mod overlay;
/// Coordinate mapping, the generic grid and change events
pub mod spatial;

pub use io::error::{GridError, Result};
