//! Spatial data structures and world/cell coordinate mapping
//!
//! This module contains:
//! - The coordinate space mapping world positions to cell indices
//! - The generic cell grid and its factory contract
//! - Observer lists used for change notification

/// World position to cell index mapping
pub mod coordinates;
/// Observer lists and change events
pub mod events;
/// Generic cell grid with change notification
pub mod grid;

pub use coordinates::CoordinateSpace;
pub use events::{CellChanged, Observers, SubscriptionId};
pub use grid::{CellFactory, Grid};
