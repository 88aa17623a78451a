//! Flat, ordered snapshots of overlay cell states
//!
//! Records are written x-major, then y, one per cell. That order is the
//! persisted contract: snapshots saved earlier from a grid of the same shape
//! must keep loading.

use serde::{Deserialize, Serialize};

use crate::io::error::{GridError, Result, out_of_range};
use crate::overlay::tile::{Highlight, TileState};
use crate::spatial::Grid;

/// Saved state of one overlay cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Cell index along x
    pub x: i32,
    /// Cell index along the grid's second axis
    pub y: i32,
    /// Marker shown on the cell
    pub highlight: Highlight,
}

/// Complete ordered serialization of an overlay
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlaySnapshot {
    /// One record per cell, x-major
    pub cells: Vec<CellRecord>,
}

impl OverlaySnapshot {
    /// Record every cell of `grid` in x-major order
    pub fn capture(grid: &Grid<TileState>) -> Self {
        let cells = grid
            .iter()
            .map(|((x, y), tile)| CellRecord {
                x,
                y,
                highlight: tile.highlight,
            })
            .collect();
        Self { cells }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the snapshot holds no records
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check that every record addresses a cell of `grid`
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if there are more records than cells, or
    /// `OutOfRange` for the first record outside the grid.
    pub fn validate(&self, grid: &Grid<TileState>) -> Result<()> {
        let expected = grid.space().cell_count();
        if self.cells.len() > expected {
            return Err(GridError::DimensionMismatch {
                expected,
                found: self.cells.len(),
            });
        }

        match self.cells.iter().find(|record| !grid.contains(record.x, record.y)) {
            Some(record) => Err(out_of_range(
                record.x,
                record.y,
                grid.width(),
                grid.height(),
            )),
            None => Ok(()),
        }
    }

    /// Overwrite the highlights of `grid` with the recorded ones
    ///
    /// All records are validated before any cell is written, so on error the
    /// grid is untouched. Cells without a record keep their state. No change
    /// events fire; callers announce the load as a whole.
    ///
    /// # Errors
    ///
    /// Propagates [`OverlaySnapshot::validate`] failures.
    pub fn apply(&self, grid: &mut Grid<TileState>) -> Result<()> {
        self.validate(grid)?;
        for record in &self.cells {
            if let Some(tile) = grid.get_mut(record.x, record.y) {
                tile.highlight = record.highlight;
            }
        }
        Ok(())
    }

    /// Encode as a JSON blob
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|source| GridError::Serialization { source })
    }

    /// Decode a JSON blob
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` for corrupt or incompatible blobs.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| GridError::Deserialization { source })
    }
}
