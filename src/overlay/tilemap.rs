//! Movement highlight overlay over a grid of tile states
//!
//! Every highlight mutation goes through the underlying grid's change
//! channel, one event per cell touched. Loading a snapshot is announced once
//! on a separate channel so presentation layers can redraw everything in one
//! pass instead of reacting to each cell.

use tracing::debug;

use crate::io::error::{GridError, Result, out_of_range};
use crate::io::store::{SnapshotId, SnapshotStore};
use crate::math::Vector3;
use crate::overlay::snapshot::OverlaySnapshot;
use crate::overlay::tile::{Highlight, TileState};
use crate::spatial::{CellChanged, CoordinateSpace, Grid, Observers, SubscriptionId};

/// Fired once after a snapshot has been fully applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayLoaded;

/// Presentation layer that attaches itself to an overlay
///
/// Implementors typically subscribe to the overlay's change and load channels
/// in `bind` and read cell states back later through [`TileOverlay::grid`].
pub trait VisualBinder {
    /// Attach to `overlay`
    fn bind(&mut self, overlay: &mut TileOverlay);
}

/// Grid of highlight states used to show movement ranges
#[derive(Debug)]
pub struct TileOverlay {
    grid: Grid<TileState>,
    loaded: Observers<OverlayLoaded>,
}

impl TileOverlay {
    /// Create an overlay with every cell cleared
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for rejected dimensions, cell size or
    /// origin.
    pub fn new(width: u32, height: u32, cell_size: f64, origin: Vector3) -> Result<Self> {
        let space = CoordinateSpace::new(width, height, cell_size, origin)?;
        Self::with_space(space)
    }

    /// Create an overlay over an already validated coordinate space
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the cell storage cannot take the
    /// space's shape.
    pub fn with_space(space: CoordinateSpace) -> Result<Self> {
        let grid = Grid::with_space(space, |_: &CoordinateSpace, _: i32, _: i32| {
            TileState::default()
        })?;
        Ok(Self {
            grid,
            loaded: Observers::new(),
        })
    }

    /// The underlying grid, for reads
    pub const fn grid(&self) -> &Grid<TileState> {
        &self.grid
    }

    /// Highlight at `(x, y)`, or `None` outside the grid
    pub fn highlight(&self, x: i32, y: i32) -> Option<Highlight> {
        self.grid.get(x, y).map(|tile| tile.highlight)
    }

    /// Highlight of the cell containing a world position
    pub fn highlight_world(&self, position: Vector3) -> Option<Highlight> {
        self.grid.get_world(position).map(|tile| tile.highlight)
    }

    /// Set the highlight at `(x, y)` and fire a change event
    ///
    /// Ignored outside the grid.
    pub fn set_highlight(&mut self, x: i32, y: i32, highlight: Highlight) {
        if let Some(tile) = self.grid.get_mut(x, y) {
            tile.highlight = highlight;
            self.grid.trigger_changed(x, y);
        }
    }

    /// Set the highlight of the cell containing a world position
    pub fn set_highlight_world(&mut self, position: Vector3, highlight: Highlight) {
        let (x, y) = self.grid.world_to_cell(position);
        self.set_highlight(x, y, highlight);
    }

    /// Set the highlight at `(x, y)`, reporting coordinates outside the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `(x, y)` is not a cell.
    pub fn try_set_highlight(&mut self, x: i32, y: i32, highlight: Highlight) -> Result<()> {
        if !self.grid.contains(x, y) {
            return Err(out_of_range(x, y, self.grid.width(), self.grid.height()));
        }
        self.set_highlight(x, y, highlight);
        Ok(())
    }

    /// Set every cell's highlight, x-major, firing one event per cell
    pub fn set_all(&mut self, highlight: Highlight) {
        for x in 0..self.grid.width() as i32 {
            for y in 0..self.grid.height() as i32 {
                self.set_highlight(x, y, highlight);
            }
        }
    }

    /// Subscribe to per-cell change events of the underlying grid
    pub fn on_changed(&mut self, handler: impl FnMut(CellChanged) + 'static) -> SubscriptionId {
        self.grid.subscribe(handler)
    }

    /// Detach a per-cell change handler
    pub fn unsubscribe_changed(&mut self, id: SubscriptionId) -> bool {
        self.grid.unsubscribe(id)
    }

    /// Subscribe to load-complete notifications
    pub fn subscribe_loaded(
        &mut self,
        handler: impl FnMut(OverlayLoaded) + 'static,
    ) -> SubscriptionId {
        self.loaded.subscribe(handler)
    }

    /// Detach a load-complete handler
    pub fn unsubscribe_loaded(&mut self, id: SubscriptionId) -> bool {
        self.loaded.unsubscribe(id)
    }

    /// Hand this overlay to a presentation layer
    pub fn bind_visual(&mut self, visual: &mut impl VisualBinder) {
        debug!(
            width = self.grid.width(),
            height = self.grid.height(),
            "binding overlay visual"
        );
        visual.bind(self);
    }

    /// Capture every cell's highlight, x-major
    pub fn save(&self) -> OverlaySnapshot {
        OverlaySnapshot::capture(&self.grid)
    }

    /// Restore highlights from `snapshot`, then fire one load-complete event
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` or `OutOfRange` if the snapshot does not
    /// fit this grid. The overlay is left untouched and no event fires.
    pub fn load(&mut self, snapshot: &OverlaySnapshot) -> Result<()> {
        snapshot.apply(&mut self.grid)?;
        debug!(records = snapshot.len(), "loaded overlay snapshot");
        self.loaded.emit(OverlayLoaded);
        Ok(())
    }

    /// Save a snapshot into `store`
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails, or the store's error if it
    /// cannot persist the blob.
    pub fn save_to<S: SnapshotStore + ?Sized>(&self, store: &mut S) -> Result<SnapshotId> {
        let blob = self.save().to_bytes()?;
        let id = store.put(blob)?;
        debug!(id = id.0, "saved overlay snapshot");
        Ok(id)
    }

    /// Load the most recent snapshot from `store`
    ///
    /// # Errors
    ///
    /// Returns `SnapshotNotFound` if the store is empty, `Deserialization`
    /// for a corrupt blob, or any [`TileOverlay::load`] error. On error the
    /// overlay is left untouched.
    pub fn load_latest<S: SnapshotStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        let blob = store.get_latest()?.ok_or(GridError::SnapshotNotFound)?;
        let snapshot = OverlaySnapshot::from_bytes(&blob)?;
        self.load(&snapshot)
    }
}
