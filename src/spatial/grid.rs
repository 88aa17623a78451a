//! Generic dense cell grid with world-space lookup and change notification
//!
//! A `Grid<T>` owns one `T` per cell, built by a caller-supplied factory when
//! the grid is created. Reads outside the grid return `None` and plain writes
//! outside it are dropped, because hover and edge-of-map probes routinely step
//! off the map. Every accepted write, and every explicit `trigger_changed`,
//! is delivered synchronously to the grid's own subscribers.
//!
//! The grid is single-threaded: handlers are not `Send`, so neither is the
//! grid. Code that needs the cells on another thread must copy them out or put
//! its own lock around the whole grid.

use ndarray::Array2;
use tracing::trace;

use crate::io::error::{Result, invalid_parameter, out_of_range};
use crate::math::Vector3;
use crate::spatial::coordinates::CoordinateSpace;
use crate::spatial::events::{CellChanged, Observers, SubscriptionId};

/// Builds the initial payload of one cell
///
/// Called exactly once per cell, x-major (x outer, z inner). The coordinate
/// space is fully set up before the first call, but no other cell exists yet.
pub trait CellFactory<T> {
    /// Create the value stored at `(x, z)`
    fn create(&mut self, space: &CoordinateSpace, x: i32, z: i32) -> T;
}

impl<T, F> CellFactory<T> for F
where
    F: FnMut(&CoordinateSpace, i32, i32) -> T,
{
    fn create(&mut self, space: &CoordinateSpace, x: i32, z: i32) -> T {
        self(space, x, z)
    }
}

/// Two-dimensional cell container laid over the world's XZ plane
#[derive(Debug)]
pub struct Grid<T> {
    space: CoordinateSpace,
    // Shape (width, height), so element [x, z] sits at offset x * height + z
    cells: Array2<T>,
    changed: Observers<CellChanged>,
}

impl<T> Grid<T> {
    /// Create a grid and populate every cell through `factory`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the dimensions, cell size or origin are
    /// rejected by [`CoordinateSpace::new`].
    pub fn new(
        width: u32,
        height: u32,
        cell_size: f64,
        origin: Vector3,
        factory: impl CellFactory<T>,
    ) -> Result<Self> {
        let space = CoordinateSpace::new(width, height, cell_size, origin)?;
        Self::with_space(space, factory)
    }

    /// Create a grid over an already validated coordinate space
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the cell storage cannot take the grid's
    /// shape.
    pub fn with_space(space: CoordinateSpace, mut factory: impl CellFactory<T>) -> Result<Self> {
        let mut cells = Vec::with_capacity(space.cell_count());
        for x in 0..space.width() as i32 {
            for z in 0..space.height() as i32 {
                cells.push(factory.create(&space, x, z));
            }
        }

        let shape = (space.width() as usize, space.height() as usize);
        let cells = Array2::from_shape_vec(shape, cells).map_err(|error| {
            invalid_parameter("cells", &error, &"storage does not match grid shape")
        })?;

        Ok(Self {
            space,
            cells,
            changed: Observers::new(),
        })
    }

    /// Number of cells along x
    pub const fn width(&self) -> u32 {
        self.space.width()
    }

    /// Number of cells along z
    pub const fn height(&self) -> u32 {
        self.space.height()
    }

    /// Edge length of one cell in world units
    pub const fn cell_size(&self) -> f64 {
        self.space.cell_size()
    }

    /// World position of cell `(0, 0)`'s corner
    pub const fn origin(&self) -> Vector3 {
        self.space.origin()
    }

    /// The coordinate space this grid was built over
    pub const fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    /// Check whether `(x, z)` addresses a cell
    pub const fn contains(&self, x: i32, z: i32) -> bool {
        self.space.contains(x, z)
    }

    /// Map a world position to a cell index, possibly out of range
    pub fn world_to_cell(&self, position: Vector3) -> (i32, i32) {
        self.space.world_to_cell(position)
    }

    /// World position of the corner of cell `(x, z)`
    pub fn cell_to_world(&self, x: i32, z: i32) -> Vector3 {
        self.space.cell_to_world(x, z)
    }

    /// Read the cell at `(x, z)`, or `None` outside the grid
    pub fn get(&self, x: i32, z: i32) -> Option<&T> {
        if !self.space.contains(x, z) {
            return None;
        }
        self.cells.get([x as usize, z as usize])
    }

    /// Read the cell containing a world position
    pub fn get_world(&self, position: Vector3) -> Option<&T> {
        let (x, z) = self.space.world_to_cell(position);
        self.get(x, z)
    }

    /// Borrow a cell mutably without notifying subscribers
    ///
    /// Pair with [`Grid::trigger_changed`] once the edit is done, or use
    /// [`Grid::update`] which does both.
    pub fn get_mut(&mut self, x: i32, z: i32) -> Option<&mut T> {
        if !self.space.contains(x, z) {
            return None;
        }
        self.cells.get_mut([x as usize, z as usize])
    }

    /// Replace the cell at `(x, z)` and notify subscribers
    ///
    /// Writes outside the grid are dropped without an event.
    pub fn set(&mut self, x: i32, z: i32, value: T) {
        if self.try_set(x, z, value).is_err() {
            trace!(x, z, "dropped out-of-range cell write");
        }
    }

    /// Replace the cell containing a world position and notify subscribers
    pub fn set_world(&mut self, position: Vector3, value: T) {
        let (x, z) = self.space.world_to_cell(position);
        self.set(x, z, value);
    }

    /// Replace the cell at `(x, z)`, reporting writes outside the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `(x, z)` is not a cell; the grid is unchanged
    /// and no event fires.
    pub fn try_set(&mut self, x: i32, z: i32, value: T) -> Result<()> {
        let space = self.space;
        let cell = self
            .get_mut(x, z)
            .ok_or_else(|| out_of_range(x, z, space.width(), space.height()))?;
        *cell = value;
        self.changed.emit(CellChanged { x, z });
        Ok(())
    }

    /// Edit the cell at `(x, z)` in place and notify subscribers
    ///
    /// Returns `false`, without calling `edit` or firing an event, outside
    /// the grid.
    pub fn update(&mut self, x: i32, z: i32, edit: impl FnOnce(&mut T)) -> bool {
        let Some(cell) = self.get_mut(x, z) else {
            return false;
        };
        edit(cell);
        self.changed.emit(CellChanged { x, z });
        true
    }

    /// Notify subscribers that `(x, z)` changed without touching storage
    ///
    /// Used after editing a cell through [`Grid::get_mut`]. Coordinates
    /// outside the grid are ignored.
    pub fn trigger_changed(&mut self, x: i32, z: i32) {
        if self.space.contains(x, z) {
            self.changed.emit(CellChanged { x, z });
        }
    }

    /// Register a change handler, run after earlier handlers
    pub fn subscribe(&mut self, handler: impl FnMut(CellChanged) + 'static) -> SubscriptionId {
        self.changed.subscribe(handler)
    }

    /// Detach a change handler, returning whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }

    /// Number of registered change handlers
    pub fn subscriber_count(&self) -> usize {
        self.changed.len()
    }

    /// Iterate over all cells x-major, yielding `((x, z), cell)`
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &T)> {
        self.cells
            .indexed_iter()
            .map(|((x, z), cell)| ((x as i32, z as i32), cell))
    }
}
