//! World position to cell index mapping on the XZ plane

use num_traits::ToPrimitive;

use crate::io::configuration::{CELL_SNAP_TOLERANCE, MAX_GRID_DIMENSION};
use crate::io::error::{Result, invalid_parameter};
use crate::math::Vector3;

/// Immutable description of where a grid sits in the world
///
/// Cell `(x, z)` covers the half-open square starting at
/// `origin + (x, 0, z) * cell_size` with edge length `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpace {
    width: u32,
    height: u32,
    cell_size: f64,
    origin: Vector3,
}

impl CoordinateSpace {
    /// Validate and create a coordinate space
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero or exceeds
    /// `MAX_GRID_DIMENSION`, if `cell_size` is not a positive finite number,
    /// or if the origin has a non-finite component.
    pub fn new(width: u32, height: u32, cell_size: f64, origin: Vector3) -> Result<Self> {
        validate_dimension("width", width)?;
        validate_dimension("height", height)?;

        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                &"must be a positive finite number",
            ));
        }

        if !origin.is_finite() {
            return Err(invalid_parameter(
                "origin",
                &origin,
                &"components must be finite",
            ));
        }

        Ok(Self {
            width,
            height,
            cell_size,
            origin,
        })
    }

    /// Number of cells along x
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of cells along z
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Edge length of one cell in world units
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// World position of cell `(0, 0)`'s corner
    pub const fn origin(&self) -> Vector3 {
        self.origin
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check whether `(x, z)` addresses a cell
    pub const fn contains(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as u32) < self.width && (z as u32) < self.height
    }

    /// Dense x-major offset of `(x, z)`, or `None` outside the grid
    pub const fn offset(&self, x: i32, z: i32) -> Option<usize> {
        if self.contains(x, z) {
            Some(x as usize * self.height as usize + z as usize)
        } else {
            None
        }
    }

    /// Map a world position to the cell containing it
    ///
    /// No clamping is applied, so the result may lie outside the grid.
    /// Positions within `CELL_SNAP_TOLERANCE` (relative) of a cell corner
    /// resolve to that corner's cell, so `cell_to_world` round-trips for
    /// fractional cell sizes.
    /// Non-finite or unrepresentable positions map to `i32::MIN`, which is
    /// never in range.
    pub fn world_to_cell(&self, position: Vector3) -> (i32, i32) {
        let local = position - self.origin;
        (
            floor_to_index(local.x / self.cell_size),
            floor_to_index(local.z / self.cell_size),
        )
    }

    /// World position of the corner of cell `(x, z)`, on the origin's plane
    pub fn cell_to_world(&self, x: i32, z: i32) -> Vector3 {
        Vector3::ground(f64::from(x), f64::from(z)) * self.cell_size + self.origin
    }

    /// World position of the centre of cell `(x, z)`
    pub fn cell_center(&self, x: i32, z: i32) -> Vector3 {
        let half = self.cell_size * 0.5;
        self.cell_to_world(x, z) + Vector3::ground(half, half)
    }
}

fn validate_dimension(parameter: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}

// Ratios within rounding error of a boundary belong to the cell starting there
fn floor_to_index(cells: f64) -> i32 {
    let nearest = cells.round();
    let snapped = if (cells - nearest).abs() <= CELL_SNAP_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        cells.floor()
    };
    snapped.to_i32().unwrap_or(i32::MIN)
}
