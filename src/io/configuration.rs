//! Grid constants and runtime configuration defaults

// Map shape used by the combat scene this overlay was built for
/// Default grid width in cells
pub const DEFAULT_WIDTH: u32 = 50;
/// Default grid height in cells
pub const DEFAULT_HEIGHT: u32 = 25;
/// Default edge length of one cell in world units
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: u32 = 10_000;

// Absorbs floating-point error when a position lies on a cell corner
/// Relative tolerance for snapping world positions onto cell boundaries
pub const CELL_SNAP_TOLERANCE: f64 = 1e-9;

// Snapshot file naming
/// Prefix of snapshot files written by the file store
pub const SNAPSHOT_FILE_PREFIX: &str = "save_";
/// Extension of snapshot files written by the file store
pub const SNAPSHOT_FILE_EXTENSION: &str = "json";
/// Directory used by the CLI when none is given
pub const DEFAULT_SAVE_DIR: &str = "saves";

// Label view glyphs
/// Glyph for a cell with no highlight
pub const GLYPH_NONE: char = '.';
/// Glyph for a cell highlighted as a move target
pub const GLYPH_MOVE: char = 'M';

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tilegrid=info";
