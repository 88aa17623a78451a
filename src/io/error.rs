//! Error types for grid construction, strict writes and snapshot persistence

use std::fmt;
use std::path::PathBuf;

/// Main error type for all grid and overlay operations
#[derive(Debug)]
pub enum GridError {
    /// Construction parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Cell coordinates fall outside the grid
    ///
    /// Only strict writes and snapshot loads report this. Plain reads return
    /// `None` and plain writes are dropped.
    OutOfRange {
        /// Requested x index
        x: i32,
        /// Requested z index
        z: i32,
        /// Grid width in cells
        width: u32,
        /// Grid height in cells
        height: u32,
    },

    /// Snapshot holds more records than the grid has cells
    DimensionMismatch {
        /// Number of cells in the grid
        expected: usize,
        /// Number of records in the snapshot
        found: usize,
    },

    /// Load requested but the store holds no snapshot
    SnapshotNotFound,

    /// Snapshot blob could not be decoded
    Deserialization {
        /// Underlying decoder error
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded
    Serialization {
        /// Underlying encoder error
        source: serde_json::Error,
    },

    /// File system operation failure in a snapshot store
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfRange {
                x,
                z,
                width,
                height,
            } => {
                write!(
                    f,
                    "Cell ({x}, {z}) is outside the {width}x{height} grid"
                )
            }
            Self::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot has {found} records but the grid only has {expected} cells"
                )
            }
            Self::SnapshotNotFound => write!(f, "No saved snapshot was found"),
            Self::Deserialization { source } => {
                write!(f, "Failed to decode snapshot: {source}")
            }
            Self::Serialization { source } => {
                write!(f, "Failed to encode snapshot: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Deserialization { source } | Self::Serialization { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl GridError {
    /// Check whether this error means "nothing saved yet"
    ///
    /// Callers loading at startup treat this as "use defaults".
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SnapshotNotFound)
    }
}

/// Convenience type alias for grid results
pub type Result<T> = std::result::Result<T, GridError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GridError {
    GridError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-range error for a cell of a `width` x `height` grid
pub const fn out_of_range(x: i32, z: i32, width: u32, height: u32) -> GridError {
    GridError::OutOfRange {
        x,
        z,
        width,
        height,
    }
}

/// Wrap an I/O error with the path and operation that produced it
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> GridError {
    let path = path.into();
    move |source| GridError::FileSystem {
        path,
        operation,
        source,
    }
}
