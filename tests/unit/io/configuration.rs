//! Tests for configuration constants

#[cfg(test)]
mod tests {
    use tilegrid::io::configuration::{
        CELL_SNAP_TOLERANCE, DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, DEFAULT_LOG_FILTER,
        DEFAULT_SAVE_DIR, DEFAULT_WIDTH, GLYPH_MOVE, GLYPH_NONE, MAX_GRID_DIMENSION,
        SNAPSHOT_FILE_EXTENSION, SNAPSHOT_FILE_PREFIX,
    };

    // Tests default map shape
    // Verified by swapping width and height
    #[test]
    fn test_default_map_shape() {
        assert_eq!(DEFAULT_WIDTH, 50);
        assert_eq!(DEFAULT_HEIGHT, 25);
        assert!((DEFAULT_CELL_SIZE - 10.0).abs() < f64::EPSILON);
    }

    // Tests defaults fit inside the dimension limit
    // Verified by lowering the limit below the default width
    #[test]
    fn test_defaults_within_limit() {
        assert_eq!(MAX_GRID_DIMENSION, 10_000);
        assert!(DEFAULT_WIDTH <= MAX_GRID_DIMENSION);
        assert!(DEFAULT_HEIGHT <= MAX_GRID_DIMENSION);
    }

    // Tests corner snapping stays far below one cell at the largest grid
    // Verified by raising the tolerance to 1e-3
    #[test]
    fn test_snap_tolerance_is_small() {
        assert!(CELL_SNAP_TOLERANCE > 0.0);
        assert!(CELL_SNAP_TOLERANCE * f64::from(MAX_GRID_DIMENSION) < 1e-4);
    }

    // Tests snapshot file naming is filesystem safe
    // Verified by adding a path separator to the prefix
    #[test]
    fn test_snapshot_naming() {
        for ch in SNAPSHOT_FILE_PREFIX.chars().chain(SNAPSHOT_FILE_EXTENSION.chars()) {
            assert!(
                ch.is_alphanumeric() || ch == '_',
                "Snapshot naming contains invalid character: {ch}"
            );
        }
        assert!(!SNAPSHOT_FILE_EXTENSION.starts_with('.'));
        assert!(!DEFAULT_SAVE_DIR.is_empty());
    }

    // Tests label glyphs are distinct and printable
    // Verified by using a space for both glyphs
    #[test]
    fn test_glyphs_distinct() {
        assert_ne!(GLYPH_NONE, GLYPH_MOVE);
        assert!(!GLYPH_NONE.is_whitespace());
        assert!(!GLYPH_MOVE.is_whitespace());
    }

    // Tests default log filter targets this crate
    // Verified by changing the target name
    #[test]
    fn test_log_filter() {
        assert!(DEFAULT_LOG_FILTER.starts_with("tilegrid="));
    }
}
