//! Tests for the snapshot stores

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;
    use tilegrid::GridError;
    use tilegrid::io::store::{
        FileStore, MemoryStore, SnapshotId, SnapshotStore, parse_snapshot_name,
    };

    // Tests memory store returns the newest blob
    // Verified by returning the first blob
    #[test]
    fn test_memory_store_latest() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(matches!(store.get_latest(), Ok(None)));

        assert!(matches!(store.put(b"a".to_vec()), Ok(SnapshotId(0))));
        assert!(matches!(store.put(b"b".to_vec()), Ok(SnapshotId(1))));

        assert_eq!(store.get_latest().ok().flatten(), Some(b"b".to_vec()));
        assert_eq!(store.len(), 2);
    }

    // Tests missing directory reads as empty rather than an error
    // Verified by calling read_dir without the existence check
    #[test]
    fn test_file_store_missing_dir() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        let store = FileStore::new(temp.path().join("never_created"));

        assert!(matches!(store.get_latest(), Ok(None)));
        assert!(matches!(store.latest_id(), Ok(None)));
    }

    // Tests puts are numbered and the highest number wins
    // Verified by always writing save_0
    #[test]
    fn test_file_store_sequence() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        let mut store = FileStore::new(temp.path().join("saves"));

        assert!(matches!(store.put(b"first".to_vec()), Ok(SnapshotId(0))));
        assert!(matches!(store.put(b"second".to_vec()), Ok(SnapshotId(1))));

        assert!(store.path_for(SnapshotId(0)).is_file());
        assert!(store.path_for(SnapshotId(1)).ends_with("save_1.json"));
        assert_eq!(store.get_latest().ok().flatten(), Some(b"second".to_vec()));
    }

    // Tests unrelated and temporary files are ignored
    // Verified by accepting any file with the prefix
    #[test]
    fn test_file_store_ignores_foreign_files() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        let mut store = FileStore::new(temp.path());
        assert!(store.put(b"real".to_vec()).is_ok());

        for name in ["save_9.json.tmp", "notes.txt", "save_x.json", "save_12.txt"] {
            assert!(fs::write(temp.path().join(name), b"junk").is_ok());
        }

        assert!(matches!(store.latest_id(), Ok(Some(SnapshotId(0)))));
        assert_eq!(store.get_latest().ok().flatten(), Some(b"real".to_vec()));
        assert!(matches!(store.put(b"next".to_vec()), Ok(SnapshotId(1))));
    }

    // Tests numeric rather than lexical ordering of sequence numbers
    // Verified by comparing file names as strings
    #[test]
    fn test_file_store_numeric_order() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        assert!(fs::write(temp.path().join("save_9.json"), b"nine").is_ok());
        assert!(fs::write(temp.path().join("save_10.json"), b"ten").is_ok());

        let store = FileStore::new(temp.path());
        assert_eq!(store.get_latest().ok().flatten(), Some(b"ten".to_vec()));
    }

    // Tests file name parsing
    // Verified by dropping the extension check
    #[test]
    fn test_parse_snapshot_name() {
        assert_eq!(parse_snapshot_name("save_0.json"), Some(SnapshotId(0)));
        assert_eq!(parse_snapshot_name("save_42.json"), Some(SnapshotId(42)));
        assert_eq!(parse_snapshot_name("save_42json"), None);
        assert_eq!(parse_snapshot_name("save_.json"), None);
        assert_eq!(parse_snapshot_name("load_1.json"), None);
        assert_eq!(parse_snapshot_name("save_-1.json"), None);
    }

    // Tests only canonical decimal numbers name a snapshot
    // Verified by parsing the number with str::parse alone
    #[test]
    fn test_parse_snapshot_name_rejects_non_canonical_numbers() {
        assert_eq!(parse_snapshot_name("save_+7.json"), None);
        assert_eq!(parse_snapshot_name("save_07.json"), None);
        assert_eq!(parse_snapshot_name("save_ 7.json"), None);
        assert_eq!(parse_snapshot_name("save_7 .json"), None);
        assert_eq!(parse_snapshot_name("save_18446744073709551616.json"), None);
        assert_eq!(
            parse_snapshot_name("save_18446744073709551615.json"),
            Some(SnapshotId(u64::MAX))
        );
    }

    // Tests a signed file name is not mistaken for the snapshot it resembles
    // Verified by letting save_+7 count as snapshot 7
    #[test]
    fn test_file_store_ignores_signed_names() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        assert!(fs::write(temp.path().join("save_+7.json"), b"signed").is_ok());
        let mut store = FileStore::new(temp.path());

        assert!(matches!(store.latest_id(), Ok(None)));
        assert!(matches!(store.get_latest(), Ok(None)));
        assert!(matches!(store.put(b"real".to_vec()), Ok(SnapshotId(0))));
        assert_eq!(store.get_latest().ok().flatten(), Some(b"real".to_vec()));
    }

    // Tests the last sequence number is never followed by a wrapped one
    // Verified by computing the next id with wrapping addition
    #[test]
    fn test_file_store_exhausted_sequence() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        let last = temp.path().join("save_18446744073709551615.json");
        assert!(fs::write(&last, b"last").is_ok());
        let mut store = FileStore::new(temp.path());

        match store.put(b"overflow".to_vec()) {
            Err(GridError::FileSystem { operation, .. }) => {
                assert_eq!(operation, "allocate snapshot id");
            }
            other => unreachable!("expected exhausted sequence, got {other:?}"),
        }
        assert!(!store.path_for(SnapshotId(0)).exists());
        assert_eq!(store.get_latest().ok().flatten(), Some(b"last".to_vec()));
    }

    // Tests read failures name the snapshot file and the operation
    // Verified by converting the io error without path context
    #[test]
    fn test_file_store_read_error_keeps_path() {
        let Ok(temp) = TempDir::new() else {
            unreachable!("temp dir can be created");
        };
        let unreadable = temp.path().join("save_3.json");
        assert!(fs::create_dir(&unreadable).is_ok());
        let store = FileStore::new(temp.path());

        match store.get_latest() {
            Err(GridError::FileSystem {
                path, operation, ..
            }) => {
                assert_eq!(path, unreadable);
                assert_eq!(operation, "read");
            }
            other => unreachable!("expected read failure, got {other:?}"),
        }
    }
}
