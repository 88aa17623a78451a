//! Snapshot persistence boundary and two stores implementing it
//!
//! Stores see opaque blobs. Encoding and decoding belong to the overlay.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::io::configuration::{SNAPSHOT_FILE_EXTENSION, SNAPSHOT_FILE_PREFIX};
use crate::io::error::{Result, file_system};

/// Identifier assigned to a stored blob; later puts get larger ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(pub u64);

/// Key-value blob store that overlays save into
pub trait SnapshotStore {
    /// Store a blob and return its id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the blob.
    fn put(&mut self, blob: Vec<u8>) -> Result<SnapshotId>;

    /// Fetch the most recently stored blob, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_latest(&self) -> Result<Option<Vec<u8>>>;
}

/// In-process store, newest blob last
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Vec<Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self { blobs: Vec::new() }
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Check whether nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn put(&mut self, blob: Vec<u8>) -> Result<SnapshotId> {
        let id = SnapshotId(self.blobs.len() as u64);
        self.blobs.push(blob);
        Ok(id)
    }

    fn get_latest(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.last().cloned())
    }
}

/// Directory of numbered snapshot files
///
/// Each put writes `save_<n>.json` with `n` one past the highest existing
/// number, going through a temporary file and a rename so a crash never
/// leaves a half-written snapshot under the final name. A put after
/// `save_18446744073709551615.json` fails rather than reusing a number.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for snapshots; it is created on the first put
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the snapshot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot file with sequence number `id`
    pub fn path_for(&self, id: SnapshotId) -> PathBuf {
        self.dir.join(format!(
            "{SNAPSHOT_FILE_PREFIX}{}.{SNAPSHOT_FILE_EXTENSION}",
            id.0
        ))
    }

    /// Highest sequence number present, if any
    ///
    /// # Errors
    ///
    /// Returns `FileSystem` if the directory exists but cannot be listed.
    pub fn latest_id(&self) -> Result<Option<SnapshotId>> {
        if !self.dir.is_dir() {
            return Ok(None);
        }

        let entries = fs::read_dir(&self.dir).map_err(file_system(&self.dir, "list snapshots"))?;

        let mut latest = None;
        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(dir = %self.dir.display(), %error, "skipping unreadable entry");
                    continue;
                }
            };
            if let Some(id) = parse_snapshot_name(&entry.file_name().to_string_lossy()) {
                latest = latest.max(Some(id));
            }
        }

        Ok(latest)
    }
}

impl SnapshotStore for FileStore {
    fn put(&mut self, blob: Vec<u8>) -> Result<SnapshotId> {
        fs::create_dir_all(&self.dir).map_err(file_system(&self.dir, "create directory"))?;

        let id = match self.latest_id()? {
            None => SnapshotId(0),
            Some(SnapshotId(n)) => n.checked_add(1).map(SnapshotId).ok_or_else(|| {
                file_system(&self.dir, "allocate snapshot id")(io::Error::other(format!(
                    "no sequence number follows {n}"
                )))
            })?,
        };
        let final_path = self.path_for(id);
        let tmp_path = final_path.with_extension(format!("{SNAPSHOT_FILE_EXTENSION}.tmp"));

        {
            let mut file =
                fs::File::create(&tmp_path).map_err(file_system(&tmp_path, "create"))?;
            file.write_all(&blob)
                .map_err(file_system(&tmp_path, "write"))?;
            file.sync_all().map_err(file_system(&tmp_path, "sync"))?;
        }
        fs::rename(&tmp_path, &final_path).map_err(file_system(&final_path, "rename"))?;

        debug!(path = %final_path.display(), bytes = blob.len(), "stored snapshot");
        Ok(id)
    }

    fn get_latest(&self) -> Result<Option<Vec<u8>>> {
        let Some(id) = self.latest_id()? else {
            return Ok(None);
        };
        let path = self.path_for(id);
        let blob = fs::read(&path).map_err(file_system(&path, "read"))?;
        Ok(Some(blob))
    }
}

/// Sequence number of a snapshot file name, `None` for other files
///
/// Only names `FileStore::path_for` could have produced are accepted: plain
/// ASCII digits without a sign or leading zeros, so neither `save_+7.json`
/// nor `save_07.json` is snapshot 7.
pub fn parse_snapshot_name(name: &str) -> Option<SnapshotId> {
    let digits = name
        .strip_prefix(SNAPSHOT_FILE_PREFIX)?
        .strip_suffix(SNAPSHOT_FILE_EXTENSION)?
        .strip_suffix('.')?;
    let canonical = match digits.as_bytes() {
        [] | [b'0', _, ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };
    if !canonical {
        return None;
    }
    digits.parse().ok().map(SnapshotId)
}
