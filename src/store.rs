/// Single-slot snapshot persistence.
///
/// One JSON record on disk per monitored site: the last snapshot the
/// cycle assembled. `save` replaces it atomically (write temp file, then
/// rename) so a reader never observes a torn record; `load` treats a
/// corrupt or unreadable record exactly like an absent one, logging the
/// problem and letting change detection start from no baseline.
///
/// No locking: the trigger scheduler guarantees at most one cycle runs at
/// a time.

use crate::model::Snapshot;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the most recently saved snapshot, or `None` when no prior
    /// snapshot exists or the persisted record cannot be read back.
    pub fn load(&self) -> Option<Snapshot> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                eprintln!(
                    "   ✗ snapshot store unreadable ({}): {}",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                eprintln!(
                    "   ✗ snapshot store corrupt ({}): {} — starting without a baseline",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persists `snapshot` as the sole record, atomically replacing any
    /// prior one.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
