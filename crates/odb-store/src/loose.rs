use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ObjectLocation, ObjectSource};

/// Loose objects on disk: `objects/<2 hex>/<38 hex>`, each file zlib-compressed.
#[derive(Clone, Debug)]
pub struct LooseObjectDir {
    objects_dir: PathBuf,
}

impl LooseObjectDir {
    /// Locate the object directory of the repository at `root`.
    ///
    /// Tries `<root>/.git/objects` (work tree) then `<root>/objects` (bare).
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref();
        let candidates = [root.join(".git").join("objects"), root.join("objects")];
        let objects_dir = candidates
            .into_iter()
            .find(|dir| dir.is_dir())
            .ok_or_else(|| StoreError::NotARepository(root.to_path_buf()))?;
        debug!(objects_dir = %objects_dir.display(), "opened object directory");
        Ok(Self { objects_dir })
    }

    /// Use `objects_dir` directly, without looking for a repository around it.
    pub fn at(objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
        }
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }
}

/// Two lowercase hex digits: the fan-out directories holding loose objects.
fn is_fanout_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().as_encoded_bytes();
    entry.file_type().is_dir()
        && name.len() == 2
        && name.iter().all(|&b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

impl ObjectSource for LooseObjectDir {
    fn locations(&self) -> StoreResult<Vec<ObjectLocation>> {
        let walker = WalkDir::new(&self.objects_dir)
            .min_depth(1)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() != 1 || is_fanout_dir(e));

        let mut locations = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.depth() == 2 && entry.file_type().is_file() {
                locations.push(ObjectLocation::new(entry.into_path()));
            }
        }
        debug!(count = locations.len(), "listed loose objects");
        Ok(locations)
    }

    fn read(&self, location: &ObjectLocation) -> StoreResult<Vec<u8>> {
        std::fs::read(&location.path).map_err(|e| StoreError::io(&location.path, e))
    }
}
