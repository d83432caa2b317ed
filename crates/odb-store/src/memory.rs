use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::RwLock;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use odb_crypto::ContentHasher;
use odb_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ObjectLocation, ObjectSource};

/// In-memory object source.
///
/// Intended for tests and embedding. Compressed object files are held behind a
/// `RwLock`, keyed by their relative path, and listed in path order.
pub struct InMemoryObjectSource {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl InMemoryObjectSource {
    /// Create a new empty source.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store already-compressed bytes at `path`, replacing any previous file.
    pub fn insert(&self, path: impl Into<PathBuf>, compressed: Vec<u8>) {
        self.files
            .write()
            .expect("lock poisoned")
            .insert(path.into(), compressed);
    }

    /// Compress a raw object and store it at its `<2 hex>/<38 hex>` path.
    pub fn insert_raw(&self, raw: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::digest(raw);
        let hex = id.to_hex();
        let path = PathBuf::from(&hex[..2]).join(&hex[2..]);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(raw).map_err(|e| StoreError::io(&path, e))?;
        let compressed = encoder.finish().map_err(|e| StoreError::io(&path, e))?;
        self.insert(path, compressed);
        Ok(id)
    }

    /// Number of files currently held.
    pub fn len(&self) -> usize {
        self.files.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.files.read().expect("lock poisoned").is_empty()
    }

}

impl Default for InMemoryObjectSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectSource for InMemoryObjectSource {
    fn locations(&self) -> StoreResult<Vec<ObjectLocation>> {
        let files = self.files.read().expect("lock poisoned");
        Ok(files.keys().cloned().map(ObjectLocation::new).collect())
    }

    fn read(&self, location: &ObjectLocation) -> StoreResult<Vec<u8>> {
        let files = self.files.read().expect("lock poisoned");
        files.get(&location.path).cloned().ok_or_else(|| {
            StoreError::io(
                &location.path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such object file"),
            )
        })
    }
}
