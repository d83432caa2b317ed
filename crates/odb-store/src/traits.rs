use std::path::{Path, PathBuf};

use odb_types::ObjectId;

use crate::error::StoreResult;
use crate::header::TypePolicy;
use crate::object::StoredObject;

/// Where one stored object lives.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectLocation {
    pub path: PathBuf,
    /// The id implied by a `<2 hex>/<38 hex>` path, if the path has that shape.
    pub id_hint: Option<ObjectId>,
}

impl ObjectLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id_hint = id_from_path(&path);
        Self { path, id_hint }
    }
}

fn id_from_path(path: &Path) -> Option<ObjectId> {
    let file = path.file_name()?.to_str()?;
    let fanout = path.parent()?.file_name()?.to_str()?;
    if fanout.len() != 2 || file.len() != 38 {
        return None;
    }
    ObjectId::from_hex(&format!("{fanout}{file}")).ok()
}

/// A collection of compressed object files.
///
/// Implementations enumerate and read; decoding is shared and lives in
/// [`StoredObject`]. Sources are read-only: nothing here writes or removes
/// objects.
pub trait ObjectSource: Send + Sync {
    /// Every object location, in a stable order.
    fn locations(&self) -> StoreResult<Vec<ObjectLocation>>;

    /// The compressed bytes stored at `location`.
    fn read(&self, location: &ObjectLocation) -> StoreResult<Vec<u8>>;

    /// Read and decode one object.
    ///
    /// Errors are attributed to the location's path.
    fn load(&self, location: &ObjectLocation, types: TypePolicy) -> StoreResult<StoredObject> {
        self.read(location)
            .and_then(|compressed| StoredObject::from_compressed(&compressed, types))
            .map_err(|e| e.in_object(&location.path))
    }
}
