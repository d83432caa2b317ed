//! Whole-store scans.
//!
//! [`scan`] lists every location of an [`ObjectSource`] and decodes each one
//! independently. What happens on a failing object is chosen by
//! [`ErrorPolicy`]: stop at once (no inventory) or record and continue.

use std::path::{Path, PathBuf};

use odb_types::ObjectType;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::header::TypePolicy;
use crate::loose::LooseObjectDir;
use crate::object::StoredObject;
use crate::traits::ObjectSource;

/// What a scan does when one object fails to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the scan and return the error.
    #[default]
    FailFast,
    /// Record the failure in [`Inventory::failures`] and keep going.
    Collect,
}

/// Options for [`scan`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub errors: ErrorPolicy,
    pub types: TypePolicy,
}

/// An object that could not be decoded during a collecting scan.
#[derive(Debug)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub error: StoreError,
}

/// Result of a scan: decoded objects in location order, plus failures.
#[derive(Debug, Default)]
pub struct Inventory {
    pub objects: Vec<StoredObject>,
    /// Always empty under [`ErrorPolicy::FailFast`].
    pub failures: Vec<ScanFailure>,
}

/// Object counts by type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub blobs: usize,
    pub trees: usize,
    pub commits: usize,
    pub tags: usize,
    pub unknown: usize,
    pub failures: usize,
}

impl InventorySummary {
    pub fn total(&self) -> usize {
        self.blobs + self.trees + self.commits + self.tags + self.unknown
    }
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn summary(&self) -> InventorySummary {
        let mut summary = InventorySummary {
            failures: self.failures.len(),
            ..InventorySummary::default()
        };
        for obj in &self.objects {
            match obj.kind {
                ObjectType::Blob => summary.blobs += 1,
                ObjectType::Tree => summary.trees += 1,
                ObjectType::Commit => summary.commits += 1,
                ObjectType::Tag => summary.tags += 1,
                ObjectType::Unknown(_) => summary.unknown += 1,
            }
        }
        summary
    }
}

/// Decode every object in `source`.
pub fn scan(source: &dyn ObjectSource, options: &ScanOptions) -> StoreResult<Inventory> {
    let locations = source.locations()?;
    let mut inventory = Inventory {
        objects: Vec::with_capacity(locations.len()),
        failures: Vec::new(),
    };

    for location in &locations {
        match source.load(location, options.types) {
            Ok(obj) => {
                if let Some(hint) = location.id_hint.filter(|hint| *hint != obj.digest) {
                    warn!(
                        path = %location.path.display(),
                        expected = %hint,
                        computed = %obj.digest,
                        "object digest does not match its file name"
                    );
                }
                debug!(
                    digest = %obj.digest.short_hex(),
                    kind = %obj.kind,
                    size = obj.size,
                    "decoded object"
                );
                inventory.objects.push(obj);
            }
            Err(error) => match options.errors {
                ErrorPolicy::FailFast => return Err(error),
                ErrorPolicy::Collect => {
                    warn!(path = %location.path.display(), %error, "skipping undecodable object");
                    inventory.failures.push(ScanFailure {
                        path: location.path.clone(),
                        error,
                    });
                }
            },
        }
    }

    info!(
        objects = inventory.objects.len(),
        failures = inventory.failures.len(),
        "inventory complete"
    );
    Ok(inventory)
}

/// Open the repository at `root` and scan its loose objects.
pub fn inventory(root: impl AsRef<Path>, options: &ScanOptions) -> StoreResult<Inventory> {
    let store = LooseObjectDir::open(root)?;
    scan(&store, options)
}
