//! Loose object decoding for odb.
//!
//! This crate reads the object store of a git repository, the
//! `.git/objects/` directory, and turns every loose object file into a typed
//! [`StoredObject`]. It never writes to the store.
//!
//! # Pipeline
//!
//! Each object file flows strictly left to right:
//!
//! 1. [`inflate`] -- zlib-decompress the whole file
//! 2. [`ContentHasher`](odb_crypto::ContentHasher) -- SHA-1 of the raw buffer
//! 3. [`split_header`] / [`parse_header`] -- `<type> <size>\0`
//! 4. [`decode_content`] -- opaque text, or tree entries read with a cursor
//! 5. [`StoredObject::decode`] -- assemble; all stages succeed or none
//!
//! # Sources
//!
//! All sources implement the [`ObjectSource`] trait:
//!
//! - [`LooseObjectDir`] -- `objects/<2 hex>/<38 hex>` on disk
//! - [`InMemoryObjectSource`] -- compressed files held in memory
//!
//! # Design Rules
//!
//! 1. Digests are computed over the exact decompressed bytes, header included.
//! 2. Tree digests are consumed as exactly 20 bytes, NUL or not.
//! 3. The declared size is reported as-is, never corrected.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod decode;
pub mod error;
pub mod header;
pub mod inflate;
pub mod inventory;
pub mod loose;
pub mod memory;
pub mod object;
pub mod segment;
pub mod traits;

#[cfg(test)]
mod test_support;

// Re-export primary types at crate root for ergonomic imports.
pub use decode::{decode_content, decode_tree};
pub use error::{StoreError, StoreResult};
pub use header::{parse_header, Header, TypePolicy};
pub use inflate::inflate;
pub use inventory::{
    inventory, scan, ErrorPolicy, Inventory, InventorySummary, ScanFailure, ScanOptions,
};
pub use loose::LooseObjectDir;
pub use memory::InMemoryObjectSource;
pub use object::{DirectoryContent, DirectoryEntry, EntryMode, ObjectContent, StoredObject};
pub use segment::{split_header, split_segments};
pub use traits::{ObjectLocation, ObjectSource};
