//! Foundation types for odb.
//!
//! This crate provides the identity and classification types shared by the
//! rest of the workspace. Every other odb crate depends on `odb-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Content-addressed identifier (20-byte SHA-1 digest)
//! - [`ObjectType`] — Type tag read from a stored object's header

pub mod error;
pub mod kind;
pub mod object;

pub use error::TypeError;
pub use kind::ObjectType;
pub use object::{ObjectId, OBJECT_ID_LEN};
