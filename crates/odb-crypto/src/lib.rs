//! Content hashing for odb.
//!
//! Computes the SHA-1 digest that names every stored object. The digest is
//! taken over the complete decompressed representation, header included.
//!
//! All crypto operations wrap established libraries — no custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
