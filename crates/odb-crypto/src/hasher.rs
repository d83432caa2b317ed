use odb_types::{ObjectId, OBJECT_ID_LEN};
use sha1::{Digest, Sha1};

/// SHA-1 content hasher for stored objects.
///
/// An object's identity is the digest of its full raw representation:
/// `"<type> <size>\0"` followed by the payload. The header acts as the
/// domain tag, so a blob and a tree with identical payload bytes produce
/// different ids.
pub struct ContentHasher;

impl ContentHasher {
    /// Digest a complete raw object buffer (header + payload), exactly as
    /// decompressed.
    pub fn digest(raw: &[u8]) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(raw);
        let mut out = [0u8; OBJECT_ID_LEN];
        out.copy_from_slice(&hasher.finalize());
        ObjectId::from_hash(out)
    }
}
