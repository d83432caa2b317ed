use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use odb_crypto::ContentHasher;
use odb_types::ObjectId;

pub fn compress(raw: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

/// `"<kind> <len>\0"` followed by `payload`.
pub fn raw_object(kind: &str, payload: &[u8]) -> Vec<u8> {
    let mut raw = format!("{kind} {}\0", payload.len()).into_bytes();
    raw.extend_from_slice(payload);
    raw
}

pub fn tree_payload(entries: &[(&str, &str, [u8; 20])]) -> Vec<u8> {
    let mut payload = Vec::new();
    for (mode, name, digest) in entries {
        payload.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        payload.extend_from_slice(digest);
    }
    payload
}

/// Write `raw` compressed into `objects_dir` at its fan-out path.
pub fn write_loose(objects_dir: &Path, raw: &[u8]) -> (ObjectId, PathBuf) {
    let id = ContentHasher::digest(raw);
    let hex = id.to_hex();
    let dir = objects_dir.join(&hex[..2]);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(&hex[2..]);
    std::fs::write(&path, compress(raw)).unwrap();
    (id, path)
}
