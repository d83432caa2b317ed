use odb_types::{ObjectId, ObjectType, OBJECT_ID_LEN};

use crate::error::{StoreError, StoreResult};
use crate::object::{DirectoryContent, DirectoryEntry, ObjectContent};
use crate::segment::split_segments;

/// Forward-only reader over a payload.
struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes up to the next NUL, consuming the NUL. `None` if there is no NUL.
    fn read_until_nul(&mut self) -> Option<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let len = rest.iter().position(|&b| b == 0)?;
        self.pos += len + 1;
        Some(&rest[..len])
    }

    /// Exactly `n` bytes, whatever they contain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.remaining() < n {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }
}

/// Decode a payload according to its declared type.
///
/// Trees decode as directory entries; blobs, commits and tags as opaque text.
/// For these four kinds the declared type wins over the segment count, so a
/// blob whose payload contains NUL bytes is still opaque. For an unrecognized
/// type the NUL layout of the whole `raw` buffer decides:
/// exactly two segments (header + one payload) is opaque, anything else is
/// read as a tree.
pub fn decode_content(
    kind: &ObjectType,
    raw: &[u8],
    payload: &[u8],
) -> StoreResult<ObjectContent> {
    let as_tree = match kind {
        ObjectType::Tree => true,
        ObjectType::Blob | ObjectType::Commit | ObjectType::Tag => false,
        ObjectType::Unknown(_) => split_segments(raw).len() != 2,
    };

    if as_tree {
        Ok(ObjectContent::Directory(decode_tree(payload)?))
    } else {
        Ok(ObjectContent::Opaque(
            String::from_utf8_lossy(payload).into_owned(),
        ))
    }
}

/// Decode a tree payload: a sequence of `<mode> <name>\0<20-byte digest>`.
///
/// The digest is always consumed as exactly 20 bytes, so NUL bytes inside a
/// digest never shift record alignment. An empty payload is an empty tree.
pub fn decode_tree(payload: &[u8]) -> StoreResult<DirectoryContent> {
    let mut cursor = ByteCursor::new(payload);
    let mut entries = Vec::new();

    while !cursor.is_empty() {
        let offset = cursor.position();
        let prefix = cursor.read_until_nul().ok_or_else(|| {
            StoreError::malformed_tree(offset, "entry header is not NUL-terminated")
        })?;
        let (mode, name) = split_mode_name(prefix).ok_or_else(|| {
            StoreError::malformed_tree(
                offset,
                format!(
                    "expected \"<mode> <name>\", got {:?}",
                    String::from_utf8_lossy(prefix)
                ),
            )
        })?;

        let digest_at = cursor.position();
        let remaining = cursor.remaining();
        let digest = cursor.take(OBJECT_ID_LEN).ok_or_else(|| {
            StoreError::malformed_tree(
                digest_at,
                format!("expected {OBJECT_ID_LEN} digest bytes, found {remaining}"),
            )
        })?;
        let hash = ObjectId::from_slice(digest)
            .map_err(|e| StoreError::malformed_tree(digest_at, e.to_string()))?;

        entries.push(DirectoryEntry {
            name: String::from_utf8_lossy(name).into_owned(),
            mode: String::from_utf8_lossy(mode).into_owned(),
            hash,
        });
    }

    Ok(DirectoryContent::new(entries))
}

/// Split `<mode> <name>` on the first space; both sides must be non-empty.
fn split_mode_name(prefix: &[u8]) -> Option<(&[u8], &[u8])> {
    let space = prefix.iter().position(|&b| b == b' ')?;
    let (mode, name) = (&prefix[..space], &prefix[space + 1..]);
    if mode.is_empty() || name.is_empty() {
        return None;
    }
    Some((mode, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tree_payload;

    fn digest(fill: u8) -> [u8; 20] {
        [fill; 20]
    }

    #[test]
    fn single_entry() {
        let payload = tree_payload(&[("100644", "file.txt", digest(0xaa))]);
        let tree = decode_tree(&payload).unwrap();
        assert_eq!(tree.len(), 1);
        let entry = &tree.files[0];
        assert_eq!(entry.name, "file.txt");
        assert_eq!(entry.mode, "100644");
        assert_eq!(entry.hash.to_hex(), "aa".repeat(20));
    }

    #[test]
    fn multiple_entries_keep_file_order() {
        let payload = tree_payload(&[
            ("100644", "b.txt", digest(1)),
            ("40000", "a-dir", digest(2)),
            ("100755", "run.sh", digest(3)),
        ]);
        let tree = decode_tree(&payload).unwrap();
        let names: Vec<&str> = tree.files.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b.txt", "a-dir", "run.sh"]);
        assert_eq!(tree.files[1].mode, "40000");
        assert_eq!(tree.files[2].hash, ObjectId::from_hash(digest(3)));
    }

    #[test]
    fn name_may_contain_spaces() {
        let payload = tree_payload(&[("100644", "my notes.txt", digest(9))]);
        let tree = decode_tree(&payload).unwrap();
        assert_eq!(tree.files[0].name, "my notes.txt");
        assert_eq!(tree.files[0].mode, "100644");
    }

    #[test]
    fn digests_containing_nul_keep_alignment() {
        let mut first = digest(0x10);
        first[0] = 0;
        first[19] = 0;
        let second = [0u8; 20];
        let payload = tree_payload(&[("100644", "a", first), ("100644", "b", second)]);
        let tree = decode_tree(&payload).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.files[0].hash, ObjectId::from_hash(first));
        assert_eq!(tree.files[1].name, "b");
        assert!(tree.files[1].hash.is_null());
    }

    #[test]
    fn empty_payload_is_empty_tree() {
        assert!(decode_tree(b"").unwrap().is_empty());
    }

    #[test]
    fn prefix_without_space_is_malformed() {
        let mut payload = b"100644file\0".to_vec();
        payload.extend_from_slice(&digest(1));
        let err = decode_tree(&payload).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTree { offset: 0, .. }));
    }

    #[test]
    fn empty_mode_or_name_is_malformed() {
        for prefix in [&b" file"[..], &b"100644 "[..]] {
            let mut payload = prefix.to_vec();
            payload.push(0);
            payload.extend_from_slice(&digest(1));
            assert!(matches!(
                decode_tree(&payload),
                Err(StoreError::MalformedTree { .. })
            ));
        }
    }

    #[test]
    fn short_digest_is_malformed() {
        let mut payload = b"100644 file\0".to_vec();
        payload.extend_from_slice(&[7u8; 19]);
        let err = decode_tree(&payload).unwrap_err();
        match err {
            StoreError::MalformedTree { offset, reason } => {
                assert_eq!(offset, 12);
                assert!(reason.contains("found 19"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_second_prefix_is_malformed() {
        let mut payload = tree_payload(&[("100644", "a", digest(1))]);
        payload.extend_from_slice(b"100644 b");
        let err = decode_tree(&payload).unwrap_err();
        assert!(matches!(err, StoreError::MalformedTree { offset: 29, .. }));
    }

    #[test]
    fn declared_kind_selects_decoder() {
        let payload = b"hello\0world";
        let mut raw = b"blob 11\0".to_vec();
        raw.extend_from_slice(payload);
        let content = decode_content(&ObjectType::Blob, &raw, payload).unwrap();
        assert_eq!(content, ObjectContent::Opaque("hello\0world".into()));
    }

    #[test]
    fn unknown_kind_with_single_payload_segment_is_opaque() {
        let raw = b"widget 3\0abc";
        let content = decode_content(&ObjectType::Unknown("widget".into()), raw, b"abc").unwrap();
        assert_eq!(content, ObjectContent::Opaque("abc".into()));
    }

    #[test]
    fn unknown_kind_with_records_is_directory() {
        let payload = tree_payload(&[("100644", "x", digest(4))]);
        let mut raw = format!("widget {}\0", payload.len()).into_bytes();
        raw.extend_from_slice(&payload);
        let content =
            decode_content(&ObjectType::Unknown("widget".into()), &raw, &payload).unwrap();
        assert_eq!(content.as_directory().map(|d| d.len()), Some(1));
    }
}
