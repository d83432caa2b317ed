use odb_crypto::ContentHasher;
use odb_types::{ObjectId, ObjectType};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decode::decode_content;
use crate::error::StoreResult;
use crate::header::{parse_header, Header, TypePolicy};
use crate::inflate::inflate;
use crate::segment::split_header;

/// One decoded object from the store.
///
/// Built once per object file and never modified. Serializes as
/// `{"Type", "Size", "Digest", "Content"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Type tag from the header.
    #[serde(rename = "Type")]
    pub kind: ObjectType,
    /// Payload size declared in the header.
    #[serde(rename = "Size")]
    pub size: u64,
    /// SHA-1 of the full decompressed buffer, header included.
    #[serde(rename = "Digest")]
    pub digest: ObjectId,
    #[serde(rename = "Content")]
    pub content: ObjectContent,
}

impl StoredObject {
    /// Decompress and decode one object file's bytes.
    pub fn from_compressed(compressed: &[u8], types: TypePolicy) -> StoreResult<Self> {
        let raw = inflate(compressed)?;
        Self::decode(&raw, types)
    }

    /// Decode a raw (already decompressed) object buffer.
    ///
    /// Either every stage succeeds and a complete object is returned, or the
    /// first failure is.
    pub fn decode(raw: &[u8], types: TypePolicy) -> StoreResult<Self> {
        let digest = ContentHasher::digest(raw);
        let (header, payload) = split_header(raw)?;
        let Header { kind, size } = parse_header(header, types)?;

        if size != payload.len() as u64 {
            warn!(
                digest = %digest,
                declared = size,
                actual = payload.len(),
                "declared size differs from payload length"
            );
        }

        let content = decode_content(&kind, raw, payload)?;
        Ok(Self {
            kind,
            size,
            digest,
            content,
        })
    }

    /// Tree entries, if this object decoded as a directory.
    pub fn entries(&self) -> Option<&[DirectoryEntry]> {
        self.content.as_directory().map(|d| d.files.as_slice())
    }
}

/// Decoded payload of a [`StoredObject`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectContent {
    /// Payload kept as text (lossy UTF-8).
    Opaque(String),
    /// Tree records.
    Directory(DirectoryContent),
}

impl ObjectContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Opaque(text) => Some(text),
            Self::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryContent> {
        match self {
            Self::Opaque(_) => None,
            Self::Directory(dir) => Some(dir),
        }
    }
}

/// Entries of a tree object, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryContent {
    #[serde(rename = "Files")]
    pub files: Vec<DirectoryEntry>,
}

impl DirectoryContent {
    pub fn new(files: Vec<DirectoryEntry>) -> Self {
        Self { files }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Path component.
    #[serde(rename = "Name")]
    pub name: String,
    /// Mode exactly as written in the tree, e.g. `"100644"` or `"40000"`.
    #[serde(rename = "Mode")]
    pub mode: String,
    /// Digest of the referenced object.
    #[serde(rename = "Hash")]
    pub hash: ObjectId,
}

impl DirectoryEntry {
    /// Classify the textual mode, if it is one of the standard modes.
    pub fn entry_mode(&self) -> Option<EntryMode> {
        EntryMode::from_mode_str(&self.mode)
    }
}

/// Standard file modes of a tree entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// 100644
    Regular,
    /// 100755
    Executable,
    /// 120000
    Symlink,
    /// 40000 (written as `040000` by some tools)
    Directory,
    /// 160000, a submodule commit
    Gitlink,
}

impl EntryMode {
    /// Parse the octal text stored in a tree record.
    pub fn from_mode_str(mode: &str) -> Option<Self> {
        match u32::from_str_radix(mode, 8).ok()? {
            0o100644 => Some(Self::Regular),
            0o100755 => Some(Self::Executable),
            0o120000 => Some(Self::Symlink),
            0o040000 => Some(Self::Directory),
            0o160000 => Some(Self::Gitlink),
            _ => None,
        }
    }

    /// Object type the entry is expected to reference.
    pub fn target_kind(&self) -> ObjectType {
        match self {
            Self::Regular | Self::Executable | Self::Symlink => ObjectType::Blob,
            Self::Directory => ObjectType::Tree,
            Self::Gitlink => ObjectType::Commit,
        }
    }
}
