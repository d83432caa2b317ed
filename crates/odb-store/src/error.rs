use std::path::{Path, PathBuf};

/// Errors from reading and decoding stored objects.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A file or directory could not be opened or read.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Traversal of the object directory failed.
    #[error("failed to walk object directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Neither `.git/objects` nor `objects` exists under the given root.
    #[error("no object directory found under {}", .0.display())]
    NotARepository(PathBuf),

    /// The compressed stream is invalid, truncated, or has trailing bytes.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// The header is not `<type> <size>` or is not NUL-terminated.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The header names a type outside blob/tree/commit/tag (strict mode only).
    #[error("unknown object type: {0:?}")]
    UnknownObjectType(String),

    /// A tree record violates the `<mode> <name>\0<digest>` layout.
    #[error("malformed tree at byte {offset}: {reason}")]
    MalformedTree { offset: usize, reason: String },

    /// Any of the above, attributed to the object file it came from.
    #[error("{}: {source}", path.display())]
    InObject {
        path: PathBuf,
        #[source]
        source: Box<StoreError>,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed_tree(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            offset,
            reason: reason.into(),
        }
    }

    /// Attribute this error to an object file.
    pub fn in_object(self, path: &Path) -> Self {
        match self {
            already @ Self::InObject { .. } => already,
            other => Self::InObject {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any [`StoreError::InObject`] wrapper removed.
    pub fn innermost(&self) -> &StoreError {
        match self {
            Self::InObject { source, .. } => source.innermost(),
            other => other,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
