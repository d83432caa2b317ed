use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// The type tag declared in a stored object's header.
///
/// Header tokens outside the four known kinds are kept verbatim in
/// [`ObjectType::Unknown`] so that an inventory never loses what was on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    /// Raw file content.
    Blob,
    /// Directory listing of `<mode> <name>\0<20-byte digest>` records.
    Tree,
    /// Snapshot metadata pointing at a root tree.
    Commit,
    /// Annotated tag.
    Tag,
    /// Any other header token.
    Unknown(String),
}

impl ObjectType {
    /// Classify a header token, keeping unrecognized tokens.
    pub fn parse(token: &str) -> Self {
        match token {
            "blob" => Self::Blob,
            "tree" => Self::Tree,
            "commit" => Self::Commit,
            "tag" => Self::Tag,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Classify a header token, rejecting anything but the four known kinds.
    pub fn parse_strict(token: &str) -> Result<Self, TypeError> {
        match Self::parse(token) {
            Self::Unknown(token) => Err(TypeError::UnknownObjectType(token)),
            kind => Ok(kind),
        }
    }

    /// The header token for this type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
            Self::Tag => "tag",
            Self::Unknown(token) => token,
        }
    }

    /// Returns `true` for the four kinds a repository is expected to hold.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens() {
        assert_eq!(ObjectType::parse("blob"), ObjectType::Blob);
        assert_eq!(ObjectType::parse("tree"), ObjectType::Tree);
        assert_eq!(ObjectType::parse("commit"), ObjectType::Commit);
        assert_eq!(ObjectType::parse("tag"), ObjectType::Tag);
    }

    #[test]
    fn unknown_token_is_kept_verbatim() {
        let kind = ObjectType::parse("ofs-delta");
        assert_eq!(kind, ObjectType::Unknown("ofs-delta".into()));
        assert_eq!(kind.as_str(), "ofs-delta");
        assert!(!kind.is_known());
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert!(!ObjectType::parse("Blob").is_known());
    }

    #[test]
    fn strict_rejects_unknown() {
        let err = ObjectType::parse_strict("bogus").unwrap_err();
        assert_eq!(err, TypeError::UnknownObjectType("bogus".into()));
        assert_eq!(ObjectType::parse_strict("tag").unwrap(), ObjectType::Tag);
    }

    #[test]
    fn display_matches_token() {
        assert_eq!(format!("{}", ObjectType::Blob), "blob");
        assert_eq!(format!("{}", ObjectType::Tree), "tree");
        assert_eq!(format!("{}", ObjectType::Commit), "commit");
        assert_eq!(format!("{}", ObjectType::Tag), "tag");
    }

    #[test]
    fn serializes_as_token() {
        assert_eq!(serde_json::to_string(&ObjectType::Commit).unwrap(), "\"commit\"");
        assert_eq!(
            serde_json::to_string(&ObjectType::Unknown("weird".into())).unwrap(),
            "\"weird\""
        );
        let parsed: ObjectType = serde_json::from_str("\"tree\"").unwrap();
        assert_eq!(parsed, ObjectType::Tree);
    }
}
