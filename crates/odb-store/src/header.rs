use odb_types::ObjectType;

use crate::error::{StoreError, StoreResult};

/// How header type tokens outside blob/tree/commit/tag are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypePolicy {
    /// Keep the token as [`ObjectType::Unknown`].
    #[default]
    Permissive,
    /// Fail with [`StoreError::UnknownObjectType`].
    Strict,
}

/// Parsed `<type> <size>` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: ObjectType,
    /// Declared payload size. Not checked against the actual payload.
    pub size: u64,
}

/// Parse the header bytes (everything before the first NUL).
///
/// The header must split on ASCII space into exactly two fields, the second a
/// non-negative decimal integer.
pub fn parse_header(bytes: &[u8], types: TypePolicy) -> StoreResult<Header> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| StoreError::MalformedHeader("header is not valid UTF-8".into()))?;

    let fields: Vec<&str> = text.split(' ').collect();
    let [token, size] = fields.as_slice() else {
        return Err(StoreError::MalformedHeader(format!(
            "expected 2 header fields, got {} in {text:?}",
            fields.len()
        )));
    };

    if size.is_empty() || !size.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::MalformedHeader(format!(
            "size {size:?} is not a decimal integer"
        )));
    }
    let size: u64 = size
        .parse()
        .map_err(|e| StoreError::MalformedHeader(format!("size {size:?}: {e}")))?;

    let kind = match types {
        TypePolicy::Permissive => ObjectType::parse(token),
        TypePolicy::Strict => ObjectType::parse_strict(token)
            .map_err(|_| StoreError::UnknownObjectType(token.to_string()))?,
    };

    Ok(Header { kind, size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> StoreResult<Header> {
        parse_header(s.as_bytes(), TypePolicy::Permissive)
    }

    #[test]
    fn parses_blob_header() {
        let header = parse("blob 11").unwrap();
        assert_eq!(header.kind, ObjectType::Blob);
        assert_eq!(header.size, 11);
    }

    #[test]
    fn parses_tree_header() {
        let header = parse("tree 9").unwrap();
        assert_eq!(header.kind, ObjectType::Tree);
        assert_eq!(header.size, 9);
    }

    #[test]
    fn parses_zero_and_large_sizes() {
        assert_eq!(parse("commit 0").unwrap().size, 0);
        assert_eq!(parse("blob 4294967296").unwrap().size, 1 << 32);
    }

    #[test]
    fn missing_size_is_rejected() {
        let err = parse("blob").unwrap_err();
        assert!(matches!(err, StoreError::MalformedHeader(_)));
    }

    #[test]
    fn extra_fields_are_rejected() {
        assert!(matches!(parse("blob 1 2"), Err(StoreError::MalformedHeader(_))));
        assert!(matches!(parse("blob  5"), Err(StoreError::MalformedHeader(_))));
        assert!(matches!(parse(""), Err(StoreError::MalformedHeader(_))));
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        let cases = [
            "blob abc",
            "blob -1",
            "blob +5",
            "blob 1.5",
            "blob ",
            "blob 99999999999999999999",
        ];
        for bad in cases {
            let err = parse(bad).unwrap_err();
            assert!(matches!(err, StoreError::MalformedHeader(_)), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn non_utf8_header_is_rejected() {
        let err = parse_header(b"bl\xffb 1", TypePolicy::Permissive).unwrap_err();
        assert!(matches!(err, StoreError::MalformedHeader(_)));
    }

    #[test]
    fn unknown_type_is_permitted_by_default() {
        let header = parse("widget 3").unwrap();
        assert_eq!(header.kind, ObjectType::Unknown("widget".into()));
        assert_eq!(header.size, 3);
    }

    #[test]
    fn unknown_type_is_rejected_when_strict() {
        let err = parse_header(b"widget 3", TypePolicy::Strict).unwrap_err();
        assert!(matches!(err, StoreError::UnknownObjectType(t) if t == "widget"));
        assert_eq!(
            parse_header(b"tag 3", TypePolicy::Strict).unwrap().kind,
            ObjectType::Tag
        );
    }
}
