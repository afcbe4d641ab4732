//! Canonical object serialization.
//!
//! Format: `<kind> <size>\0<content>`
//!
//! `<kind>` is an ASCII type tag and `<size>` the decimal byte length of
//! `<content>`. The header never contains a NUL, so the first NUL in the
//! serialized form is always the terminator even when content holds NULs.

use std::fmt;
use std::str::FromStr;

use crate::error::{StoreError, StoreResult};
use crate::object_id::ObjectId;

/// Byte separating the header from the content.
const HEADER_TERMINATOR: u8 = 0;

/// Kinds of objects the store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Raw file content
    Blob,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            other => Err(StoreError::InvalidArgument(format!(
                "unsupported object type: {other:?}"
            ))),
        }
    }
}

/// How strictly [`decode`] checks the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Only the type tag is checked; the size field is informational.
    #[default]
    Lenient,
    /// The header must be `<kind> <digits>` and the size must match the
    /// content length.
    Strict,
}

/// Parsed object header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectHeader {
    pub kind: ObjectKind,
    /// Size as written in the header, if it parsed as a decimal number.
    pub declared_size: Option<usize>,
}

/// A decoded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub kind: ObjectKind,
    pub content: Vec<u8>,
}

impl Object {
    pub fn new(kind: ObjectKind, content: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    pub fn blob(content: impl Into<Vec<u8>>) -> Self {
        Self::new(ObjectKind::Blob, content)
    }

    /// Serialize to the canonical form.
    pub fn encode(&self) -> Vec<u8> {
        encode(self.kind, &self.content)
    }
}

/// Serialize content into the canonical `<kind> <size>\0<content>` form.
pub fn encode(kind: ObjectKind, content: &[u8]) -> Vec<u8> {
    let header = format!("{} {}", kind.as_str(), content.len());
    let mut out = Vec::with_capacity(header.len() + 1 + content.len());
    out.extend_from_slice(header.as_bytes());
    out.push(HEADER_TERMINATOR);
    out.extend_from_slice(content);
    out
}

/// Identifier of `content` stored as `kind`.
pub fn hash(kind: ObjectKind, content: &[u8]) -> ObjectId {
    ObjectId::hash(&encode(kind, content))
}

/// Split a canonical form at its first NUL into `(header, content)`.
pub fn split_header(data: &[u8]) -> StoreResult<(&[u8], &[u8])> {
    let end = data
        .iter()
        .position(|&b| b == HEADER_TERMINATOR)
        .ok_or_else(|| StoreError::MalformedObject("missing header terminator".to_string()))?;
    Ok((&data[..end], &data[end + 1..]))
}

/// Parse a header against the length of the content that follows it.
pub fn parse_header(
    header: &[u8],
    content_len: usize,
    mode: DecodeMode,
) -> StoreResult<ObjectHeader> {
    let header = std::str::from_utf8(header)
        .map_err(|_| StoreError::MalformedObject("header is not valid UTF-8".to_string()))?;

    let (tag, size) = match header.split_once(' ') {
        Some((tag, size)) => (tag, Some(size)),
        None => (header, None),
    };

    let kind = tag.parse::<ObjectKind>().map_err(|_| {
        StoreError::MalformedObject(format!("unsupported object type: {tag:?}"))
    })?;
    let declared_size = size.and_then(parse_decimal);

    if mode == DecodeMode::Strict {
        match declared_size {
            Some(declared) if declared == content_len => {}
            Some(declared) => {
                return Err(StoreError::MalformedObject(format!(
                    "declared size {declared} does not match content length {content_len}"
                )));
            }
            None => {
                return Err(StoreError::MalformedObject(format!(
                    "header {header:?} has no valid size"
                )));
            }
        }
    }

    Ok(ObjectHeader {
        kind,
        declared_size,
    })
}

/// Decode a canonical form into an [`Object`].
pub fn decode(data: &[u8], mode: DecodeMode) -> StoreResult<Object> {
    let (header, content) = split_header(data)?;
    let header = parse_header(header, content.len(), mode)?;
    Ok(Object::new(header.kind, content))
}

/// Plain ASCII digits only; `usize::from_str` would also take a leading `+`.
fn parse_decimal(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
