//! Core types for the ICNS decoder library
//!
//! This module defines the decoded container model and the error taxonomy.
//! All values are produced in a single decode pass and are immutable afterward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Size in bytes of the container header and of every entry header
pub const HEADER_SIZE: u32 = 8;

/// Expected magic at the start of every ICNS container
pub const ICNS_MAGIC: TypeTag = TypeTag(*b"icns");

/// Four-byte type code (OSType style), used for the magic and entry kinds
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TypeTag(pub [u8; 4]);

impl TypeTag {
    /// Create a tag from raw bytes
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw tag bytes as read from the stream
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// True if the tag displays without any `\xNN` escapes
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|&b| is_plain(b))
    }
}

/// Printable ASCII other than the escape character itself
fn is_plain(b: u8) -> bool {
    (0x20..0x7F).contains(&b) && b != b'\\'
}

impl From<[u8; 4]> for TypeTag {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if is_plain(b) {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag(\"{}\")", self)
    }
}

/// Error returned when a string is not a valid 4-byte tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("type tag must be exactly 4 bytes (printable ASCII or \\xNN escapes), got {0:?}")]
pub struct ParseTypeTagError(pub String);

/// Parses the `Display` form: plain printable characters and `\xNN` escapes
impl FromStr for TypeTag {
    type Err = ParseTypeTagError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseTypeTagError(s.to_string());

        let mut bytes = [0u8; 4];
        let mut len = 0;
        let mut rest = s.as_bytes();
        while let Some((&b, tail)) = rest.split_first() {
            let (byte, tail) = if b == b'\\' {
                let digits = tail
                    .strip_prefix(b"x")
                    .filter(|d| d.len() >= 2 && d[..2].iter().all(u8::is_ascii_hexdigit))
                    .ok_or_else(err)?;
                let hex = std::str::from_utf8(&digits[..2]).map_err(|_| err())?;
                let byte = u8::from_str_radix(hex, 16).map_err(|_| err())?;
                (byte, &digits[2..])
            } else if is_plain(b) {
                (b, tail)
            } else {
                return Err(err());
            };

            *bytes.get_mut(len).ok_or_else(err)? = byte;
            len += 1;
            rest = tail;
        }

        if len != bytes.len() {
            return Err(err());
        }
        Ok(Self(bytes))
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.to_string()
    }
}

impl TryFrom<String> for TypeTag {
    type Error = ParseTypeTagError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Fixed 8-byte container header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Magic identifier, always `icns` once decoded
    pub magic: TypeTag,
    /// Declared total length of the container in bytes (header + all entries)
    pub total_length: u32,
}

/// One self-describing chunk within the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Content kind (e.g. `ic08`, `ic10`); not interpreted by the decoder
    pub type_tag: TypeTag,
    /// Length of the entry including its own 8-byte header
    pub declared_length: u32,
    /// Raw payload, `declared_length - 8` bytes
    pub payload: Vec<u8>,
}

impl Entry {
    /// Number of payload bytes
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// First `max` payload bytes, or the whole payload if it is shorter
    pub fn preview(&self, max: usize) -> &[u8] {
        &self.payload[..self.payload.len().min(max)]
    }
}

/// The fully decoded container: header plus entries in stream order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: Header,
    /// Entries in encounter order; duplicates are preserved
    pub entries: Vec<Entry>,
}

impl Container {
    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing followed the header
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in stream order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// All entries carrying the given type tag, in stream order
    pub fn entries_with_tag(&self, tag: TypeTag) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.type_tag == tag)
    }

    /// Bytes actually consumed by the decode: header plus every declared entry length
    pub fn consumed_length(&self) -> u64 {
        self.entries
            .iter()
            .map(|e| u64::from(e.declared_length))
            .sum::<u64>()
            + u64::from(HEADER_SIZE)
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Why a read from a byte source did not fill the requested buffer
#[derive(Debug, thiserror::Error)]
pub enum ReadFailure {
    /// Zero bytes were available: the source ended cleanly
    #[error("end of stream")]
    Eof,

    /// Some, but not all, of the requested bytes were available
    #[error("short read: got {actual} of {expected} bytes")]
    Partial { expected: usize, actual: usize },

    /// The underlying source failed after delivering `actual` bytes
    #[error("I/O error after {actual} bytes")]
    Io {
        actual: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ReadFailure {
    /// Number of bytes obtained before the failure
    pub fn bytes_read(&self) -> usize {
        match self {
            ReadFailure::Eof => 0,
            ReadFailure::Partial { actual, .. } | ReadFailure::Io { actual, .. } => *actual,
        }
    }

    /// True only for a clean end of stream with no partial data
    pub fn is_clean_eof(&self) -> bool {
        matches!(self, ReadFailure::Eof)
    }
}

/// Errors that can occur during decoding
///
/// Every variant is fatal to the decode call that produced it.
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Failed to read container header")]
    HeaderRead {
        #[source]
        source: ReadFailure,
    },

    #[error("Invalid magic: expected \"icns\", found \"{found}\"")]
    InvalidMagic { found: TypeTag },

    #[error("Failed to read entry type at offset {offset}")]
    EntryTypeRead {
        offset: u64,
        #[source]
        source: ReadFailure,
    },

    #[error("Failed to read length of entry '{type_tag}' at offset {offset}")]
    EntryLengthRead {
        offset: u64,
        type_tag: TypeTag,
        #[source]
        source: ReadFailure,
    },

    #[error("Invalid length {declared_length} for entry '{type_tag}' at offset {offset} (minimum is 8)")]
    InvalidEntryLength {
        offset: u64,
        type_tag: TypeTag,
        declared_length: u32,
    },

    #[error(
        "Failed to read payload of entry '{type_tag}' at offset {offset}: expected {expected} bytes, got {actual}"
    )]
    EntryPayloadRead {
        offset: u64,
        type_tag: TypeTag,
        expected: u32,
        actual: u32,
        #[source]
        source: ReadFailure,
    },

    #[error("Header declares {declared} bytes but the container holds {actual}")]
    TotalLengthMismatch { declared: u32, actual: u64 },
}
