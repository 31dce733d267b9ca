//! Main decoder API
//!
//! This module walks an ICNS byte stream: it validates the 8-byte container
//! header, then reads one entry at a time, using each entry's declared length
//! to find the next one. The only place end-of-stream is accepted is exactly
//! at an entry boundary; every other short read is fatal.

use crate::config::DecoderConfig;
use crate::source::ByteSource;
use crate::types::{
    Container, DecoderError, Entry, Header, ReadFailure, Result, TypeTag, HEADER_SIZE, ICNS_MAGIC,
};
use byteorder::{BigEndian, ByteOrder};
use std::iter::FusedIterator;

/// Upper bound on a single payload read, so a corrupt length cannot force a huge allocation
const PAYLOAD_CHUNK: usize = 64 * 1024;

/// The decoder - entry point for all decoding operations
///
/// A `Decoder` holds only its configuration. It keeps no state between calls,
/// so one instance can be shared across threads decoding independent sources.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the default (permissive) configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with an explicit configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete container from a byte source
    ///
    /// Either every entry is decoded or an error is returned; partial
    /// containers are never produced.
    ///
    /// # Example
    /// ```
    /// use icns_decoder::Decoder;
    ///
    /// let bytes = b"icns\x00\x00\x00\x12ic08\x00\x00\x00\x0a\xAA\xBB";
    /// let container = Decoder::new().decode_bytes(bytes).unwrap();
    /// assert_eq!(container.entries[0].payload, vec![0xAA, 0xBB]);
    /// ```
    pub fn decode<S: ByteSource + ?Sized>(&self, source: &mut S) -> Result<Container> {
        let (header, stream) = self.stream(source)?;
        let entries = stream.collect::<Result<Vec<_>>>()?;
        let container = Container { header, entries };

        self.check_total_length(&container)?;

        log::debug!(
            "Decoded {} entries ({} bytes)",
            container.len(),
            container.consumed_length()
        );
        Ok(container)
    }

    /// Decode a container that is already in memory
    pub fn decode_bytes(&self, mut bytes: &[u8]) -> Result<Container> {
        self.decode(&mut bytes)
    }

    /// Validate the header and return a lazy iterator over the entries
    ///
    /// The iterator stops after the first error or at a clean end of stream.
    /// The total-length policy is not applied here since the iterator never
    /// sees the whole container; use [`Decoder::decode`] for that.
    pub fn stream<'a, S: ByteSource + ?Sized>(
        &self,
        source: &'a mut S,
    ) -> Result<(Header, EntryStream<'a, S>)> {
        let header = read_header(source)?;
        log::debug!(
            "Container header: magic={} total_length={}",
            header.magic,
            header.total_length
        );

        Ok((
            header,
            EntryStream {
                source,
                offset: u64::from(HEADER_SIZE),
                finished: false,
            },
        ))
    }

    fn check_total_length(&self, container: &Container) -> Result<()> {
        let declared = container.header.total_length;
        let actual = container.consumed_length();
        if u64::from(declared) == actual {
            return Ok(());
        }

        if self.config.enforces_total_length() {
            return Err(DecoderError::TotalLengthMismatch { declared, actual });
        }
        log::debug!(
            "Header declares {} bytes, decoded {} bytes (not enforced)",
            declared,
            actual
        );
        Ok(())
    }
}

/// Decode a container with the default configuration
pub fn decode<S: ByteSource + ?Sized>(source: &mut S) -> Result<Container> {
    Decoder::new().decode(source)
}

fn read_header<S: ByteSource + ?Sized>(source: &mut S) -> Result<Header> {
    let mut buf = [0u8; HEADER_SIZE as usize];
    source
        .read_exact_or_eof(&mut buf)
        .map_err(|source| DecoderError::HeaderRead { source })?;

    let magic = TypeTag([buf[0], buf[1], buf[2], buf[3]]);
    if magic != ICNS_MAGIC {
        return Err(DecoderError::InvalidMagic { found: magic });
    }

    Ok(Header {
        magic,
        total_length: BigEndian::read_u32(&buf[4..8]),
    })
}

/// Iterator over the entries of a container, reading from the source lazily
pub struct EntryStream<'a, S: ?Sized> {
    source: &'a mut S,
    /// Stream offset of the next entry header
    offset: u64,
    finished: bool,
}

impl<S: ByteSource + ?Sized> EntryStream<'_, S> {
    /// Byte offset of the next entry to be read
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read one entry; `Ok(None)` means the stream ended cleanly at an entry boundary
    fn read_entry(&mut self) -> Result<Option<Entry>> {
        let offset = self.offset;

        let mut tag = [0u8; 4];
        match self.source.read_exact_or_eof(&mut tag) {
            Ok(()) => {}
            Err(ReadFailure::Eof) => return Ok(None),
            Err(source) => return Err(DecoderError::EntryTypeRead { offset, source }),
        }
        let type_tag = TypeTag(tag);

        // A tag without its length is a dangling entry, never a clean boundary
        let mut length = [0u8; 4];
        self.source
            .read_exact_or_eof(&mut length)
            .map_err(|source| DecoderError::EntryLengthRead {
                offset,
                type_tag,
                source,
            })?;
        let declared_length = BigEndian::read_u32(&length);

        let payload_length = declared_length.checked_sub(HEADER_SIZE).ok_or(
            DecoderError::InvalidEntryLength {
                offset,
                type_tag,
                declared_length,
            },
        )?;

        let payload = read_payload(&mut *self.source, payload_length).map_err(|source| {
            DecoderError::EntryPayloadRead {
                offset,
                type_tag,
                expected: payload_length,
                actual: source.bytes_read() as u32,
                source,
            }
        })?;

        log::trace!(
            "Entry '{}' at offset {}: {} bytes",
            type_tag,
            offset,
            declared_length
        );
        self.offset += u64::from(declared_length);

        Ok(Some(Entry {
            type_tag,
            declared_length,
            payload,
        }))
    }
}

impl<S: ByteSource + ?Sized> Iterator for EntryStream<'_, S> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: ByteSource + ?Sized> FusedIterator for EntryStream<'_, S> {}

/// Read exactly `len` payload bytes, growing the buffer one chunk at a time
///
/// On failure the returned [`ReadFailure`] counts every byte obtained for
/// this payload, not just those of the last chunk.
fn read_payload<S: ByteSource + ?Sized>(
    source: &mut S,
    len: u32,
) -> std::result::Result<Vec<u8>, ReadFailure> {
    let len = len as usize;
    let mut payload = Vec::with_capacity(len.min(PAYLOAD_CHUNK));

    while payload.len() < len {
        let start = payload.len();
        let step = (len - start).min(PAYLOAD_CHUNK);
        payload.resize(start + step, 0);

        if let Err(failure) = source.read_exact_or_eof(&mut payload[start..]) {
            let actual = start + failure.bytes_read();
            return Err(match failure {
                ReadFailure::Io { source, .. } => ReadFailure::Io { actual, source },
                _ if actual == 0 => ReadFailure::Eof,
                _ => ReadFailure::Partial {
                    expected: len,
                    actual,
                },
            });
        }
    }

    Ok(payload)
}
