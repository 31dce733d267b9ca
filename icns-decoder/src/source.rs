//! Byte source abstraction
//!
//! The decoder only needs exact-length reads that tell a clean end of stream
//! apart from a stream that ran out part-way through a field. Anything that
//! implements [`std::io::Read`] qualifies: in-memory slices, cursors, files,
//! buffered readers, or a caller's own deadline-aware reader.

use crate::types::ReadFailure;
use std::io::{ErrorKind, Read};

/// A sequential source of bytes with explicit end-of-stream reporting
pub trait ByteSource {
    /// Fill `buf` completely
    ///
    /// Returns [`ReadFailure::Eof`] when no bytes at all were available,
    /// [`ReadFailure::Partial`] when the source ended after some bytes, and
    /// [`ReadFailure::Io`] for any other failure of the underlying source.
    /// An empty `buf` always succeeds.
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<(), ReadFailure>;
}

impl<R: Read + ?Sized> ByteSource for R {
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<(), ReadFailure> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(ReadFailure::Io {
                        actual: filled,
                        source,
                    })
                }
            }
        }

        match filled {
            n if n == buf.len() => Ok(()),
            0 => Err(ReadFailure::Eof),
            actual => Err(ReadFailure::Partial {
                expected: buf.len(),
                actual,
            }),
        }
    }
}
