//! ICNS Decoder Library
//!
//! A stateless, reusable library for decoding Apple icon container (ICNS)
//! files into their header and raw entries.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Validates the 8-byte container header (`icns` magic + declared length)
//! - Walks the entry stream using each entry's self-reported length
//! - Returns a fully materialized [`Container`] or a precise [`DecoderError`]
//!
//! The library does NOT:
//! - Interpret or decompress entry payloads (they are opaque bytes)
//! - Validate type codes or detect duplicate entries
//! - Skip over corrupt entries (any inconsistency aborts the decode)
//! - Open files or print anything
//!
//! File loading and reporting live in the application layer (icns-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use icns_decoder::{Decoder, DecoderConfig};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let mut reader = BufReader::new(File::open("OpenEmu.icns").unwrap());
//! let decoder = Decoder::with_config(DecoderConfig::new().with_strict_length(false));
//!
//! match decoder.decode(&mut reader) {
//!     Ok(container) => {
//!         for entry in &container {
//!             println!("{}: {} bytes", entry.type_tag, entry.declared_length);
//!         }
//!     }
//!     Err(e) => eprintln!("Decode error: {}", e),
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use config::{DecoderConfig, TotalLengthCheck};
pub use decoder::{decode, Decoder, EntryStream};
pub use source::ByteSource;
pub use types::{
    Container, DecoderError, Entry, Header, ParseTypeTagError, ReadFailure, Result, TypeTag,
    HEADER_SIZE, ICNS_MAGIC,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
