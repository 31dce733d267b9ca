//! Shared fixtures for integration tests
//!
//! The library does not write ICNS files, so tests build their input bytes here.

#![allow(dead_code)]

use byteorder::{BigEndian, WriteBytesExt};
use icns_decoder::{Container, Entry, Header, TypeTag, ICNS_MAGIC};

/// Enable log output for a test run (`RUST_LOG=trace cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serialize a container using the on-disk layout
pub fn encode(container: &Container) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(container.header.magic.as_bytes());
    out.write_u32::<BigEndian>(container.header.total_length)
        .unwrap();
    for entry in &container.entries {
        out.extend_from_slice(entry.type_tag.as_bytes());
        out.write_u32::<BigEndian>(entry.declared_length).unwrap();
        out.extend_from_slice(&entry.payload);
    }
    out
}

/// Build an entry whose declared length matches its payload
pub fn entry(tag: &[u8; 4], payload: &[u8]) -> Entry {
    Entry {
        type_tag: TypeTag(*tag),
        declared_length: payload.len() as u32 + 8,
        payload: payload.to_vec(),
    }
}

/// Build a container whose header length matches its entries
pub fn container(entries: Vec<Entry>) -> Container {
    let total: u32 = 8 + entries.iter().map(|e| e.declared_length).sum::<u32>();
    Container {
        header: Header {
            magic: ICNS_MAGIC,
            total_length: total,
        },
        entries,
    }
}

/// Raw header bytes with an arbitrary declared total length
pub fn header_bytes(total_length: u32) -> Vec<u8> {
    let mut out = b"icns".to_vec();
    out.write_u32::<BigEndian>(total_length).unwrap();
    out
}

/// Raw entry header bytes (type tag + declared length) with no payload
pub fn entry_header_bytes(tag: &[u8; 4], declared_length: u32) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.write_u32::<BigEndian>(declared_length).unwrap();
    out
}
