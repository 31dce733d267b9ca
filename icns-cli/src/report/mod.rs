//! Report generation
//!
//! Renders a decoded container as plain text or JSON.

pub mod json;
pub mod txt;

use crate::config::OutputFormat;
use crate::load::LoadedFile;
use anyhow::Result;
use icns_decoder::Container;
use std::io::Write;

/// Render one file's report in the requested format
pub fn render<W: Write>(
    out: &mut W,
    format: OutputFormat,
    file: &LoadedFile,
    container: &Container,
    preview_bytes: usize,
) -> Result<()> {
    match format {
        OutputFormat::Txt => txt::render(out, file, container, preview_bytes)?,
        OutputFormat::Json => json::render(out, file, container, preview_bytes)?,
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::load::LoadedFile;
    use icns_decoder::{Container, Decoder};
    use std::path::PathBuf;

    /// `ic08` with a 20-byte payload followed by an empty `ic10`
    pub fn sample() -> (LoadedFile, Container) {
        let mut bytes = b"icns\x00\x00\x00\x2cic08\x00\x00\x00\x1c".to_vec();
        bytes.extend(0u8..20);
        bytes.extend_from_slice(b"ic10\x00\x00\x00\x08");

        let container = Decoder::new().decode_bytes(&bytes).unwrap();
        let file = LoadedFile {
            path: PathBuf::from("sample.icns"),
            size: bytes.len() as u64,
            bytes,
        };
        (file, container)
    }
}
