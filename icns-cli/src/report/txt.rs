//! Plain-text report

use crate::load::LoadedFile;
use icns_decoder::Container;
use std::io::{self, Write};

pub fn render<W: Write>(
    out: &mut W,
    file: &LoadedFile,
    container: &Container,
    preview_bytes: usize,
) -> io::Result<()> {
    writeln!(out, "═══════════════════════════════════════════════")?;
    writeln!(out, "  {}", file.path.display())?;
    writeln!(out, "═══════════════════════════════════════════════")?;
    writeln!(out, "File size: {} bytes", file.size)?;

    writeln!(out, "Header:")?;
    writeln!(out, "  Magic: {}", container.header.magic)?;
    writeln!(out, "  Length: {} bytes", container.header.total_length)?;

    writeln!(out, "\nBody ({} entries):", container.len())?;
    for (i, entry) in container.iter().enumerate() {
        writeln!(out, "  Entry {}:", i + 1)?;
        writeln!(out, "    Type: {}", entry.type_tag)?;
        writeln!(out, "    Length: {} bytes", entry.declared_length)?;
        writeln!(
            out,
            "    Data: (First {} bytes) {}{}",
            preview_bytes,
            hex::encode(entry.preview(preview_bytes)),
            if entry.payload_len() > preview_bytes { "..." } else { "" }
        )?;
    }
    writeln!(out)
}
