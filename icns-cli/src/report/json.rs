//! JSON report

use crate::load::LoadedFile;
use icns_decoder::{Container, Header, TypeTag};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: String,
    size: u64,
    header: &'a Header,
    entries: Vec<EntryReport>,
}

#[derive(Debug, Serialize)]
struct EntryReport {
    index: usize,
    #[serde(rename = "type")]
    type_tag: TypeTag,
    length: u32,
    payload_length: usize,
    /// Hex of the first payload bytes
    preview: String,
}

pub fn render<W: Write>(
    out: &mut W,
    file: &LoadedFile,
    container: &Container,
    preview_bytes: usize,
) -> serde_json::Result<()> {
    let report = FileReport {
        file: file.path.display().to_string(),
        size: file.size,
        header: &container.header,
        entries: container
            .iter()
            .enumerate()
            .map(|(i, entry)| EntryReport {
                index: i + 1,
                type_tag: entry.type_tag,
                length: entry.declared_length,
                payload_length: entry.payload_len(),
                preview: hex::encode(entry.preview(preview_bytes)),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample;

    #[test]
    fn test_json_report() {
        let (file, container) = sample();
        let mut out = Vec::new();
        render(&mut out, &file, &container, 4).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["file"], "sample.icns");
        assert_eq!(value["size"], 44);
        assert_eq!(value["header"]["magic"], "icns");
        assert_eq!(value["header"]["total_length"], 44);

        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["index"], 1);
        assert_eq!(entries[0]["type"], "ic08");
        assert_eq!(entries[0]["length"], 28);
        assert_eq!(entries[0]["payload_length"], 20);
        assert_eq!(entries[0]["preview"], "00010203");
        assert_eq!(entries[1]["preview"], "");
    }
}
