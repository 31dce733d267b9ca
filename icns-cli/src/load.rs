//! File loading
//!
//! Reads a whole ICNS file into memory, sizing the buffer from file metadata
//! up front. The decoder itself works on any reader; this is just the simplest
//! way to feed it and to report the on-disk size next to the decoded header.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A file read fully into memory
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// Size reported by the filesystem
    pub size: u64,
    pub bytes: Vec<u8>,
}

/// Read `path` into memory
pub fn load_file(path: &Path) -> Result<LoadedFile> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;

    let size = file
        .metadata()
        .with_context(|| format!("Failed to get file info: {:?}", path))?
        .len();

    // Capacity is only a hint; a size beyond the address space still reads normally
    let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    log::debug!("Loaded {:?}: {} bytes", path, bytes.len());

    Ok(LoadedFile {
        path: path.to_path_buf(),
        size,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"icns\x00\x00\x00\x08").unwrap();

        let loaded = load_file(tmp.path()).unwrap();
        assert_eq!(loaded.size, 8);
        assert_eq!(loaded.bytes, b"icns\x00\x00\x00\x08");
        assert_eq!(loaded.path, tmp.path());
    }

    #[test]
    fn test_file_not_found() {
        let err = load_file(Path::new("nonexistent.icns")).unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
