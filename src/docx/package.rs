//! ZIP package I/O.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use log::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// One entry of the package, kept byte for byte.
#[derive(Debug, Clone)]
pub struct PackageEntry {
    pub name: String,
    pub data: Vec<u8>,
    pub compression: CompressionMethod,
    pub modified: DateTime,
    pub is_dir: bool,
}

/// All entries of a DOCX package in their original order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    entries: Vec<PackageEntry>,
}

impl Package {
    /// Read every entry of a ZIP archive.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::DocumentLoad(format!("not a ZIP package: {e}")))?;

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::DocumentLoad(format!("unreadable entry #{index}: {e}")))?;

            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data).map_err(|e| {
                Error::DocumentLoad(format!("unreadable entry {}: {e}", file.name()))
            })?;

            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                modified: file.last_modified(),
                is_dir: file.is_dir(),
            });
        }

        debug!("Read package with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Get the entries in order.
    pub fn entries(&self) -> &[PackageEntry] {
        &self.entries
    }

    /// Check if the package has an entry with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Get the bytes of a file entry.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entry(name)
            .filter(|entry| !entry.is_dir)
            .map(|entry| entry.data.as_slice())
    }

    fn entry(&self, name: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Write the package to bytes. Stored entries stay stored; every other
    /// entry is deflated.
    pub fn write(&self) -> Result<Vec<u8>> {
        self.write_entries(None)
    }

    /// Write the package with the contents of entry `name` replaced by `data`.
    pub fn write_with(&self, name: &str, data: &[u8]) -> Result<Vec<u8>> {
        if !self.contains(name) {
            return Err(Error::DocumentSave(format!("package has no entry {name}")));
        }
        self.write_entries(Some((name, data)))
    }

    fn write_entries(&self, replacement: Option<(&str, &[u8])>) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let compression = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = FileOptions::default()
                .compression_method(compression)
                .last_modified_time(entry.modified);

            if entry.is_dir {
                writer
                    .add_directory(entry.name.as_str(), options)
                    .map_err(|e| save_error(&entry.name, e))?;
                continue;
            }
            writer
                .start_file(entry.name.as_str(), options)
                .map_err(|e| save_error(&entry.name, e))?;
            let data = match replacement {
                Some((name, data)) if name == entry.name => data,
                _ => entry.data.as_slice(),
            };
            writer
                .write_all(data)
                .map_err(|e| save_error(&entry.name, e))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::DocumentSave(format!("cannot finish package: {e}")))?;
        Ok(cursor.into_inner())
    }
}

fn save_error(name: &str, e: impl std::fmt::Display) -> Error {
    Error::DocumentSave(format!("cannot write entry {name}: {e}"))
}

/// Write `bytes` to `path` atomically: a temporary file in the destination
/// directory is written, synced and renamed over the target.
pub fn save_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| {
        Error::DocumentSave(format!("cannot create directory {}: {e}", dir.display()))
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| Error::DocumentSave(format!("cannot create temporary file: {e}")))?;
    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| Error::DocumentSave(format!("cannot write temporary file: {e}")))?;
    temp.persist(path)
        .map_err(|e| Error::DocumentSave(format!("cannot replace {}: {e}", path.display())))?;

    debug!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file("[Content_Types].xml", deflated).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.add_directory("word/", deflated).unwrap();
        writer.start_file("word/media/image1.png", stored).unwrap();
        writer.write_all(&[0x89, b'P', b'N', b'G']).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_keeps_order_and_method() {
        let package = Package::read(&sample()).unwrap();
        let names: Vec<&str> = package.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["[Content_Types].xml", "word/", "word/media/image1.png"]
        );
        assert!(package.entries()[1].is_dir);
        assert_eq!(package.entries()[2].compression, CompressionMethod::Stored);
        assert_eq!(package.get("[Content_Types].xml"), Some(&b"<Types/>"[..]));
        assert_eq!(package.get("word/"), None);
    }

    #[test]
    fn test_write_round_trip() {
        let package = Package::read(&sample()).unwrap();
        let bytes = package
            .write_with("[Content_Types].xml", b"<Types></Types>")
            .unwrap();

        let reread = Package::read(&bytes).unwrap();
        assert_eq!(reread.entries().len(), 3);
        assert_eq!(reread.get("[Content_Types].xml"), Some(&b"<Types></Types>"[..]));
        assert_eq!(
            reread.get("word/media/image1.png"),
            Some(&[0x89, b'P', b'N', b'G'][..])
        );
        assert_eq!(reread.entries()[2].compression, CompressionMethod::Stored);

        assert!(package.write_with("word/missing.xml", b"").is_err());
        assert_eq!(Package::read(&package.write().unwrap()).unwrap().entries().len(), 3);
    }

    #[test]
    fn test_not_a_zip() {
        let err = Package::read(b"plain text").unwrap_err();
        assert!(matches!(err, Error::DocumentLoad(_)));
    }

    #[test]
    fn test_save_atomic_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.docx");
        save_atomic(&path, b"data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"data");

        save_atomic(&path, b"replaced").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"replaced");
    }
}
