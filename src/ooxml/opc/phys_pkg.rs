//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This is the only module that talks to the `zip` crate. Entries are listed
//! from the central directory without decompressing anything; contents are
//! inflated on demand, one entry at a time.

use crate::common::{Error, Result};
use crate::ooxml::opc::config::Compression;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Upper bound for buffer pre-allocation; the declared size is untrusted.
const PREALLOC_LIMIT: u64 = 16 << 20;

/// One member of the central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    /// Position in the central directory
    pub index: usize,
    /// Member name as stored in the archive
    pub path: String,
    pub is_dir: bool,
}

/// Physical package reader over a borrowed byte buffer.
///
/// Cloning is cheap (the parsed central directory is shared), which is how
/// parallel decoders get one reader per worker thread.
#[derive(Clone)]
pub struct PhysPkgReader<'data> {
    archive: ZipArchive<Cursor<&'data [u8]>>,
}

impl<'data> PhysPkgReader<'data> {
    /// Open a ZIP archive from a byte slice.
    ///
    /// # Errors
    /// [`Error::ArchiveOpen`] if the bytes are not a readable ZIP archive.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let archive =
            ZipArchive::new(Cursor::new(data)).map_err(|e| Error::ArchiveOpen(e.to_string()))?;
        Ok(Self { archive })
    }

    /// Number of central directory entries, directories included.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }

    /// List all entries in central directory order.
    pub fn entries(&self) -> Vec<EntryInfo> {
        (0..self.archive.len())
            .filter_map(|index| {
                let path = self.archive.name_for_index(index)?;
                Some(EntryInfo {
                    index,
                    path: path.to_string(),
                    is_dir: path.ends_with('/') || path.ends_with('\\'),
                })
            })
            .collect()
    }

    /// List the names of all file (non-directory) entries.
    pub fn member_names(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| !e.is_dir)
            .map(|e| e.path)
            .collect()
    }

    /// Read and decompress the entry at `index`.
    ///
    /// Fails on unsupported compression, encryption, corrupt data, a CRC
    /// mismatch, or content whose length differs from the size declared in
    /// the central directory. At most one byte past the declared size is
    /// ever read.
    pub fn read(&mut self, index: usize) -> Result<Vec<u8>> {
        let file = self.archive.by_index(index)?;
        let declared = file.size();
        let mut data = Vec::with_capacity(declared.min(PREALLOC_LIMIT) as usize);
        file.take(declared.saturating_add(1)).read_to_end(&mut data)?;

        if data.len() as u64 != declared {
            return Err(Error::Zip(format!(
                "entry declares {} bytes but holds {}",
                declared,
                data.len()
            )));
        }
        Ok(data)
    }

    /// Read and decompress the entry named `path`.
    pub fn read_by_name(&mut self, path: &str) -> Result<Vec<u8>> {
        let index = self
            .archive
            .index_for_name(path)
            .ok_or_else(|| Error::Other(format!("No archive entry named '{}'", path)))?;
        self.read(index)
    }
}

impl std::fmt::Debug for PhysPkgReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysPkgReader")
            .field("entry_count", &self.archive.len())
            .finish()
    }
}

/// Physical package writer for creating OPC packages in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    /// Create a writer that compresses every entry with `compression`.
    pub fn new(compression: Compression) -> Self {
        // Fixed timestamp keeps output byte-identical across runs
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(zip::DateTime::default());
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Add an entry.
    pub fn write(&mut self, path: &str, blob: &[u8]) -> Result<()> {
        self.archive.start_file(path, self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new(Compression::default())
    }
}
