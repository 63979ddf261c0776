//! Archive → structured package.
//!
//! Every entry is decoded on its own: list the central directory, then fan
//! out over the entries on the rayon pool with one cloned archive reader per
//! worker. Results land in an index-addressed vector, so the final map is
//! built single-threaded in archive order.

use crate::common::xml::{self, XmlDocument};
use crate::common::{Error, Result, bom};
use crate::ooxml::opc::classify::{PartKind, classify};
use crate::ooxml::opc::config::TranscodeOptions;
use crate::ooxml::opc::package::{Package, Part};
use crate::ooxml::opc::phys_pkg::{EntryInfo, PhysPkgReader};
use bytes::Bytes;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Package reader that decodes a ZIP archive into a [`Package`].
///
/// # Error policy
///
/// A markup entry that fails to parse fails the whole decode with
/// [`Error::PartDecode`]. All entries are still processed; when several fail,
/// the one earliest in the archive is reported and every failure is logged.
/// Entries whose bytes cannot be retrieved at all (unsupported compression,
/// encryption, corrupt data) are skipped with a warning, like directories.
pub struct PackageReader;

impl PackageReader {
    /// Decode a package from ZIP bytes with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Package> {
        Self::from_bytes_with(data, &TranscodeOptions::default())
    }

    /// Decode a package from ZIP bytes.
    ///
    /// # Errors
    /// - [`Error::ArchiveOpen`] if `data` is not a ZIP archive
    /// - [`Error::PartDecode`] if a markup entry is malformed
    pub fn from_bytes_with(data: &[u8], options: &TranscodeOptions) -> Result<Package> {
        let phys_reader = PhysPkgReader::new(data)?;
        Self::from_phys_reader(&phys_reader, options)
    }

    /// Decode every entry of an opened archive.
    pub fn from_phys_reader(
        phys_reader: &PhysPkgReader<'_>,
        options: &TranscodeOptions,
    ) -> Result<Package> {
        let entries = phys_reader.entries();

        let outcomes: Vec<Result<Option<(String, Part)>>> = if options.parallel {
            entries
                .par_iter()
                .map_init(
                    || phys_reader.clone(),
                    |reader, entry| decode_entry(reader, entry, options),
                )
                .collect()
        } else {
            let mut reader = phys_reader.clone();
            entries
                .iter()
                .map(|entry| decode_entry(&mut reader, entry, options))
                .collect()
        };

        let mut package = Package::with_capacity(outcomes.len());
        let mut first_error = None;
        let mut markup_count = 0usize;

        for outcome in outcomes {
            match outcome {
                Ok(Some((path, part))) => {
                    if part.kind() == PartKind::Markup {
                        markup_count += 1;
                    }
                    if package.insert(path.clone(), part).is_some() {
                        warn!(path = %path, "Duplicate archive entry, keeping the later one");
                    }
                },
                Ok(None) => {},
                Err(e) => {
                    warn!(error = %e, "Part decode failed");
                    first_error.get_or_insert(e);
                },
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }

        debug!(
            entries = entries.len(),
            parts = package.len(),
            markup = markup_count,
            binary = package.len() - markup_count,
            "Decoded package"
        );
        Ok(package)
    }
}

/// Decode one archive entry.
///
/// `Ok(None)` for entries that carry no payload (directories, unreadable).
fn decode_entry(
    reader: &mut PhysPkgReader<'_>,
    entry: &EntryInfo,
    options: &TranscodeOptions,
) -> Result<Option<(String, Part)>> {
    if entry.is_dir {
        return Ok(None);
    }

    let data = match reader.read(entry.index) {
        Ok(data) => data,
        Err(e) => {
            warn!(path = %entry.path, error = %e, "Skipping unreadable archive entry");
            return Ok(None);
        },
    };

    let part = match classify(&entry.path) {
        PartKind::Markup => Part::Markup(
            decode_markup(&data, options).map_err(|e| Error::part_decode(&entry.path, e))?,
        ),
        PartKind::Binary => Part::Binary(Bytes::from(data)),
    };

    Ok(Some((entry.path.clone(), part)))
}

/// Bytes → text → tree.
pub(crate) fn decode_markup(data: &[u8], options: &TranscodeOptions) -> Result<XmlDocument> {
    let decoded = bom::decode_text(data)?;
    let mut doc = xml::parse(&decoded.text)?;

    if !options.keep_declaration {
        doc.declaration = None;
    } else if decoded.transcoded {
        // Encoding always writes UTF-8
        if let Some(decl) = doc.declaration.as_mut() {
            decl.encoding = Some("UTF-8".to_string());
        }
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::bom::UTF16_LE_BOM;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    /// Build a ZIP directly with the `zip` crate, bypassing the encoder.
    /// Names ending in `/` become directory entries.
    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap().into_inner()
    }

    const PRESENTATION: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId2"/>
  </p:sldIdLst>
</p:presentation>"#;

    #[test]
    fn test_decode_skips_directories() {
        let data = build_zip(&[
            ("ppt/", b"".as_slice()),
            ("ppt/presentation.xml", PRESENTATION),
            ("ppt/media/", b"".as_slice()),
            ("ppt/media/image1.png", b"\x89PNG\r\n".as_slice()),
            ("_rels/.rels", b"<Relationships/>".as_slice()),
        ]);

        let pkg = PackageReader::from_bytes(&data).unwrap();
        assert_eq!(pkg.len(), 3);
        assert_eq!(
            pkg.paths().collect::<Vec<_>>(),
            ["ppt/presentation.xml", "ppt/media/image1.png", "_rels/.rels"]
        );
        assert_eq!(pkg.binary("ppt/media/image1.png").unwrap().as_ref(), b"\x89PNG\r\n");

        let pres = pkg.markup("ppt/presentation.xml").unwrap();
        assert_eq!(pres.root.name, "p:presentation");
        let sld_id = pres.root.child("p:sldIdLst").unwrap().child("p:sldId").unwrap();
        assert_eq!(sld_id.attr("r:id"), Some("rId2"));
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let data = build_zip(&[
            ("ppt/presentation.xml", PRESENTATION),
            ("ppt/media/audio1.m4a", [0u8, 1, 2, 3].as_slice()),
            ("docProps/app.xml", b"<Properties><Slides>1</Slides></Properties>".as_slice()),
        ]);

        let parallel = PackageReader::from_bytes(&data).unwrap();
        let sequential =
            PackageReader::from_bytes_with(&data, &TranscodeOptions::new().with_parallel(false))
                .unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(
            parallel.paths().collect::<Vec<_>>(),
            sequential.paths().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_malformed_markup_names_its_path() {
        let data = build_zip(&[
            ("ppt/presentation.xml", PRESENTATION),
            ("ppt/slides/slide1.xml", b"<p:sld><p:cSld></p:sld>".as_slice()),
            ("ppt/slides/slide2.xml", b"<p:sld>".as_slice()),
        ]);

        let err = PackageReader::from_bytes(&data).unwrap_err();
        match err {
            Error::PartDecode { path, .. } => assert_eq!(path, "ppt/slides/slide1.xml"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_binary_entries_are_not_parsed() {
        let data = build_zip(&[("ppt/media/broken.svg", b"<svg><g></svg>".as_slice())]);
        let pkg = PackageReader::from_bytes(&data).unwrap();
        assert_eq!(pkg.binary("ppt/media/broken.svg").unwrap().as_ref(), b"<svg><g></svg>");
    }

    #[test]
    fn test_invalid_archive() {
        let err = PackageReader::from_bytes(b"PK\x03\x04 but not really").unwrap_err();
        assert!(matches!(err, Error::ArchiveOpen(_)));
    }

    #[test]
    fn test_drop_declarations() {
        let data = build_zip(&[("ppt/presentation.xml", PRESENTATION)]);
        let options = TranscodeOptions::new().with_keep_declaration(false);
        let pkg = PackageReader::from_bytes_with(&data, &options).unwrap();
        assert_eq!(pkg.markup("ppt/presentation.xml").unwrap().declaration, None);
    }

    #[test]
    fn test_utf16_part_declared_as_utf8_after_decode() {
        let mut utf16 = UTF16_LE_BOM.to_vec();
        for unit in r#"<?xml version="1.0" encoding="UTF-16"?><a>ü</a>"#.encode_utf16() {
            utf16.extend_from_slice(&unit.to_le_bytes());
        }
        let data = build_zip(&[("custom.xml", utf16.as_slice())]);

        let pkg = PackageReader::from_bytes(&data).unwrap();
        let doc = pkg.markup("custom.xml").unwrap();
        assert_eq!(doc.root.text(), "ü");
        assert_eq!(doc.declaration.as_ref().unwrap().encoding.as_deref(), Some("UTF-8"));
    }
}
