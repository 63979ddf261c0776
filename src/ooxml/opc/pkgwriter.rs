//! Package writer: structured package → ZIP archive.
//!
//! Encoding runs in three passes: validate every key, serialize every part
//! (in parallel when enabled), then stream the results into a fresh archive in
//! package order. Nothing is written before the first two passes succeed.

use crate::common::xml::{self, WriteOptions};
use crate::common::{Error, Result};
use crate::ooxml::opc::classify::classify;
use crate::ooxml::opc::config::TranscodeOptions;
use crate::ooxml::opc::package::{Package, Part};
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use rayon::prelude::*;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Package writer that serializes a [`Package`] to a ZIP archive.
///
/// Uses the same error policy as [`PackageReader`](super::PackageReader):
/// the first failing part (in package order) fails the whole encode.
///
/// # Example
///
/// ```no_run
/// use pptx_parts::{Package, PackageWriter};
///
/// let pkg = Package::open("input.pptx")?;
/// PackageWriter::write("output.pptx", &pkg)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write a package to a file.
    pub fn write<P: AsRef<Path>>(path: P, package: &Package) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Write a package to a stream.
    pub fn write_to_stream<W: std::io::Write>(mut writer: W, package: &Package) -> Result<()> {
        let bytes = Self::to_bytes(package)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Serialize a package to bytes with default options.
    pub fn to_bytes(package: &Package) -> Result<Vec<u8>> {
        Self::to_bytes_with(package, &TranscodeOptions::default())
    }

    /// Serialize a package to bytes.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] if a key cannot be used as an archive entry
    ///   name (checked before anything is serialized)
    /// - [`Error::PartEncode`] if a markup tree holds unrepresentable data
    pub fn to_bytes_with(package: &Package, options: &TranscodeOptions) -> Result<Vec<u8>> {
        for (path, _) in package.iter() {
            validate_entry_name(path)?;
        }

        let parts: Vec<(&str, &Part)> = package.iter().collect();
        let blobs: Vec<Result<Cow<'_, [u8]>>> = if options.parallel {
            parts
                .par_iter()
                .map(|&(path, part)| encode_part(path, part))
                .collect()
        } else {
            parts
                .iter()
                .map(|&(path, part)| encode_part(path, part))
                .collect()
        };

        let mut first_error = None;
        let mut encoded = Vec::with_capacity(blobs.len());
        for ((path, _), blob) in parts.iter().zip(blobs) {
            match blob {
                Ok(blob) => encoded.push((*path, blob)),
                Err(e) => {
                    warn!(error = %e, "Part encode failed");
                    first_error.get_or_insert(e);
                },
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        let mut phys_writer = PhysPkgWriter::new(options.compression);
        for (path, blob) in &encoded {
            phys_writer.write(path, blob)?;
        }
        let bytes = phys_writer.finish()?;

        debug!(parts = encoded.len(), bytes = bytes.len(), "Encoded package");
        Ok(bytes)
    }
}

/// Serialize one part to the bytes stored in the archive.
///
/// Trees are written as compact XML and bytes verbatim, whatever the key's
/// extension says.
fn encode_part<'a>(path: &str, part: &'a Part) -> Result<Cow<'a, [u8]>> {
    if classify(path) != part.kind() {
        debug!(path = %path, kind = ?part.kind(), "Part stored under a differently classified key");
    }

    match part {
        Part::Markup(doc) => {
            let text = xml::serialize(doc, WriteOptions::COMPACT)
                .map_err(|e| Error::part_encode(path, e))?;
            Ok(Cow::Owned(text.into_bytes()))
        },
        Part::Binary(data) => Ok(Cow::Borrowed(data.as_ref())),
    }
}

/// Reject keys that cannot round-trip as a file entry name.
fn validate_entry_name(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::invalid_input(path, "empty path"));
    }
    if path.starts_with('/') {
        return Err(Error::invalid_input(path, "archive paths must be relative"));
    }
    if path.ends_with('/') {
        return Err(Error::invalid_input(path, "path names a directory"));
    }
    if path.contains('\\') {
        return Err(Error::invalid_input(path, "backslash in path"));
    }
    if path.contains('\0') {
        return Err(Error::invalid_input(path, "NUL character in path"));
    }
    if path.split('/').any(|segment| matches!(segment, "" | "." | "..")) {
        return Err(Error::invalid_input(path, "empty, '.' or '..' path segment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::xml::{Element, XmlDocument};
    use crate::ooxml::opc::config::Compression;
    use crate::ooxml::opc::phys_pkg::PhysPkgReader;
    use crate::ooxml::opc::pkgreader::PackageReader;

    fn apple() -> Package {
        let mut pkg = Package::new();
        pkg.insert_markup(
            "apple.xml",
            XmlDocument::new(
                Element::new("fruits").with_child(
                    Element::new("fruit")
                        .with_child(Element::new("name").with_text("apple"))
                        .with_child(Element::new("color").with_text("red")),
                ),
            ),
        );
        pkg
    }

    #[test]
    fn test_single_markup_entry() {
        let bytes = PackageWriter::to_bytes(&apple()).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        assert_eq!(reader.member_names(), ["apple.xml"]);
        assert!(!reader.entries()[0].is_dir);

        let xml = String::from_utf8(reader.read(0).unwrap()).unwrap();
        assert_eq!(
            xml,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "<fruits><fruit><name>apple</name><color>red</color></fruit></fruits>"
            )
        );
    }

    #[test]
    fn test_binary_written_verbatim() {
        let mut pkg = Package::new();
        pkg.insert_binary("ppt/media/image1.jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        let bytes = PackageWriter::to_bytes(&pkg).unwrap();
        let mut reader = PhysPkgReader::new(&bytes).unwrap();
        assert_eq!(
            reader.read_by_name("ppt/media/image1.jpeg").unwrap(),
            [0xFF, 0xD8, 0xFF, 0xE0]
        );
    }

    #[test]
    fn test_invalid_paths_rejected() {
        for bad in [
            "",
            "/ppt/presentation.xml",
            "ppt/media/",
            "ppt\\slide.xml",
            "ppt//a.xml",
            "../evil.xml",
            "ppt/./a.xml",
        ] {
            let mut pkg = apple();
            pkg.insert_binary(bad, vec![1, 2, 3]);
            match PackageWriter::to_bytes(&pkg) {
                Err(Error::InvalidInput { path, .. }) => assert_eq!(path, bad),
                other => panic!("expected InvalidInput for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_unserializable_markup_names_its_path() {
        let mut pkg = apple();
        pkg.insert_markup(
            "ppt/slides/slide1.xml",
            XmlDocument::new(Element::new("p:sld").with_text("form feed \u{c}")),
        );
        pkg.insert_markup("ppt/slides/slide2.xml", XmlDocument::new(Element::new("bad name")));

        match PackageWriter::to_bytes(&pkg) {
            Err(Error::PartEncode { path, .. }) => assert_eq!(path, "ppt/slides/slide1.xml"),
            other => panic!("expected PartEncode, got {:?}", other),
        }
    }

    #[test]
    fn test_stored_compression_round_trip() {
        let options = TranscodeOptions::new().with_compression(Compression::Stored);
        let bytes = PackageWriter::to_bytes_with(&apple(), &options).unwrap();
        assert_eq!(PackageReader::from_bytes(&bytes).unwrap(), apple());
    }

    #[test]
    fn test_markup_under_binary_key_comes_back_as_bytes() {
        let mut pkg = Package::new();
        pkg.insert_markup(
            "ppt/media/shape.svg",
            XmlDocument {
                declaration: None,
                root: Element::new("svg"),
            },
        );
        let decoded = PackageReader::from_bytes(&PackageWriter::to_bytes(&pkg).unwrap()).unwrap();
        assert_eq!(decoded.binary("ppt/media/shape.svg").unwrap().as_ref(), b"<svg/>");
    }

    #[test]
    fn test_write_to_stream() {
        let mut out = Vec::new();
        PackageWriter::write_to_stream(&mut out, &apple()).unwrap();
        assert_eq!(PackageReader::from_bytes(&out).unwrap(), apple());
    }
}
