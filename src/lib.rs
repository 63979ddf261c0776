//! pptx-parts - lossless editing access to PowerPoint packages
//!
//! A `.pptx` file is a ZIP archive of XML parts (slides, layouts, masters,
//! relationships) and binary media. This crate decodes such an archive into a
//! [`Package`]: a map from archive path to [`Part`], where XML parts become
//! editable element trees and everything else stays as raw bytes. Encoding
//! turns the map back into a valid archive.
//!
//! # Features
//!
//! - **Parallel decode/encode**: entries are processed independently on the
//!   rayon pool
//! - **Stable round trip**: decoding an encoded package yields an equal package
//! - **Attributed errors**: a broken part is reported by its archive path
//! - **Query helpers**: next free slide ids, layout-type → layout-part index
//! - **Async file helpers** (feature `async`, on by default)
//!
//! # Example - Adding media and removing a part
//!
//! ```no_run
//! use pptx_parts::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("presentation.pptx")?;
//!
//! // Every entry is addressable by its archive path
//! for (path, part) in pkg.iter() {
//!     println!("{:?} {}", part.kind(), path);
//! }
//!
//! pkg.insert_binary("ppt/media/image6.jpeg", std::fs::read("cube.jpeg")?);
//! pkg.remove("docProps/thumbnail.jpeg");
//!
//! let bytes = pkg.to_bytes()?;
//! std::fs::write("edited.pptx", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Editing XML
//!
//! ```no_run
//! use pptx_parts::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = Package::open("presentation.pptx")?;
//! if let Some(doc) = pkg.markup_mut("ppt/presentation.xml") {
//!     doc.root
//!         .attributes
//!         .insert("saveSubsetFonts".to_string(), "1".to_string());
//! }
//! pkg.save("edited.pptx")?;
//! # Ok(())
//! # }
//! ```

/// Shared infrastructure: errors, BOM handling and the XML node-tree codec.
pub mod common;

/// OOXML package transcoding and PowerPoint queries.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::xml::{Element, Node, XmlDocument};
pub use common::{Error, Result};
pub use ooxml::opc::{
    Compression, Package, PackageReader, PackageWriter, Part, PartKind, TranscodeOptions, classify,
};
pub use ooxml::pptx::{
    SlideReferenceIds, layout_type_index, max_slide_reference_ids, next_slide_reference_ids,
};
