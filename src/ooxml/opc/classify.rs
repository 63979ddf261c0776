//! Markup-vs-binary decision for archive entries.
//!
//! The same rule is applied when decoding and when encoding, so a part keeps
//! its representation across a round trip unless the caller renames it.

use serde::{Deserialize, Serialize};

/// Extensions whose entries are decoded as XML trees.
pub const MARKUP_EXTENSIONS: [&str; 2] = ["xml", "rels"];

/// How an archive entry is represented in a [`Package`](super::Package).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartKind {
    /// Parsed into an XML node tree.
    Markup,
    /// Kept as opaque bytes (images, media, embedded objects, fonts...).
    Binary,
}

/// Extension of the final path segment, without the leading period.
///
/// Returns an empty string when the segment has no period. Works on archive
/// member names, which carry no leading slash.
///
/// # Examples
///
/// ```
/// use pptx_parts::ooxml::opc::extension;
/// assert_eq!(extension("ppt/slides/slide1.xml"), "xml");
/// assert_eq!(extension("_rels/.rels"), "rels");
/// assert_eq!(extension("ppt.v2/media/image"), "");
/// ```
pub fn extension(path: &str) -> &str {
    let filename = path.rsplit('/').next().unwrap_or(path);
    match filename.rfind('.') {
        Some(pos) => &filename[pos + 1..],
        None => "",
    }
}

/// Classify an archive path.
///
/// Markup iff the extension is exactly `xml` or `rels` (case-sensitive).
/// Total: every string classifies, extension-less paths as binary.
///
/// # Examples
///
/// ```
/// use pptx_parts::ooxml::opc::{PartKind, classify};
/// assert_eq!(classify("[Content_Types].xml"), PartKind::Markup);
/// assert_eq!(classify("ppt/slides/_rels/slide1.xml.rels"), PartKind::Markup);
/// assert_eq!(classify("ppt/media/image1.png"), PartKind::Binary);
/// assert_eq!(classify("docProps/thumbnail.XML"), PartKind::Binary);
/// ```
#[inline]
pub fn classify(path: &str) -> PartKind {
    if MARKUP_EXTENSIONS.contains(&extension(path)) {
        PartKind::Markup
    } else {
        PartKind::Binary
    }
}
