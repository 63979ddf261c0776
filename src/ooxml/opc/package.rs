//! The structured package: archive path → decoded part.
use crate::common::Result;
use crate::common::xml::XmlDocument;
use crate::ooxml::opc::classify::{PartKind, classify};
use crate::ooxml::opc::config::TranscodeOptions;
use crate::ooxml::opc::pkgreader::PackageReader;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The decoded content of one archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum Part {
    /// An XML part (`.xml`, `.rels`) parsed into a node tree.
    ///
    /// Encoding then decoding yields the tree in its
    /// [`XmlDocument::normalize`] form.
    Markup(XmlDocument),
    /// Any other entry, byte-for-byte.
    Binary(Bytes),
}

impl Part {
    /// The representation this part is stored in.
    #[inline]
    pub fn kind(&self) -> PartKind {
        match self {
            Part::Markup(_) => PartKind::Markup,
            Part::Binary(_) => PartKind::Binary,
        }
    }

    #[inline]
    pub fn as_markup(&self) -> Option<&XmlDocument> {
        match self {
            Part::Markup(doc) => Some(doc),
            Part::Binary(_) => None,
        }
    }

    #[inline]
    pub fn as_markup_mut(&mut self) -> Option<&mut XmlDocument> {
        match self {
            Part::Markup(doc) => Some(doc),
            Part::Binary(_) => None,
        }
    }

    #[inline]
    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Part::Binary(data) => Some(data),
            Part::Markup(_) => None,
        }
    }
}

impl From<XmlDocument> for Part {
    fn from(doc: XmlDocument) -> Self {
        Part::Markup(doc)
    }
}

impl From<Bytes> for Part {
    fn from(data: Bytes) -> Self {
        Part::Binary(data)
    }
}

impl From<Vec<u8>> for Part {
    fn from(data: Vec<u8>) -> Self {
        Part::Binary(Bytes::from(data))
    }
}

/// An in-memory presentation package.
///
/// Maps archive member names (`ppt/slides/slide1.xml`, no leading slash) to
/// their [`Part`]. Decoding fills the map in archive order and new keys are
/// appended, so iteration order is stable; equality ignores order.
///
/// # Example
///
/// ```rust,no_run
/// use pptx_parts::Package;
///
/// let mut pkg = Package::open("deck.pptx")?;
/// pkg.insert_binary("ppt/media/image6.jpeg", std::fs::read("cube.jpeg")?);
/// pkg.remove("docProps/thumbnail.jpeg");
/// pkg.save("deck-edited.pptx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Package {
    parts: IndexMap<String, Part>,
}

impl Package {
    /// Create an empty package.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parts: IndexMap::with_capacity(capacity),
        }
    }

    /// Decode a package from ZIP bytes with default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        PackageReader::from_bytes(data)
    }

    /// Decode a package from ZIP bytes.
    pub fn from_bytes_with(data: &[u8], options: &TranscodeOptions) -> Result<Self> {
        PackageReader::from_bytes_with(data, options)
    }

    /// Encode the package into ZIP bytes with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }

    /// Encode the package into ZIP bytes.
    pub fn to_bytes_with(&self, options: &TranscodeOptions) -> Result<Vec<u8>> {
        PackageWriter::to_bytes_with(self, options)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(path)
    }

    #[inline]
    pub fn get(&self, path: &str) -> Option<&Part> {
        self.parts.get(path)
    }

    #[inline]
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Part> {
        self.parts.get_mut(path)
    }

    /// The XML tree stored at `path`, if that part is markup.
    pub fn markup(&self, path: &str) -> Option<&XmlDocument> {
        self.get(path).and_then(Part::as_markup)
    }

    pub fn markup_mut(&mut self, path: &str) -> Option<&mut XmlDocument> {
        self.get_mut(path).and_then(Part::as_markup_mut)
    }

    /// The bytes stored at `path`, if that part is binary.
    pub fn binary(&self, path: &str) -> Option<&Bytes> {
        self.get(path).and_then(Part::as_binary)
    }

    /// Insert or replace a part, returning the previous one.
    ///
    /// Replacing keeps the key's original position.
    pub fn insert(&mut self, path: impl Into<String>, part: impl Into<Part>) -> Option<Part> {
        self.parts.insert(path.into(), part.into())
    }

    pub fn insert_markup(&mut self, path: impl Into<String>, doc: XmlDocument) -> Option<Part> {
        self.insert(path, Part::Markup(doc))
    }

    pub fn insert_binary(
        &mut self,
        path: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Option<Part> {
        self.insert(path, Part::Binary(data.into()))
    }

    /// Remove a part, preserving the order of the remaining ones.
    pub fn remove(&mut self, path: &str) -> Option<Part> {
        self.parts.shift_remove(path)
    }

    /// Archive paths in package order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Parts in package order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Part)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Part)> {
        self.parts.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Paths whose stored representation disagrees with what the classifier
    /// would pick for the key, e.g. a tree filed under `.png`.
    ///
    /// Such parts still encode: a tree is written as its XML text, bytes are
    /// written verbatim. They come back under the classifier's choice.
    pub fn reclassified(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(path, part)| classify(path) != part.kind())
            .map(|(path, _)| path)
    }
}

impl FromIterator<(String, Part)> for Package {
    fn from_iter<I: IntoIterator<Item = (String, Part)>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Part)> for Package {
    fn extend<I: IntoIterator<Item = (String, Part)>>(&mut self, iter: I) {
        self.parts.extend(iter);
    }
}

impl IntoIterator for Package {
    type Item = (String, Part);
    type IntoIter = indexmap::map::IntoIter<String, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.into_iter()
    }
}
