//! Configuration types for package transcoding.
//!
//! Options apply uniformly to decode and encode; there is no per-call
//! override of the error policy.

/// Compression applied to every entry written by the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Deflate, as written by PowerPoint.
    #[default]
    Deflated,
    /// No compression.
    Stored,
}

impl Compression {
    #[inline]
    pub(crate) fn method(self) -> zip::CompressionMethod {
        match self {
            Compression::Deflated => zip::CompressionMethod::Deflated,
            Compression::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Options for decoding and encoding packages.
///
/// # Examples
///
/// ```rust
/// use pptx_parts::{Compression, TranscodeOptions};
///
/// // Create with defaults
/// let options = TranscodeOptions::default();
///
/// // Or customize
/// let options = TranscodeOptions::new()
///     .with_parallel(false)
///     .with_compression(Compression::Stored);
/// ```
#[derive(Debug, Clone)]
pub struct TranscodeOptions {
    /// Process entries on the rayon thread pool
    pub parallel: bool,
    /// Compression used by the encoder
    pub compression: Compression,
    /// Keep `<?xml ...?>` declarations on decoded markup parts
    pub keep_declaration: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            compression: Compression::Deflated,
            keep_declaration: true,
        }
    }
}

impl TranscodeOptions {
    /// Create a new `TranscodeOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether entries are processed in parallel.
    ///
    /// Results are identical either way; sequential processing is mostly
    /// useful for tiny packages and for debugging.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the compression method for encoded entries.
    #[inline]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set whether decoded markup keeps its XML declaration.
    ///
    /// When disabled, decoded documents carry no declaration and the encoder
    /// writes none for them.
    #[inline]
    pub fn with_keep_declaration(mut self, keep: bool) -> Self {
        self.keep_declaration = keep;
        self
    }
}
