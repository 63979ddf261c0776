//! Error taxonomy for package transcoding.
use thiserror::Error;

/// Main error type for pptx-parts operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes are not a readable ZIP archive.
    #[error("Cannot open archive: {0}")]
    ArchiveOpen(String),

    /// A markup entry failed to decode into a node tree.
    #[error("Failed to decode part '{path}': {reason}")]
    PartDecode { path: String, reason: String },

    /// The structured package handed to the encoder is unusable.
    ///
    /// Raised before anything is written to the output archive.
    #[error("Invalid package entry '{path}': {reason}")]
    InvalidInput { path: String, reason: String },

    /// A markup part could not be serialized.
    #[error("Failed to encode part '{path}': {reason}")]
    PartEncode { path: String, reason: String },

    /// Source file does not exist
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    /// ZIP archive error while writing
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML error not yet attributed to a package path
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// The archive path this error is attributed to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::PartDecode { path, .. }
            | Error::InvalidInput { path, .. }
            | Error::PartEncode { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Attribute a codec-level failure to the part at `path` during decode.
    pub(crate) fn part_decode(path: &str, err: impl std::fmt::Display) -> Self {
        Error::PartDecode {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }

    /// Attribute a codec-level failure to the part at `path` during encode.
    pub(crate) fn part_encode(path: &str, err: impl std::fmt::Display) -> Self {
        Error::PartEncode {
            path: path.to_string(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn invalid_input(path: &str, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for pptx-parts operations.
pub type Result<T> = std::result::Result<T, Error>;
