//! Unified error types for pptx-parts.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side
//! names the archive path responsible whenever a single entry is at fault.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result};
