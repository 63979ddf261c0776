//! Common types and utilities shared across the crate.

// Submodule declarations
pub mod bom;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
