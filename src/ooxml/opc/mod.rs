//! Open Packaging Conventions (OPC) transcoding.
//!
//! This module converts a ZIP-based package into a [`Package`] (archive path →
//! [`Part`]) and back:
//!
//! - `classify`: decides markup vs. binary from the entry's extension
//! - `phys_pkg`: the ZIP archive adapter (`zip` crate)
//! - `pkgreader` / `pkgwriter`: decode and encode, fanned out over rayon
//! - `config`: options shared by both directions
//! - `fs`: file and async file entry points
//!
//! # Round trip
//!
//! Archive metadata (timestamps, compression) and XML formatting are not
//! preserved, but decoding an encoded package always yields an equal
//! package.
pub mod classify;
pub mod config;
pub mod fs;
pub mod package;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;

// Re-export commonly used types
pub use classify::{MARKUP_EXTENSIONS, PartKind, classify, extension};
pub use config::{Compression, TranscodeOptions};
pub use package::{Package, Part};
pub use phys_pkg::{EntryInfo, PhysPkgReader, PhysPkgWriter};
pub use pkgreader::PackageReader;
pub use pkgwriter::PackageWriter;
