//! Office Open XML (OOXML) package handling.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): the ZIP ↔ [`Package`](opc::Package) transcoder
//! 2. **Format-Specific Queries** (`pptx`): read-only lookups on a decoded
//!    PowerPoint package
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_parts::ooxml::opc::Package;
//! use pptx_parts::ooxml::pptx::{layout_type_index, next_slide_reference_ids};
//!
//! let pkg = Package::open("presentation.pptx")?;
//! let next = next_slide_reference_ids(&pkg);
//! println!("next slide: id={} r:id=rId{}", next.id, next.rid);
//!
//! for (layout_type, path) in layout_type_index(&pkg) {
//!     println!("{layout_type:>12} -> {path}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod opc;
pub mod pptx;
