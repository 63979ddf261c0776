//! PowerPoint-specific queries over a decoded [`Package`](crate::Package).
//!
//! These helpers only read the package. Missing parts or structure are
//! reported through sentinel values and empty results, never as errors: a
//! freshly created deck legitimately has no slides.

pub mod layouts;
pub mod presentation;

/// Archive path of the presentation part.
pub const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Archive path of the presentation part's relationships.
pub const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

/// Directory holding slide layout parts.
pub const SLIDE_LAYOUTS_DIR: &str = "ppt/slideLayouts/";

pub use layouts::{is_layout_path, layout_type_index};
pub use presentation::{SlideReferenceIds, max_slide_reference_ids, next_slide_reference_ids};
