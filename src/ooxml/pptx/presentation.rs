//! Slide reference lookups on `ppt/presentation.xml`.
//!
//! The presentation part lists its slides as
//!
//! ```xml
//! <p:sldIdLst>
//!   <p:sldId id="256" r:id="rId2"/>
//! </p:sldIdLst>
//! ```
//!
//! where `id` is the numeric slide id and `r:id` names the relationship in
//! `ppt/_rels/presentation.xml.rels` pointing at the slide part.

use super::{PRESENTATION_PART, PRESENTATION_RELS_PART};
use crate::common::xml::Element;
use crate::ooxml::opc::Package;
use serde::{Deserialize, Serialize};

/// Smallest slide id PowerPoint accepts.
pub const MIN_SLIDE_ID: i64 = 256;

/// Maximum slide id and `rId` number in use.
///
/// `-1` means "none present".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideReferenceIds {
    pub id: i64,
    pub rid: i64,
}

impl SlideReferenceIds {
    /// Sentinel for a presentation without slide references.
    pub const NONE: SlideReferenceIds = SlideReferenceIds { id: -1, rid: -1 };
}

impl Default for SlideReferenceIds {
    fn default() -> Self {
        Self::NONE
    }
}

/// Parse the numeric part of a relationship id (`rId7` → 7).
#[inline]
fn rid_number(r_id: &str) -> Option<i64> {
    let digits = r_id.strip_prefix("rId")?;
    atoi_simd::parse::<i64, false, false>(digits.as_bytes()).ok()
}

#[inline]
fn parse_id(id: &str) -> Option<i64> {
    atoi_simd::parse::<i64, false, false>(id.as_bytes()).ok()
}

/// Iterate the `p:sldId` records of every `p:sldIdLst` under the root.
fn slide_references(root: &Element) -> impl Iterator<Item = &Element> {
    root.children_named("p:sldIdLst")
        .flat_map(|list| list.children_named("p:sldId"))
}

/// Find the largest slide id and `r:id` number referenced by
/// `ppt/presentation.xml`.
///
/// Both maxima are computed independently over all records of all
/// `p:sldIdLst` groups. Records whose attribute is missing or not numeric are
/// ignored for that maximum. Returns [`SlideReferenceIds::NONE`] when the
/// part, the list or the records are absent.
///
/// # Examples
///
/// ```
/// use pptx_parts::common::xml::parse;
/// use pptx_parts::ooxml::pptx::{SlideReferenceIds, max_slide_reference_ids};
/// use pptx_parts::Package;
///
/// let mut pkg = Package::new();
/// assert_eq!(max_slide_reference_ids(&pkg), SlideReferenceIds::NONE);
///
/// pkg.insert_markup("ppt/presentation.xml", parse(
///     r#"<p:presentation><p:sldIdLst>
///          <p:sldId id="262" r:id="rId5"/>
///          <p:sldId id="261" r:id="rId6"/>
///          <p:sldId id="267" r:id="rId7"/>
///        </p:sldIdLst></p:presentation>"#,
/// )?);
/// assert_eq!(max_slide_reference_ids(&pkg), SlideReferenceIds { id: 267, rid: 7 });
/// # Ok::<(), pptx_parts::Error>(())
/// ```
pub fn max_slide_reference_ids(pkg: &Package) -> SlideReferenceIds {
    let Some(doc) = pkg.markup(PRESENTATION_PART) else {
        return SlideReferenceIds::NONE;
    };

    slide_references(&doc.root).fold(SlideReferenceIds::NONE, |acc, sld_id| {
        let id = sld_id.attr("id").and_then(parse_id).unwrap_or(-1);
        let rid = sld_id.attr("r:id").and_then(rid_number).unwrap_or(-1);
        SlideReferenceIds {
            id: acc.id.max(id),
            rid: acc.rid.max(rid),
        }
    })
}

/// Identifiers to use for the next slide added to the presentation.
///
/// The id is one past the current maximum but never below 256. The `rId`
/// is one past the largest number used either by a slide reference or by
/// any relationship in `ppt/_rels/presentation.xml.rels` (masters, themes
/// and slides share that id space).
pub fn next_slide_reference_ids(pkg: &Package) -> SlideReferenceIds {
    let current = max_slide_reference_ids(pkg);

    let max_rel = pkg
        .markup(PRESENTATION_RELS_PART)
        .map(|doc| {
            doc.root
                .children_named("Relationship")
                .filter_map(|rel| rel.attr("Id").and_then(rid_number))
                .max()
                .unwrap_or(-1)
        })
        .unwrap_or(-1);

    SlideReferenceIds {
        id: (current.id + 1).max(MIN_SLIDE_ID),
        rid: current.rid.max(max_rel).max(0) + 1,
    }
}
