//! Page role resolution.
//!
//! Generated gallery pages carry a handful of conventionally-named
//! elements: the photo container, the navigation block, and the
//! anchors inside it. [`PageRefs::resolve`] finds them once per page
//! load; every component works from these node ids instead of querying
//! the tree ad hoc. A missing role stays `None` and the feature that
//! depends on it is disabled.

use skylight_markup::dom::{Document, NodeId};

use crate::gesture::Zone;

/// Node ids for the conventional elements of a gallery page.
#[derive(Debug, Clone, Default)]
pub struct PageRefs {
    /// First `div` with class `photo`; the EXIF table lands here.
    pub photo: Option<NodeId>,
    /// The `a.exif` anchor inside the navigation block.
    pub exif_link: Option<NodeId>,
    /// Anchor wrapping `span.parent` in the navigation block.
    pub parent_link: Option<NodeId>,
    /// Anchor wrapping `span.prev` in the navigation block.
    pub prev_link: Option<NodeId>,
    /// Anchor wrapping `span.next` in the navigation block.
    pub next_link: Option<NodeId>,
}

impl PageRefs {
    /// Resolve the page roles of a freshly parsed document.
    ///
    /// Navigation anchors are identified by the class of the `span`
    /// they wrap; a disabled direction is a bare span without an
    /// anchor and is skipped naturally.
    pub fn resolve(doc: &Document) -> Self {
        let mut refs = PageRefs {
            photo: doc.find_by_class("div", "photo"),
            ..PageRefs::default()
        };

        let Some(nav) = doc.find_by_class("div", "navigation") else {
            return refs;
        };

        let mut anchors = Vec::new();
        collect_anchors(doc, nav, &mut anchors);

        for anchor in anchors {
            let Some(data) = doc.element(anchor) else {
                continue;
            };
            if data.has_class("exif") {
                refs.exif_link.get_or_insert(anchor);
                continue;
            }
            for &child in &doc.get(anchor).children {
                let Some(span) = doc.element(child) else {
                    continue;
                };
                if span.tag != "span" {
                    continue;
                }
                if span.has_class("parent") {
                    refs.parent_link.get_or_insert(anchor);
                } else if span.has_class("prev") {
                    refs.prev_link.get_or_insert(anchor);
                } else if span.has_class("next") {
                    refs.next_link.get_or_insert(anchor);
                }
            }
        }

        refs
    }

    /// The navigation link a zone resolves to, if the page has one.
    pub fn link_for_zone(&self, zone: Zone) -> Option<NodeId> {
        match zone {
            Zone::Parent => self.parent_link,
            Zone::Previous => self.prev_link,
            Zone::Next => self.next_link,
            Zone::None => None,
        }
    }
}

/// Collect every `a` element under `id`, in document order.
fn collect_anchors(doc: &Document, id: NodeId, out: &mut Vec<NodeId>) {
    if let Some(data) = doc.element(id)
        && data.tag == "a"
    {
        out.push(id);
    }
    for &child in &doc.get(id).children {
        collect_anchors(doc, child, out);
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
