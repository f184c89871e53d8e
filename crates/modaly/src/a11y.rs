#![forbid(unsafe_code)]

//! ARIA annotation of modal roots.
//!
//! Stamps `role="dialog"`, `aria-modal="true"`, and an initial
//! `aria-hidden="true"`, then links the first header and description
//! descendants through `aria-labelledby` / `aria-describedby`. Existing ids
//! are reused; missing ones are generated from the modal identifier and
//! recorded so [`strip`] can take them back.

use modaly_dom::{Document, NodeId};

use crate::markup::{
    ARIA_DESCRIBEDBY, ARIA_HIDDEN, ARIA_LABELLEDBY, ARIA_MODAL, ATTR_DESCRIPTION, ATTR_HEADER,
    DESCRIPTION_ID_PREFIX, HEADER_ID_PREFIX, ROLE,
};

/// Result of annotating a modal root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labelling {
    /// Header element linked via `aria-labelledby`.
    pub header: Option<NodeId>,
    /// Description element linked via `aria-describedby`.
    pub description: Option<NodeId>,
    /// Elements whose `id` was generated here.
    pub generated_ids: Vec<NodeId>,
}

/// Annotate `element` as a dialog for `identifier`.
///
/// Re-running produces the same linkage; ids generated by an earlier run are
/// reused, so they are reported as generated only once.
pub(crate) fn annotate(doc: &mut Document, element: NodeId, identifier: &str) -> Labelling {
    doc.set_attribute(element, ROLE, "dialog");
    doc.set_attribute(element, ARIA_MODAL, "true");
    doc.set_attribute(element, ARIA_HIDDEN, "true");

    let mut labelling = Labelling::default();
    if let Some((header, generated)) = link(
        doc,
        element,
        ATTR_HEADER,
        ARIA_LABELLEDBY,
        &format!("{HEADER_ID_PREFIX}{identifier}"),
    ) {
        labelling.header = Some(header);
        if generated {
            labelling.generated_ids.push(header);
        }
    }
    if let Some((description, generated)) = link(
        doc,
        element,
        ATTR_DESCRIPTION,
        ARIA_DESCRIBEDBY,
        &format!("{DESCRIPTION_ID_PREFIX}{identifier}"),
    ) {
        labelling.description = Some(description);
        if generated {
            labelling.generated_ids.push(description);
        }
    }
    labelling
}

fn link(
    doc: &mut Document,
    element: NodeId,
    marker: &str,
    relation: &str,
    fallback_id: &str,
) -> Option<(NodeId, bool)> {
    let target = doc.query_first(element, |e| e.has_attribute(marker))?;
    let (id, generated) = match doc.id(target).filter(|id| !id.is_empty()) {
        Some(existing) => (existing.to_owned(), false),
        None => (fallback_id.to_owned(), true),
    };
    if generated {
        doc.set_id(target, &id);
    }
    doc.set_attribute(element, relation, &id);
    Some((target, generated))
}

/// Remove every attribute [`annotate`] added, including generated ids.
pub(crate) fn strip(doc: &mut Document, element: NodeId, labelling: &Labelling) {
    for name in [ROLE, ARIA_MODAL, ARIA_HIDDEN, ARIA_LABELLEDBY, ARIA_DESCRIBEDBY] {
        doc.remove_attribute(element, name);
    }
    for node in &labelling.generated_ids {
        doc.remove_attribute(*node, "id");
    }
}

/// Reflect visibility in `aria-hidden`.
pub(crate) fn set_hidden(doc: &mut Document, element: NodeId, hidden: bool) {
    doc.set_attribute(element, ARIA_HIDDEN, if hidden { "true" } else { "false" });
}
