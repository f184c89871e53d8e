#![forbid(unsafe_code)]

//! Focus capture on open and restoration on close.
//!
//! # Invariants
//!
//! - At most one restore target is held at a time.
//! - [`FocusReturn::restore`] consumes the target; a second call is a no-op.
//! - A target that has since been detached is dropped without moving focus.

use modaly_dom::{Document, ElementRef, NodeId};

use crate::markup::ATTR_AUTOFOCUS;

/// Whether an element takes part in sequential focus navigation: buttons,
/// anything with `href`, form fields, or a non-negative `tabindex`.
#[must_use]
pub fn is_focusable(element: ElementRef<'_>) -> bool {
    matches!(element.tag(), "button" | "input" | "select" | "textarea")
        || element.has_attribute("href")
        || element
            .attribute("tabindex")
            .and_then(|v| v.trim().parse::<i32>().ok())
            .is_some_and(|index| index >= 0)
}

/// Element that should receive focus when `modal` opens: the autofocus
/// marker, else the first focusable descendant in document order.
#[must_use]
pub fn initial_focus_target(doc: &Document, modal: NodeId) -> Option<NodeId> {
    doc.query_first(modal, |e| e.has_attribute(ATTR_AUTOFOCUS))
        .or_else(|| doc.query_first(modal, is_focusable))
}

/// The element to hand focus back to when a modal closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusReturn {
    target: Option<NodeId>,
}

impl FocusReturn {
    /// Remember the currently focused element. An already held target is
    /// kept, so re-opening an open modal cannot capture its own content.
    pub fn capture(&mut self, doc: &Document) {
        if self.target.is_none() {
            self.target = doc.active_element();
        }
    }

    /// Held target, if any.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Give focus back and forget the target. Returns whether focus moved.
    pub fn restore(&mut self, doc: &mut Document) -> bool {
        self.target.take().is_some_and(|node| doc.focus(node))
    }
}
