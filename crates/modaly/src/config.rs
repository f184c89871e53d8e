#![forbid(unsafe_code)]

//! Per-modal configuration resolved from markup.
//!
//! Dismissal safety nets are on unless an attribute says exactly `"false"`;
//! location persistence is off unless an attribute says exactly `"true"`.
//! Anything else, including absence, falls back to the default silently.

use modaly_dom::{Document, NodeId};

use crate::markup::{
    ATTR_CLOSE_CLASS, ATTR_CLOSE_ON_ESCAPE, ATTR_CLOSE_ON_OUTSIDE, ATTR_OPEN_CLASS, ATTR_PERSIST,
    CLASS_CLOSE, CLASS_OPEN,
};

/// Modal configuration. Immutable once an instance is built.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalConfig {
    /// Mirror the open modal into the location's query string.
    pub persist: bool,
    /// Close on an Escape key press while open.
    pub close_on_escape: bool,
    /// Close when the modal root itself (the backdrop) is clicked.
    pub close_on_outside_click: bool,
    /// Class present while open; the open/closed state is read from it.
    pub open_class: String,
    /// Class present while closed.
    pub close_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            persist: false,
            close_on_escape: true,
            close_on_outside_click: true,
            open_class: CLASS_OPEN.to_owned(),
            close_class: CLASS_CLOSE.to_owned(),
        }
    }
}

impl ModalConfig {
    /// Resolve from the attributes of `element`.
    #[must_use]
    pub fn from_element(doc: &Document, element: NodeId) -> Self {
        Self::resolve(|name| doc.attribute(element, name))
    }

    /// Resolve from an attribute lookup.
    pub fn resolve<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let defaults = Self::default();
        let class_or = |name: &str, fallback: String| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .map_or(fallback, str::to_owned)
        };
        Self {
            persist: lookup(ATTR_PERSIST) == Some("true"),
            close_on_escape: lookup(ATTR_CLOSE_ON_ESCAPE) != Some("false"),
            close_on_outside_click: lookup(ATTR_CLOSE_ON_OUTSIDE) != Some("false"),
            open_class: class_or(ATTR_OPEN_CLASS, defaults.open_class),
            close_class: class_or(ATTR_CLOSE_CLASS, defaults.close_class),
        }
    }

    /// Set location persistence.
    #[must_use]
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set escape-key dismissal.
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set outside-click dismissal.
    #[must_use]
    pub fn close_on_outside_click(mut self, close: bool) -> Self {
        self.close_on_outside_click = close;
        self
    }

    /// Set the open-state class. An empty name keeps the current one.
    #[must_use]
    pub fn open_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.open_class = class;
        }
        self
    }

    /// Set the close-state class. An empty name keeps the current one.
    #[must_use]
    pub fn close_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() {
            self.close_class = class;
        }
        self
    }
}
