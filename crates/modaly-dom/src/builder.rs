#![forbid(unsafe_code)]

//! Declarative construction of element subtrees.
//!
//! ```
//! use modaly_dom::{Document, ElementBuilder};
//!
//! let mut doc = Document::default();
//! let body = doc.body();
//! let dialog = doc.append(
//!     body,
//!     ElementBuilder::new("div")
//!         .attr("data-modaly", "login")
//!         .child(ElementBuilder::new("h2").attr("data-modaly-header", ""))
//!         .child(ElementBuilder::new("button").id("login-close")),
//! );
//! assert_eq!(doc.attribute(dialog, "data-modaly"), Some("login"));
//! assert!(doc.get_element_by_id("login-close").is_some());
//! ```

/// A detached element description, materialized by
/// [`Document::append`](crate::Document::append).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementBuilder {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) classes: Vec<String>,
    pub(crate) children: Vec<ElementBuilder>,
}

impl ElementBuilder {
    /// Start an element with the given tag name (lowercased).
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. A later call with the same name wins.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if name == "class" {
            self.classes = split_classes(&value);
            return self;
        }
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Add a class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, child: ElementBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = ElementBuilder>) -> Self {
        self.children.extend(children);
        self
    }
}

pub(crate) fn split_classes(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for class in value.split_ascii_whitespace() {
        if !out.iter().any(|c| c == class) {
            out.push(class.to_owned());
        }
    }
    out
}
