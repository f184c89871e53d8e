#![forbid(unsafe_code)]

//! Reference page fixtures and recorders for exercising modaly end to end.
//!
//! A [`PageBuilder`] lays out modals described by [`ModalSpec`]s (triggers,
//! header, description, autofocus target, close control) plus one focusable
//! element outside every modal. The resulting [`Page`] owns the
//! [`Document`] and a [`Registry`] and exposes host-style helpers
//! (`click`, `press`) that route through [`Registry::handle_event`].
//!
//! [`EventRecorder`] collects `modaly:open`/`modaly:close` notifications as
//! they bubble to the document root and can export them as JSON lines.
//! [`render_markup`] prints a subtree for readable assertions.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use modaly::markup::{
    ATTR_AUTOFOCUS, ATTR_CLOSE, ATTR_CLOSE_CLASS, ATTR_CLOSE_ON_ESCAPE, ATTR_CLOSE_ON_OUTSIDE,
    ATTR_DESCRIPTION, ATTR_HEADER, ATTR_MODAL, ATTR_OPEN_CLASS, ATTR_PERSIST, ATTR_TRIGGER,
};
use modaly::{CLOSE_EVENT, InitReport, ModalEvent, OPEN_EVENT, Registry};
use modaly_dom::{Document, DomEvent, ElementBuilder, Key, NodeId, ObserverId};

pub mod strategies;

/// Location used when a test does not care about the URL.
pub const BASE_URL: &str = "https://example.test/page";

// ============================================================================
// ModalSpec
// ============================================================================

/// Markup description of one modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSpec {
    pub identifier: String,
    /// Raw attribute values; `None` omits the attribute.
    pub persist: Option<String>,
    pub close_on_escape: Option<String>,
    pub close_on_outside: Option<String>,
    pub open_class: Option<String>,
    pub close_class: Option<String>,
    /// `Some(id)` adds a header; an empty id leaves it without one.
    pub header: Option<String>,
    pub description: Option<String>,
    pub autofocus: bool,
    pub close_control: bool,
    pub triggers: usize,
}

impl ModalSpec {
    /// A modal with one trigger, a close control, and no flags.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            persist: None,
            close_on_escape: None,
            close_on_outside: None,
            open_class: None,
            close_class: None,
            header: None,
            description: None,
            autofocus: false,
            close_control: true,
            triggers: 1,
        }
    }

    #[must_use]
    pub fn persist(mut self) -> Self {
        self.persist = Some("true".into());
        self
    }

    #[must_use]
    pub fn close_on_escape(mut self, value: impl Into<String>) -> Self {
        self.close_on_escape = Some(value.into());
        self
    }

    #[must_use]
    pub fn close_on_outside(mut self, value: impl Into<String>) -> Self {
        self.close_on_outside = Some(value.into());
        self
    }

    #[must_use]
    pub fn classes(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_class = Some(open.into());
        self.close_class = Some(close.into());
        self
    }

    #[must_use]
    pub fn header(mut self, id: impl Into<String>) -> Self {
        self.header = Some(id.into());
        self
    }

    #[must_use]
    pub fn description(mut self, id: impl Into<String>) -> Self {
        self.description = Some(id.into());
        self
    }

    #[must_use]
    pub fn autofocus(mut self) -> Self {
        self.autofocus = true;
        self
    }

    #[must_use]
    pub fn without_close_control(mut self) -> Self {
        self.close_control = false;
        self
    }

    #[must_use]
    pub fn triggers(mut self, count: usize) -> Self {
        self.triggers = count;
        self
    }
}

/// Node handles of one laid-out modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalHandles {
    pub root: NodeId,
    /// Non-focusable inner container; clicks here are inside the modal.
    pub panel: NodeId,
    pub triggers: Vec<NodeId>,
    pub header: Option<NodeId>,
    pub description: Option<NodeId>,
    pub autofocus: Option<NodeId>,
    pub close: Option<NodeId>,
    /// Plain focusable input, always present.
    pub input: NodeId,
}

// ============================================================================
// PageBuilder / Page
// ============================================================================

/// Assembles a [`Page`].
#[derive(Debug, Clone)]
pub struct PageBuilder {
    url: String,
    modals: Vec<ModalSpec>,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self {
            url: BASE_URL.to_owned(),
            modals: Vec::new(),
        }
    }
}

impl PageBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn modal(mut self, spec: ModalSpec) -> Self {
        self.modals.push(spec);
        self
    }

    /// Lay out the page. Triggers precede their modal; an "outside" button
    /// follows all modals.
    pub fn build(self) -> Result<Page, modaly_dom::DomError> {
        let mut doc = Document::new(&self.url)?;
        let body = doc.body();
        let modals = self
            .modals
            .iter()
            .map(|spec| lay_out(&mut doc, body, spec))
            .collect();
        let outside = doc.append(body, ElementBuilder::new("button").id("outside"));
        Ok(Page {
            doc,
            registry: Registry::new(),
            modals,
            outside,
        })
    }
}

fn lay_out(doc: &mut Document, body: NodeId, spec: &ModalSpec) -> ModalHandles {
    let triggers = (0..spec.triggers)
        .map(|_| {
            doc.append(
                body,
                ElementBuilder::new("button").attr(ATTR_TRIGGER, spec.identifier.as_str()),
            )
        })
        .collect();

    let mut root = ElementBuilder::new("div").attr(ATTR_MODAL, spec.identifier.as_str());
    for (name, value) in [
        (ATTR_PERSIST, &spec.persist),
        (ATTR_CLOSE_ON_ESCAPE, &spec.close_on_escape),
        (ATTR_CLOSE_ON_OUTSIDE, &spec.close_on_outside),
        (ATTR_OPEN_CLASS, &spec.open_class),
        (ATTR_CLOSE_CLASS, &spec.close_class),
    ] {
        if let Some(value) = value {
            root = root.attr(name, value.as_str());
        }
    }
    let root = doc.append(body, root);
    let panel = doc.append(root, ElementBuilder::new("div").class("panel"));

    let header = spec.header.as_ref().map(|id| {
        let mut h = ElementBuilder::new("h2").attr(ATTR_HEADER, "");
        if !id.is_empty() {
            h = h.id(id.as_str());
        }
        doc.append(panel, h)
    });
    let description = spec.description.as_ref().map(|id| {
        let mut p = ElementBuilder::new("p").attr(ATTR_DESCRIPTION, "");
        if !id.is_empty() {
            p = p.id(id.as_str());
        }
        doc.append(panel, p)
    });
    let input = doc.append(panel, ElementBuilder::new("input"));
    let autofocus = spec
        .autofocus
        .then(|| doc.append(panel, ElementBuilder::new("textarea").attr(ATTR_AUTOFOCUS, "")));
    let close = spec
        .close_control
        .then(|| doc.append(panel, ElementBuilder::new("button").attr(ATTR_CLOSE, "")));

    ModalHandles {
        root,
        panel,
        triggers,
        header,
        description,
        autofocus,
        close,
        input,
    }
}

/// A laid-out document plus its registry.
#[derive(Debug)]
pub struct Page {
    pub doc: Document,
    pub registry: Registry,
    pub modals: Vec<ModalHandles>,
    /// Focusable element outside every modal.
    pub outside: NodeId,
}

impl Page {
    /// Bootstrap as the host would on document ready.
    pub fn init(&mut self) -> Option<InitReport> {
        self.registry.init(&mut self.doc)
    }

    /// Deliver the content-loaded event.
    pub fn load(&mut self) -> usize {
        let root = self.doc.root();
        self.registry
            .handle_event(&mut self.doc, &DomEvent::content_loaded(root))
    }

    /// Click `target`. Returns the number of listeners that ran.
    pub fn click(&mut self, target: NodeId) -> usize {
        let ran = self.registry.handle_event(&mut self.doc, &DomEvent::click(target));
        tracing::trace!(node = target.index(), ran, "page click");
        ran
    }

    /// Press `key` with focus (or target) on `target`.
    pub fn press(&mut self, target: NodeId, key: Key) -> usize {
        let ran = self
            .registry
            .handle_event(&mut self.doc, &DomEvent::key_down(target, key.clone()));
        tracing::trace!(node = target.index(), ?key, ran, "page key down");
        ran
    }

    /// Handles of the `index`-th modal.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn modal(&self, index: usize) -> &ModalHandles {
        &self.modals[index]
    }

    /// Whether the `index`-th modal is open.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.registry
            .is_open(&self.doc, self.modals[index].root)
            .unwrap_or(false)
    }

    /// Current value of the persistence query key.
    #[must_use]
    pub fn persisted(&self) -> Option<String> {
        modaly::persisted_identifier(&self.doc)
    }
}

// ============================================================================
// EventRecorder
// ============================================================================

/// Collects lifecycle notifications bubbling to the document root.
#[derive(Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<ModalEvent>>>,
    observers: Vec<ObserverId>,
}

impl EventRecorder {
    /// Observe both lifecycle events on `doc`'s root.
    pub fn attach(doc: &mut Document) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let root = doc.root();
        let observers = [OPEN_EVENT, CLOSE_EVENT]
            .into_iter()
            .map(|name| {
                let sink = Rc::clone(&events);
                doc.observe(root, name, move |event| {
                    if let Some(event) = ModalEvent::from_custom(event) {
                        sink.borrow_mut().push(event);
                    }
                })
            })
            .collect();
        Self { events, observers }
    }

    /// Events seen so far.
    #[must_use]
    pub fn events(&self) -> Vec<ModalEvent> {
        self.events.borrow().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<ModalEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Recorded events as JSON lines.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in self.events.borrow().iter() {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Stop observing.
    pub fn detach(self, doc: &mut Document) {
        for id in self.observers {
            doc.unobserve(id);
        }
    }
}

// ============================================================================
// Markup rendering
// ============================================================================

/// Render `node` and its descendants as indented pseudo-markup: one element
/// per line, attributes in insertion order, classes collapsed into `class`.
#[must_use]
pub fn render_markup(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    render_into(doc, node, 0, &mut out);
    out
}

fn render_into(doc: &Document, node: NodeId, depth: usize, out: &mut String) {
    let Some(tag) = doc.tag_name(node) else {
        return;
    };
    let _ = write!(out, "{:indent$}<{tag}", "", indent = depth * 2);
    let class = doc.class_name(node);
    if !class.is_empty() {
        let _ = write!(out, " class=\"{class}\"");
    }
    for (name, value) in doc.attributes(node) {
        let _ = write!(out, " {name}=\"{value}\"");
    }
    out.push_str(">\n");
    for &child in doc.children(node) {
        render_into(doc, child, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_lays_out_handles() {
        let page = PageBuilder::new()
            .modal(ModalSpec::new("a").header("").autofocus().triggers(2))
            .build()
            .expect("page");
        let m = page.modal(0);
        assert_eq!(m.triggers.len(), 2);
        assert!(m.header.is_some());
        assert!(m.description.is_none());
        assert!(m.autofocus.is_some());
        assert!(m.close.is_some());
        assert!(page.doc.contains(m.root, m.input));
        assert!(!page.doc.contains(m.root, page.outside));
    }

    #[test]
    fn render_markup_prints_tree() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.append(
            body,
            ElementBuilder::new("div")
                .class("x")
                .attr("data-a", "1")
                .child(ElementBuilder::new("span")),
        );
        assert_eq!(
            render_markup(&doc, div),
            "<div class=\"x\" data-a=\"1\">\n  <span>\n"
        );
    }
}
