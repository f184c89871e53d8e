#![forbid(unsafe_code)]

//! The per-modal state machine.
//!
//! ```text
//!            open()                         destroy()
//!   Closed ─────────▶ Open      Closed|Open ──────────▶ Destroyed
//!     ▲                 │
//!     └──── close() ────┘       toggle() = close() if open, else open()
//! ```
//!
//! # Invariants
//!
//! - Open/closed is never stored: it is the presence of the configured open
//!   class on the root, so presentation and logic cannot drift.
//! - `open()` and `close()` may be repeated; each re-asserts its classes,
//!   `aria-hidden`, location, and notification.
//! - Focus is captured once per closed → open transition and handed back at
//!   most once per close.
//!
//! # Failure Modes
//!
//! Missing autofocus targets, focusable descendants, or restore targets skip
//! the corresponding focus move; nothing here returns an error.

use modaly_dom::{Document, NodeId};

use crate::a11y::{self, Labelling};
use crate::config::ModalConfig;
use crate::error::ModalError;
use crate::event::{ModalEvent, ModalEventKind};
use crate::focus::{self, FocusReturn};
use crate::listener::{ListenerId, ListenerTable};
use crate::markup::{ATTR_MODAL, CLASS_BASE};
use crate::persist;
use crate::triggers::{self, Wiring};

/// Observable state of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    Closed,
    Open,
}

/// One controlled dialog.
#[derive(Debug, Clone)]
pub struct ModalInstance {
    element: NodeId,
    identifier: String,
    config: ModalConfig,
    focus_return: FocusReturn,
    labelling: Labelling,
    wiring: Wiring,
}

impl ModalInstance {
    /// Construct on `element`: base class, listeners, ARIA annotation.
    pub(crate) fn build(
        doc: &mut Document,
        listeners: &mut ListenerTable,
        element: NodeId,
        config: ModalConfig,
    ) -> Result<Self, ModalError> {
        let identifier = doc
            .attribute(element, ATTR_MODAL)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .ok_or(ModalError::MissingIdentifier(element))?;

        doc.add_class(element, CLASS_BASE);
        let wiring = triggers::wire(doc, listeners, element, &identifier, &config);
        let labelling = a11y::annotate(doc, element, &identifier);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            modal = %identifier,
            triggers = wiring.triggers.len(),
            close_controls = wiring.close_controls.len(),
            persist = config.persist,
            "modal registered"
        );

        Ok(Self {
            element,
            identifier,
            config,
            focus_return: FocusReturn::default(),
            labelling,
            wiring,
        })
    }

    /// The modal root.
    #[inline]
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The `data-modaly` identifier.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Resolved configuration.
    #[inline]
    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    /// Header/description linkage made at construction.
    pub fn labelling(&self) -> &Labelling {
        &self.labelling
    }

    /// Listeners installed at construction.
    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    /// Escape-key listener handle; present iff `close_on_escape`.
    pub fn escape_listener(&self) -> Option<ListenerId> {
        self.wiring.escape
    }

    /// Element focus returns to on close, if one was captured.
    pub fn restore_focus_target(&self) -> Option<NodeId> {
        self.focus_return.target()
    }

    /// Whether the open class is present on the root.
    #[must_use]
    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.element, &self.config.open_class)
    }

    /// [`ModalState`] derived from the root's classes.
    #[must_use]
    pub fn state(&self, doc: &Document) -> ModalState {
        if self.is_open(doc) {
            ModalState::Open
        } else {
            ModalState::Closed
        }
    }

    /// Show the modal and move focus into it.
    pub fn open(&mut self, doc: &mut Document) {
        let was_open = self.is_open(doc);
        doc.remove_class(self.element, &self.config.close_class);
        doc.add_class(self.element, &self.config.open_class);
        a11y::set_hidden(doc, self.element, false);

        if !was_open {
            self.focus_return.capture(doc);
        }
        if let Some(target) = focus::initial_focus_target(doc, self.element) {
            doc.focus(target);
        }

        if self.config.persist {
            persist::write(doc, &self.identifier);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(modal = %self.identifier, was_open, "modal open");

        self.notify(doc, ModalEventKind::Open);
    }

    /// Hide the modal and hand focus back.
    pub fn close(&mut self, doc: &mut Document) {
        doc.add_class(self.element, &self.config.close_class);
        doc.remove_class(self.element, &self.config.open_class);
        a11y::set_hidden(doc, self.element, true);

        let restored = self.focus_return.restore(doc);

        if self.config.persist {
            persist::clear(doc, &self.identifier);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(modal = %self.identifier, restored, "modal close");
        #[cfg(not(feature = "tracing"))]
        let _ = restored;

        self.notify(doc, ModalEventKind::Close);
    }

    /// Close if open, otherwise open.
    pub fn toggle(&mut self, doc: &mut Document) {
        if self.is_open(doc) {
            self.close(doc);
        } else {
            self.open(doc);
        }
    }

    fn notify(&self, doc: &mut Document, kind: ModalEventKind) {
        let event = ModalEvent::new(kind, self.identifier.as_str());
        doc.dispatch_custom(event.to_custom(self.element));
    }

    /// Undo construction: listeners, classes, ARIA attributes, generated ids.
    pub(crate) fn teardown(self, doc: &mut Document, listeners: &mut ListenerTable) {
        let removed = listeners.remove_modal(self.element);
        for class in [
            CLASS_BASE,
            self.config.open_class.as_str(),
            self.config.close_class.as_str(),
        ] {
            doc.remove_class(self.element, class);
        }
        a11y::strip(doc, self.element, &self.labelling);

        #[cfg(feature = "tracing")]
        tracing::debug!(modal = %self.identifier, listeners = removed, "modal destroyed");
        #[cfg(not(feature = "tracing"))]
        let _ = removed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modaly_dom::ElementBuilder;

    struct Fixture {
        doc: Document,
        listeners: ListenerTable,
        modal: ModalInstance,
        opener: NodeId,
    }

    fn fixture(config: ModalConfig) -> Fixture {
        let mut doc = Document::new("https://example.test/").expect("url");
        let body = doc.body();
        let opener = doc.append(body, ElementBuilder::new("button").attr("data-modaly-trigger", "m"));
        let element = doc.append(
            body,
            ElementBuilder::new("div")
                .attr("data-modaly", "m")
                .child(ElementBuilder::new("h2").attr("data-modaly-header", ""))
                .child(ElementBuilder::new("button").id("inner")),
        );
        let mut listeners = ListenerTable::new();
        let modal = ModalInstance::build(&mut doc, &mut listeners, element, config).expect("build");
        Fixture {
            doc,
            listeners,
            modal,
            opener,
        }
    }

    #[test]
    fn build_requires_identifier() {
        let mut doc = Document::default();
        let body = doc.body();
        let bare = doc.append(body, ElementBuilder::new("div").attr("data-modaly", ""));
        let mut listeners = ListenerTable::new();
        let err = ModalInstance::build(&mut doc, &mut listeners, bare, ModalConfig::default())
            .expect_err("empty identifier");
        assert_eq!(err, ModalError::MissingIdentifier(bare));
        assert!(listeners.is_empty());
        assert!(!doc.has_class(bare, "modaly"));
    }

    #[test]
    fn build_stamps_base_and_aria() {
        let f = fixture(ModalConfig::default());
        let el = f.modal.element();
        assert!(f.doc.has_class(el, "modaly"));
        assert_eq!(f.doc.attribute(el, "aria-hidden"), Some("true"));
        assert_eq!(f.modal.state(&f.doc), ModalState::Closed);
        assert!(f.modal.escape_listener().is_some());
        assert_eq!(f.modal.identifier(), "m");
    }

    #[test]
    fn open_and_close_markers() {
        let mut f = fixture(ModalConfig::default());
        let el = f.modal.element();
        f.modal.open(&mut f.doc);
        assert!(f.modal.is_open(&f.doc));
        assert!(!f.doc.has_class(el, "modaly-close"));
        assert_eq!(f.doc.attribute(el, "aria-hidden"), Some("false"));

        f.modal.close(&mut f.doc);
        assert!(!f.modal.is_open(&f.doc));
        assert!(f.doc.has_class(el, "modaly-close"));
        assert_eq!(f.doc.attribute(el, "aria-hidden"), Some("true"));
    }

    #[test]
    fn state_follows_class_not_a_flag() {
        let mut f = fixture(ModalConfig::default());
        let el = f.modal.element();
        f.doc.add_class(el, "modaly-open");
        assert_eq!(f.modal.state(&f.doc), ModalState::Open);
        f.doc.remove_class(el, "modaly-open");
        assert_eq!(f.modal.state(&f.doc), ModalState::Closed);
        f.modal.toggle(&mut f.doc);
        assert_eq!(f.modal.state(&f.doc), ModalState::Open);
    }

    #[test]
    fn custom_classes_drive_state() {
        let mut f = fixture(ModalConfig::default().open_class("shown").close_class("gone"));
        let el = f.modal.element();
        f.modal.open(&mut f.doc);
        assert!(f.doc.has_class(el, "shown"));
        assert!(!f.doc.has_class(el, "modaly-open"));
        f.modal.close(&mut f.doc);
        assert!(f.doc.has_class(el, "gone"));
    }

    #[test]
    fn focus_moves_in_and_back() {
        let mut f = fixture(ModalConfig::default());
        f.doc.focus(f.opener);
        f.modal.open(&mut f.doc);
        let inner = f.doc.get_element_by_id("inner");
        assert_eq!(f.doc.active_element(), inner);
        assert_eq!(f.modal.restore_focus_target(), Some(f.opener));

        f.modal.open(&mut f.doc);
        assert_eq!(f.modal.restore_focus_target(), Some(f.opener));

        f.modal.close(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.opener));
        assert_eq!(f.modal.restore_focus_target(), None);
    }

    #[test]
    fn notifications_follow_transitions() {
        let mut f = fixture(ModalConfig::default());
        f.doc.record_dispatched(true);
        f.modal.open(&mut f.doc);
        f.modal.close(&mut f.doc);
        let events: Vec<_> = f
            .doc
            .take_dispatched()
            .iter()
            .filter_map(ModalEvent::from_custom)
            .collect();
        assert_eq!(
            events,
            vec![
                ModalEvent::new(ModalEventKind::Open, "m"),
                ModalEvent::new(ModalEventKind::Close, "m"),
            ]
        );
    }

    #[test]
    fn persistence_writes_and_clears() {
        let mut f = fixture(ModalConfig::default().persist(true));
        f.modal.open(&mut f.doc);
        assert_eq!(f.doc.location().query_param("modaly").as_deref(), Some("m"));
        f.modal.close(&mut f.doc);
        assert_eq!(f.doc.location().query_param("modaly"), None);
        assert_eq!(f.doc.history().len(), 1);
    }

    #[test]
    fn teardown_reverses_construction() {
        let mut f = fixture(ModalConfig::default());
        f.modal.open(&mut f.doc);
        let el = f.modal.element();
        f.modal.teardown(&mut f.doc, &mut f.listeners);
        assert!(f.doc.classes(el).is_empty());
        assert!(f.listeners.is_empty());
        assert_eq!(f.doc.attributes(el), vec![("data-modaly", "m")]);
    }
}
