#![forbid(unsafe_code)]

//! Binding triggers, close controls, and dismissal paths to a modal.

use modaly_dom::{Document, EventKind, NodeId};

use crate::config::ModalConfig;
use crate::listener::{Action, ListenerId, ListenerTable};
use crate::markup::{ATTR_CLOSE, ATTR_TRIGGER};

/// Listeners installed for one modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wiring {
    /// Elements anywhere in the document that open the modal.
    pub triggers: Vec<NodeId>,
    /// Close controls inside the modal.
    pub close_controls: Vec<NodeId>,
    /// Backdrop listener on the modal root, if outside clicks dismiss.
    pub outside_click: Option<ListenerId>,
    /// Document-level key listener, if Escape dismisses.
    pub escape: Option<ListenerId>,
}

/// Install every listener `modal` needs.
///
/// Triggers are matched by exact identifier and may appear any number of
/// times. Elements added after this call are not picked up.
pub(crate) fn wire(
    doc: &Document,
    table: &mut ListenerTable,
    modal: NodeId,
    identifier: &str,
    config: &ModalConfig,
) -> Wiring {
    let triggers = doc.query_all(doc.root(), |e| e.attribute(ATTR_TRIGGER) == Some(identifier));
    for trigger in &triggers {
        table.add(*trigger, EventKind::Click, modal, Action::Open);
    }

    let close_controls = doc.query_all(modal, |e| e.has_attribute(ATTR_CLOSE));
    for control in &close_controls {
        table.add(*control, EventKind::Click, modal, Action::Close);
    }

    let outside_click = config
        .close_on_outside_click
        .then(|| table.add(modal, EventKind::Click, modal, Action::DismissOnOutsideClick));
    let escape = config
        .close_on_escape
        .then(|| table.add(doc.root(), EventKind::KeyDown, modal, Action::DismissOnEscape));

    Wiring {
        triggers,
        close_controls,
        outside_click,
        escape,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modaly_dom::ElementBuilder;

    fn page() -> (Document, NodeId) {
        let mut doc = Document::default();
        let body = doc.body();
        doc.append(body, ElementBuilder::new("button").attr(ATTR_TRIGGER, "m"));
        doc.append(body, ElementBuilder::new("a").attr(ATTR_TRIGGER, "m"));
        doc.append(body, ElementBuilder::new("button").attr(ATTR_TRIGGER, "other"));
        doc.append(body, ElementBuilder::new("button").attr(ATTR_CLOSE, ""));
        let modal = doc.append(
            body,
            ElementBuilder::new("div")
                .attr("data-modaly", "m")
                .child(ElementBuilder::new("button").attr(ATTR_CLOSE, ""))
                .child(ElementBuilder::new("span").attr(ATTR_CLOSE, "")),
        );
        (doc, modal)
    }

    #[test]
    fn wires_every_trigger_and_inner_close() {
        let (doc, modal) = page();
        let mut table = ListenerTable::new();
        let wiring = wire(&doc, &mut table, modal, "m", &ModalConfig::default());
        assert_eq!(wiring.triggers.len(), 2);
        assert_eq!(wiring.close_controls.len(), 2);
        assert!(wiring.outside_click.is_some());
        assert!(wiring.escape.is_some());
        assert_eq!(table.len(), 6);
        assert_eq!(table.for_modal(modal).count(), 6);
    }

    #[test]
    fn disabled_dismissal_installs_nothing() {
        let (doc, modal) = page();
        let mut table = ListenerTable::new();
        let config = ModalConfig::default()
            .close_on_escape(false)
            .close_on_outside_click(false);
        let wiring = wire(&doc, &mut table, modal, "m", &config);
        assert_eq!(wiring.escape, None);
        assert_eq!(wiring.outside_click, None);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn escape_listener_sits_on_document_root() {
        let (doc, modal) = page();
        let mut table = ListenerTable::new();
        let wiring = wire(&doc, &mut table, modal, "m", &ModalConfig::default());
        let escape = wiring.escape.and_then(|id| table.get(id)).expect("escape row");
        assert_eq!(escape.node, doc.root());
        assert_eq!(escape.kind, EventKind::KeyDown);
    }
}
