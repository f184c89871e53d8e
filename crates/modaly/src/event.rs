#![forbid(unsafe_code)]

//! Lifecycle notifications dispatched on the modal root.

use modaly_dom::{CustomEvent, NodeId};

/// Name of the event dispatched after a modal opens.
pub const OPEN_EVENT: &str = "modaly:open";
/// Name of the event dispatched after a modal closes.
pub const CLOSE_EVENT: &str = "modaly:close";
/// Detail key carrying the modal identifier.
pub const DETAIL_MODAL_ID: &str = "modalId";

/// Which transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModalEventKind {
    Open,
    Close,
}

impl ModalEventKind {
    /// DOM event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Open => OPEN_EVENT,
            Self::Close => CLOSE_EVENT,
        }
    }

    /// Parse a DOM event name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            OPEN_EVENT => Some(Self::Open),
            CLOSE_EVENT => Some(Self::Close),
            _ => None,
        }
    }
}

/// A lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModalEvent {
    pub kind: ModalEventKind,
    #[cfg_attr(feature = "serde", serde(rename = "modalId"))]
    pub modal_id: String,
}

impl ModalEvent {
    pub fn new(kind: ModalEventKind, modal_id: impl Into<String>) -> Self {
        Self {
            kind,
            modal_id: modal_id.into(),
        }
    }

    /// Build the DOM event dispatched on `target`.
    #[must_use]
    pub fn to_custom(&self, target: NodeId) -> CustomEvent {
        CustomEvent::new(self.kind.name(), target).with_detail(DETAIL_MODAL_ID, &self.modal_id)
    }

    /// Recognize a modaly notification among arbitrary custom events.
    #[must_use]
    pub fn from_custom(event: &CustomEvent) -> Option<Self> {
        let kind = ModalEventKind::from_name(&event.name)?;
        let modal_id = event.detail(DETAIL_MODAL_ID)?;
        Some(Self::new(kind, modal_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modaly_dom::Document;

    #[test]
    fn names() {
        assert_eq!(ModalEventKind::Open.name(), "modaly:open");
        assert_eq!(ModalEventKind::Close.name(), "modaly:close");
        assert_eq!(ModalEventKind::from_name("modaly:close"), Some(ModalEventKind::Close));
        assert_eq!(ModalEventKind::from_name("click"), None);
    }

    #[test]
    fn custom_event_carries_identifier() {
        let doc = Document::default();
        let ev = ModalEvent::new(ModalEventKind::Open, "login").to_custom(doc.body());
        assert_eq!(ev.name, "modaly:open");
        assert_eq!(ev.detail("modalId"), Some("login"));
        assert_eq!(ModalEvent::from_custom(&ev), Some(ModalEvent::new(ModalEventKind::Open, "login")));
    }

    #[test]
    fn foreign_events_are_ignored() {
        let doc = Document::default();
        assert_eq!(ModalEvent::from_custom(&CustomEvent::new("modaly:open", doc.body())), None);
        assert_eq!(ModalEvent::from_custom(&CustomEvent::new("other", doc.body())), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_dom_field_names() {
        let ev = ModalEvent::new(ModalEventKind::Close, "terms");
        let json = serde_json::to_string(&ev).expect("serialize");
        assert_eq!(json, r#"{"kind":"close","modalId":"terms"}"#);
        let back: ModalEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ev);
    }
}
