#![forbid(unsafe_code)]

//! Host-delivered DOM events and library-dispatched custom events.
//!
//! [`DomEvent`] is what the host feeds in (a click, a key press, the
//! content-loaded signal). [`CustomEvent`] is what code running against the
//! document dispatches outward; observers registered with
//! [`Document::observe`](crate::Document::observe) see it while it bubbles
//! from its target to the document root.

use std::collections::BTreeMap;
use std::fmt;

use crate::document::NodeId;

/// Kinds of host events the document understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary-button activation of an element.
    Click,
    /// A key press delivered to the focused element (or the root).
    KeyDown,
    /// The document finished loading.
    ContentLoaded,
}

/// Logical key values, following the `KeyboardEvent.key` vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` string to a [`Key`].
    #[must_use]
    pub fn from_key_value(value: &str) -> Self {
        match value {
            "Escape" => Self::Escape,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other(value.to_owned()),
                }
            }
        }
    }
}

/// An event delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// What happened.
    pub kind: EventKind,
    /// Innermost node the event was delivered to.
    pub target: NodeId,
    /// Key for [`EventKind::KeyDown`].
    pub key: Option<Key>,
}

impl DomEvent {
    /// A click on `target`.
    #[must_use]
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
        }
    }

    /// A key press delivered to `target`.
    #[must_use]
    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
        }
    }

    /// The content-loaded signal, delivered to the document root.
    #[must_use]
    pub fn content_loaded(root: NodeId) -> Self {
        Self {
            kind: EventKind::ContentLoaded,
            target: root,
            key: None,
        }
    }

    /// Whether this is a key press of `key`.
    #[must_use]
    pub fn is_key(&self, key: &Key) -> bool {
        self.kind == EventKind::KeyDown && self.key.as_ref() == Some(key)
    }
}

/// A named event dispatched by library code, carrying string detail fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    /// Event name, e.g. `modaly:open`.
    pub name: String,
    /// Node the event was dispatched on.
    pub target: NodeId,
    /// Detail payload.
    pub detail: BTreeMap<String, String>,
}

impl CustomEvent {
    /// Create an event with an empty detail payload.
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
            detail: BTreeMap::new(),
        }
    }

    /// Add a detail field.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.detail.insert(key.into(), value.into());
        self
    }

    /// Read a detail field.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.detail.get(key).map(String::as_str)
    }
}

/// Handle for an observer registered with
/// [`Document::observe`](crate::Document::observe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

impl ObserverId {
    /// Raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

pub(crate) type ObserverFn = Box<dyn FnMut(&CustomEvent)>;

struct Observer {
    id: ObserverId,
    node: NodeId,
    name: String,
    callback: ObserverFn,
}

/// Observer callbacks in registration order.
#[derive(Default)]
pub(crate) struct ObserverStore {
    observers: Vec<Observer>,
    next_id: u64,
}

impl fmt::Debug for ObserverStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverStore")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl ObserverStore {
    pub(crate) fn add(&mut self, node: NodeId, name: &str, callback: ObserverFn) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push(Observer {
            id,
            node,
            name: name.to_owned(),
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Invoke observers along `path` (innermost first). Returns invocations.
    pub(crate) fn deliver(&mut self, path: &[NodeId], event: &CustomEvent) -> usize {
        let mut delivered = 0;
        for node in path {
            for observer in self
                .observers
                .iter_mut()
                .filter(|o| o.node == *node && o.name == event.name)
            {
                (observer.callback)(event);
                delivered += 1;
            }
        }
        delivered
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}
