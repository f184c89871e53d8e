#![forbid(unsafe_code)]

//! Listener side table.
//!
//! Instead of attaching closures to elements, every binding is a row
//! `(node, event kind) -> (modal, action)` owned by the registry. Routing an
//! event means walking its propagation path and running matching rows in
//! registration order.
//!
//! # Invariants
//!
//! - Listener ids are never reused within a table.
//! - Rows for one `(node, kind)` keep registration order.
//! - Removing a modal's rows leaves every other modal's rows untouched.

use modaly_dom::{EventKind, NodeId};

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw id value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// What a listener does to its modal when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Open the modal (trigger activation).
    Open,
    /// Close the modal (close control activation).
    Close,
    /// Close if the key is Escape and the modal is open.
    DismissOnEscape,
    /// Close if the click landed on the modal root itself.
    DismissOnOutsideClick,
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    /// Node the listener is attached to.
    pub node: NodeId,
    pub kind: EventKind,
    /// Modal root the action applies to.
    pub modal: NodeId,
    pub action: Action,
}

/// Registry-owned listener rows.
#[derive(Debug, Default)]
pub struct ListenerTable {
    rows: Vec<Listener>,
    next_id: u64,
}

impl ListenerTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row and return its id.
    pub fn add(&mut self, node: NodeId, kind: EventKind, modal: NodeId, action: Action) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.rows.push(Listener {
            id,
            node,
            kind,
            modal,
            action,
        });
        id
    }

    /// Remove one row. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    /// Remove every row acting on `modal`. Returns how many were removed.
    pub fn remove_modal(&mut self, modal: NodeId) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.modal != modal);
        before - self.rows.len()
    }

    /// Rows attached to `node` for `kind`, in registration order.
    pub fn matching(&self, node: NodeId, kind: EventKind) -> impl Iterator<Item = &Listener> {
        self.rows
            .iter()
            .filter(move |row| row.node == node && row.kind == kind)
    }

    /// Rows acting on `modal`.
    pub fn for_modal(&self, modal: NodeId) -> impl Iterator<Item = &Listener> {
        self.rows.iter().filter(move |row| row.modal == modal)
    }

    /// Look up a row.
    #[must_use]
    pub fn get(&self, id: ListenerId) -> Option<&Listener> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
