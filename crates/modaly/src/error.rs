#![forbid(unsafe_code)]

//! Errors from registry operations.
//!
//! Runtime behavior is absent-tolerant: missing headers, focus targets, or
//! deep-link matches skip their effect silently. Errors are reserved for
//! handle misuse at the registry boundary.

use std::fmt;

use modaly_dom::NodeId;

/// Errors from [`Registry`](crate::Registry) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// The element already has an instance.
    AlreadyRegistered(NodeId),
    /// The element has no instance (never registered, or destroyed).
    NotRegistered(NodeId),
    /// The node is not an element or lacks a non-empty `data-modaly` value.
    MissingIdentifier(NodeId),
    /// No registered modal carries this identifier.
    UnknownIdentifier(String),
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered(node) => {
                write!(f, "element #{} already has a modal instance", node.index())
            }
            Self::NotRegistered(node) => {
                write!(f, "element #{} has no modal instance", node.index())
            }
            Self::MissingIdentifier(node) => {
                write!(f, "element #{} has no modal identifier", node.index())
            }
            Self::UnknownIdentifier(id) => write!(f, "no modal with identifier '{id}'"),
        }
    }
}

impl std::error::Error for ModalError {}
