#![forbid(unsafe_code)]

//! Host-driven, deterministic document model for modaly.
//!
//! The dialog controller never touches a browser directly. A host builds a
//! [`Document`] (element tree, location, focus), feeds it [`DomEvent`]s, and
//! observes the [`CustomEvent`]s that library code dispatches. The same model
//! backs browser glue, tests, and fuzzing.
//!
//! # Feature Flags
//!
//! - `tracing`: debug events for focus changes, history writes, and custom
//!   event dispatch.

pub mod builder;
pub mod document;
pub mod error;
pub mod event;
pub mod location;

pub use builder::ElementBuilder;
pub use document::{DEFAULT_LOCATION, Document, ElementRef, NodeId};
pub use error::DomError;
pub use event::{CustomEvent, DomEvent, EventKind, Key, ObserverId};
pub use location::{History, Location};
