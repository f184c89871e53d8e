#![forbid(unsafe_code)]

//! Declarative, markup-driven dialog controller.
//!
//! Authors mark elements with `data-modaly*` attributes; a [`Registry`] turns
//! each `[data-modaly="id"]` root into a [`ModalInstance`] that wires its
//! triggers, close controls, escape and outside-click dismissal, manages
//! focus, annotates ARIA, and optionally mirrors visibility into the
//! `?modaly=id` query parameter.
//!
//! # Example
//!
//! ```
//! use modaly::Registry;
//! use modaly_dom::{Document, DomEvent, ElementBuilder, Key};
//!
//! let mut doc = Document::new("https://example.test/").unwrap();
//! let body = doc.body();
//! let trigger = doc.append(
//!     body,
//!     ElementBuilder::new("button").attr("data-modaly-trigger", "terms"),
//! );
//! let modal = doc.append(
//!     body,
//!     ElementBuilder::new("div")
//!         .attr("data-modaly", "terms")
//!         .child(ElementBuilder::new("button").attr("data-modaly-close", "")),
//! );
//!
//! let mut registry = Registry::new();
//! let root = doc.root();
//! registry.handle_event(&mut doc, &DomEvent::content_loaded(root));
//!
//! registry.handle_event(&mut doc, &DomEvent::click(trigger));
//! assert_eq!(registry.is_open(&doc, modal), Ok(true));
//!
//! registry.handle_event(&mut doc, &DomEvent::key_down(modal, Key::Escape));
//! assert_eq!(registry.is_open(&doc, modal), Ok(false));
//! ```
//!
//! # Feature Flags
//!
//! - `tracing`: structured logging of registration, transitions, and
//!   skipped discovery (also enables `modaly-dom/tracing`).
//! - `serde`: `Serialize`/`Deserialize` for [`ModalConfig`] and
//!   [`ModalEvent`].

pub mod a11y;
pub mod config;
pub mod error;
pub mod event;
pub mod focus;
pub mod instance;
pub mod listener;
pub mod markup;
pub mod persist;
pub mod registry;
pub mod triggers;

pub use a11y::Labelling;
pub use config::ModalConfig;
pub use error::ModalError;
pub use event::{CLOSE_EVENT, DETAIL_MODAL_ID, ModalEvent, ModalEventKind, OPEN_EVENT};
pub use focus::{FocusReturn, initial_focus_target, is_focusable};
pub use instance::{ModalInstance, ModalState};
pub use listener::{Action, Listener, ListenerId, ListenerTable};
pub use persist::persisted_identifier;
pub use registry::{InitReport, Registry};
pub use triggers::Wiring;

pub use modaly_dom;
