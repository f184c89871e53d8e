#![forbid(unsafe_code)]

//! Owned registry of modal instances: bootstrap, deep-link replay, event
//! routing, and destruction.
//!
//! The registry replaces page-global state. The host constructs one per
//! document and keeps it next to the [`Document`]; instances live in a side
//! table keyed by the modal root's [`NodeId`], and every listener lives in a
//! [`ListenerTable`] owned here.
//!
//! # Invariants
//!
//! 1. At most one instance per element: a second `register` is rejected.
//! 2. `init` discovers at most once per registry.
//! 3. `destroy` removes the instance and every listener it owns; a second
//!    `destroy` is rejected.
//! 4. Events are routed along the propagation path (target first), running
//!    matching listeners in registration order.
//!
//! # Known Limitation
//!
//! Persistence shares one query key. Opening a second persisting modal
//! overwrites the first one's value (last write wins).

use ahash::AHashMap;
use modaly_dom::{Document, DomEvent, EventKind, Key, NodeId};

use crate::config::ModalConfig;
use crate::error::ModalError;
use crate::instance::ModalInstance;
use crate::listener::{Action, ListenerTable};
use crate::markup::ATTR_MODAL;
use crate::persist;

/// Outcome of the one-time bootstrap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Modal roots that received an instance, in document order.
    pub registered: Vec<NodeId>,
    /// Marked elements that were skipped (empty identifier or already
    /// registered).
    pub skipped: Vec<NodeId>,
    /// Modal opened from the location, if any.
    pub restored: Option<NodeId>,
}

/// All modal instances of one document.
#[derive(Debug, Default)]
pub struct Registry {
    instances: AHashMap<NodeId, ModalInstance>,
    order: Vec<NodeId>,
    listeners: ListenerTable,
    initialized: bool,
}

impl Registry {
    /// Create an empty, uninitialized registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Bootstrap ---

    /// Discover every `[data-modaly]` element, register it, then replay the
    /// location. Returns `None` when this registry already ran `init`.
    pub fn init(&mut self, doc: &mut Document) -> Option<InitReport> {
        if self.initialized {
            #[cfg(feature = "tracing")]
            tracing::trace!("registry already initialized");
            return None;
        }
        self.initialized = true;

        let mut report = InitReport::default();
        let roots = doc.query_all(doc.root(), |e| e.has_attribute(ATTR_MODAL));
        for element in roots {
            match self.register(doc, element) {
                Ok(_) => report.registered.push(element),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(element = element.index(), error = %_err, "skipping modal root");
                    report.skipped.push(element);
                }
            }
        }
        report.restored = self.restore_from_location(doc);

        #[cfg(feature = "tracing")]
        tracing::info!(
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            restored = report.restored.is_some(),
            "modaly initialized"
        );
        Some(report)
    }

    /// Whether [`init`](Self::init) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Open the modal named by the location's query key, if it is known.
    pub fn restore_from_location(&mut self, doc: &mut Document) -> Option<NodeId> {
        let identifier = persist::persisted_identifier(doc)?;
        let element = self.find_element(&identifier)?;
        self.instances.get_mut(&element)?.open(doc);
        Some(element)
    }

    // --- Construction / destruction ---

    /// Register `element` with configuration resolved from its attributes.
    pub fn register(
        &mut self,
        doc: &mut Document,
        element: NodeId,
    ) -> Result<&mut ModalInstance, ModalError> {
        let config = ModalConfig::from_element(doc, element);
        self.register_with(doc, element, config)
    }

    /// Register `element` with an explicit configuration.
    pub fn register_with(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        config: ModalConfig,
    ) -> Result<&mut ModalInstance, ModalError> {
        if self.instances.contains_key(&element) {
            return Err(ModalError::AlreadyRegistered(element));
        }
        let instance = ModalInstance::build(doc, &mut self.listeners, element, config)?;
        self.order.push(element);
        Ok(self.instances.entry(element).or_insert(instance))
    }

    /// Reverse everything `register` did to `element`.
    pub fn destroy(&mut self, doc: &mut Document, element: NodeId) -> Result<(), ModalError> {
        let instance = self
            .instances
            .remove(&element)
            .ok_or(ModalError::NotRegistered(element))?;
        self.order.retain(|node| *node != element);
        instance.teardown(doc, &mut self.listeners);
        Ok(())
    }

    // --- Lookup ---

    /// Instance for `element`.
    #[must_use]
    pub fn get(&self, element: NodeId) -> Option<&ModalInstance> {
        self.instances.get(&element)
    }

    /// Mutable instance for `element`.
    pub fn get_mut(&mut self, element: NodeId) -> Option<&mut ModalInstance> {
        self.instances.get_mut(&element)
    }

    /// First registered instance carrying `identifier`.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<&ModalInstance> {
        self.find_element(identifier)
            .and_then(|element| self.instances.get(&element))
    }

    fn find_element(&self, identifier: &str) -> Option<NodeId> {
        self.order.iter().copied().find(|element| {
            self.instances
                .get(element)
                .is_some_and(|i| i.identifier() == identifier)
        })
    }

    /// Instances in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModalInstance> {
        self.order.iter().filter_map(|element| self.instances.get(element))
    }

    /// Elements whose modal is currently open.
    #[must_use]
    pub fn open_modals(&self, doc: &Document) -> Vec<NodeId> {
        self.iter()
            .filter(|i| i.is_open(doc))
            .map(ModalInstance::element)
            .collect()
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether no instance is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The listener side table.
    #[must_use]
    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    // --- Operations ---

    fn instance_mut(&mut self, element: NodeId) -> Result<&mut ModalInstance, ModalError> {
        self.instances
            .get_mut(&element)
            .ok_or(ModalError::NotRegistered(element))
    }

    /// Open the modal on `element`.
    pub fn open(&mut self, doc: &mut Document, element: NodeId) -> Result<(), ModalError> {
        self.instance_mut(element)?.open(doc);
        Ok(())
    }

    /// Close the modal on `element`.
    pub fn close(&mut self, doc: &mut Document, element: NodeId) -> Result<(), ModalError> {
        self.instance_mut(element)?.close(doc);
        Ok(())
    }

    /// Toggle the modal on `element`.
    pub fn toggle(&mut self, doc: &mut Document, element: NodeId) -> Result<(), ModalError> {
        self.instance_mut(element)?.toggle(doc);
        Ok(())
    }

    /// Whether the modal on `element` is open.
    pub fn is_open(&self, doc: &Document, element: NodeId) -> Result<bool, ModalError> {
        self.instances
            .get(&element)
            .map(|i| i.is_open(doc))
            .ok_or(ModalError::NotRegistered(element))
    }

    /// Open the first modal carrying `identifier`.
    pub fn open_by_id(&mut self, doc: &mut Document, identifier: &str) -> Result<NodeId, ModalError> {
        let element = self
            .find_element(identifier)
            .ok_or_else(|| ModalError::UnknownIdentifier(identifier.to_owned()))?;
        self.open(doc, element)?;
        Ok(element)
    }

    /// Close the first modal carrying `identifier`.
    pub fn close_by_id(&mut self, doc: &mut Document, identifier: &str) -> Result<NodeId, ModalError> {
        let element = self
            .find_element(identifier)
            .ok_or_else(|| ModalError::UnknownIdentifier(identifier.to_owned()))?;
        self.close(doc, element)?;
        Ok(element)
    }

    // --- Events ---

    /// Route a host event. `ContentLoaded` bootstraps (once); other events
    /// run the listeners along the propagation path. Returns how many
    /// listeners ran (a bootstrap counts as one).
    pub fn handle_event(&mut self, doc: &mut Document, event: &DomEvent) -> usize {
        if event.kind == EventKind::ContentLoaded {
            return usize::from(self.init(doc).is_some());
        }

        let pending: Vec<(NodeId, NodeId, Action)> = doc
            .event_path(event.target)
            .into_iter()
            .flat_map(|node| {
                self.listeners
                    .matching(node, event.kind)
                    .map(|l| (l.node, l.modal, l.action))
                    .collect::<Vec<_>>()
            })
            .collect();

        let mut ran = 0;
        for (node, modal, action) in pending {
            let Some(instance) = self.instances.get_mut(&modal) else {
                continue;
            };
            ran += 1;
            match action {
                Action::Open => instance.open(doc),
                Action::Close => instance.close(doc),
                Action::DismissOnEscape => {
                    if event.is_key(&Key::Escape) && instance.is_open(doc) {
                        instance.close(doc);
                    }
                }
                Action::DismissOnOutsideClick => {
                    if event.target == node {
                        instance.close(doc);
                    }
                }
            }
        }
        ran
    }
}
