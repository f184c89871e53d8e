#![forbid(unsafe_code)]

//! Arena-backed document: element tree, attributes, class lists, focus,
//! location, and custom-event observers.
//!
//! Nodes are addressed by [`NodeId`] handles that stay valid for the life of
//! the document; detaching a subtree disconnects it without freeing slots.
//!
//! # Invariants
//!
//! 1. The root is the only node without an element payload, and `body` is
//!    always a child of the root.
//! 2. `children` and `parent` links agree: `n ∈ children(p) ⇔ parent(n) = p`.
//! 3. The active element, when set, is a connected element.
//! 4. A class appears at most once in a class list.
//!
//! # Failure Modes
//!
//! | Input | Behavior |
//! |-------|----------|
//! | Unknown `NodeId` | Reads return `None`/empty, mutations are no-ops |
//! | Focus on detached node | `focus` returns `false`, focus unchanged |
//! | Invalid location string | `DomError::InvalidUrl` |

use ahash::AHashMap;

use crate::builder::{ElementBuilder, split_classes};
use crate::error::DomError;
use crate::event::{CustomEvent, ObserverId, ObserverStore};
use crate::location::{History, Location};

/// Location used by [`Document::default`].
pub const DEFAULT_LOCATION: &str = "http://localhost/";

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element(ElementData),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Borrowed view of one element, handed to query predicates.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    node: NodeId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// The element's handle.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &'a str {
        &self.data.tag
    }

    /// Attribute value.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the attribute is present (with any value).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.data.classes.iter().any(|c| c == class)
    }
}

/// A host-driven document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    id_index: AHashMap<String, Vec<NodeId>>,
    active: Option<NodeId>,
    history: History,
    observers: ObserverStore,
    record_dispatched: bool,
    dispatched: Vec<CustomEvent>,
}

/// An empty document at [`DEFAULT_LOCATION`].
///
/// # Panics
///
/// Never in practice: [`DEFAULT_LOCATION`] is a constant absolute URL, and a
/// unit test pins that it parses.
impl Default for Document {
    fn default() -> Self {
        let location = match Location::parse(DEFAULT_LOCATION) {
            Ok(location) => location,
            Err(err) => unreachable!("default location is valid: {err}"),
        };
        Self::with_location(location)
    }
}

impl Document {
    /// Create an empty document (root + `body`) at the given URL.
    pub fn new(url: &str) -> Result<Self, DomError> {
        Location::parse(url).map(Self::with_location)
    }

    /// Create an empty document at an already-parsed location.
    #[must_use]
    pub fn with_location(location: Location) -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            root: NodeId(0),
            body: NodeId(0),
            id_index: AHashMap::new(),
            active: None,
            history: History::new(location),
            observers: ObserverStore::default(),
            record_dispatched: false,
            dispatched: Vec::new(),
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body);
        doc.body = body;
        doc
    }

    // --- Tree ---

    /// The document node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element.
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of nodes ever created (connected or not).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Element(ElementData {
                tag: tag.to_ascii_lowercase(),
                attrs: Vec::new(),
                classes: Vec::new(),
            }),
        });
        id
    }

    /// Materialize `builder` as the last child of `parent`.
    ///
    /// An unknown `parent` leaves the new subtree detached.
    pub fn append(&mut self, parent: NodeId, builder: ElementBuilder) -> NodeId {
        let ElementBuilder {
            tag,
            attrs,
            classes,
            children,
        } = builder;
        let node = self.create_element(&tag);
        for (name, value) in attrs {
            self.set_attribute(node, &name, &value);
        }
        if let Some(data) = self.data_mut(node) {
            data.classes = classes;
        }
        self.append_child(parent, node);
        for child in children {
            self.append(node, child);
        }
        node
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    ///
    /// Returns `false` when either handle is unknown, `child` is the root,
    /// or `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || child == self.root
            || self.contains(child, parent)
        {
            return false;
        }
        self.unlink(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    /// Disconnect `node` from its parent. Focus inside the subtree is dropped.
    pub fn detach(&mut self, node: NodeId) -> bool {
        if node == self.root || self.parent(node).is_none() {
            return false;
        }
        if self.active.is_some_and(|active| self.contains(node, active)) {
            self.active = None;
        }
        self.unlink(node);
        true
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Parent of `node`.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Children of `node` in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Ancestors of `node`, nearest first, excluding `node`.
    #[must_use]
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            out.push(current);
            cursor = self.parent(current);
        }
        out
    }

    /// Descendants of `scope` in document (pre-)order, excluding `scope`.
    #[must_use]
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if self.node(node).is_none() {
            return false;
        }
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// Whether `node` is reachable from the root.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    // --- Elements ---

    fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    fn data(&self, node: NodeId) -> Option<&ElementData> {
        match &self.node(node)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Root => None,
        }
    }

    fn data_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Root => None,
        }
    }

    /// Element view for `node`, or `None` for the root or unknown handles.
    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.data(node).map(|data| ElementRef { node, data })
    }

    /// Whether `node` is an element.
    #[must_use]
    pub fn is_element(&self, node: NodeId) -> bool {
        self.data(node).is_some()
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.data(node).map(|d| d.tag.as_str())
    }

    // --- Attributes ---

    /// Attribute value. The class list is not exposed here; see
    /// [`Document::class_name`].
    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    /// Whether the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Attributes in insertion order.
    #[must_use]
    pub fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.data(node).map_or_else(Vec::new, |d| {
            d.attrs
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str()))
                .collect()
        })
    }

    /// Set an attribute. Setting `class` replaces the class list.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if name == "class" {
            if let Some(data) = self.data_mut(node) {
                data.classes = split_classes(value);
            }
            return;
        }
        let Some(data) = self.data_mut(node) else {
            return;
        };
        let previous = match data.attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value.to_owned())),
            None => {
                data.attrs.push((name.to_owned(), value.to_owned()));
                None
            }
        };
        if name == "id" {
            if let Some(previous) = previous {
                self.unindex_id(&previous, node);
            }
            self.index_id(value, node);
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> Option<String> {
        if name == "class" {
            let data = self.data_mut(node)?;
            let previous = data.classes.join(" ");
            data.classes.clear();
            return Some(previous);
        }
        let data = self.data_mut(node)?;
        let index = data.attrs.iter().position(|(n, _)| n == name)?;
        let (_, previous) = data.attrs.remove(index);
        if name == "id" {
            self.unindex_id(&previous, node);
        }
        Some(previous)
    }

    // --- Ids ---

    /// The element's `id`, if any.
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// Set the element's `id`.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.set_attribute(node, "id", id);
    }

    /// First connected element carrying `id`.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index
            .get(id)?
            .iter()
            .copied()
            .find(|node| self.is_connected(*node))
    }

    fn index_id(&mut self, id: &str, node: NodeId) {
        if id.is_empty() {
            return;
        }
        let nodes = self.id_index.entry(id.to_owned()).or_default();
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }

    fn unindex_id(&mut self, id: &str, node: NodeId) {
        let Some(nodes) = self.id_index.get_mut(id) else {
            return;
        };
        nodes.retain(|candidate| *candidate != node);
        if nodes.is_empty() {
            self.id_index.remove(id);
        }
    }

    // --- Classes ---

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    /// Add `class`; returns `true` if the list changed.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.data_mut(node) {
            Some(data) if !class.is_empty() && !data.classes.iter().any(|c| c == class) => {
                data.classes.push(class.to_owned());
                true
            }
            _ => false,
        }
    }

    /// Remove `class`; returns `true` if the list changed.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        let Some(data) = self.data_mut(node) else {
            return false;
        };
        let before = data.classes.len();
        data.classes.retain(|c| c != class);
        data.classes.len() != before
    }

    /// Class list in order.
    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.data(node)
            .map(|d| d.classes.as_slice())
            .unwrap_or_default()
    }

    /// Space-joined class list (the `className` view).
    #[must_use]
    pub fn class_name(&self, node: NodeId) -> String {
        self.classes(node).join(" ")
    }

    // --- Queries ---

    /// First element under `scope` (document order, excluding `scope`)
    /// matching `predicate`.
    pub fn query_first(
        &self,
        scope: NodeId,
        mut predicate: impl FnMut(ElementRef<'_>) -> bool,
    ) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.element(*node).is_some_and(&mut predicate))
    }

    /// Every element under `scope` matching `predicate`, in document order.
    pub fn query_all(
        &self,
        scope: NodeId,
        mut predicate: impl FnMut(ElementRef<'_>) -> bool,
    ) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.element(*node).is_some_and(&mut predicate))
            .collect()
    }

    // --- Focus ---

    /// The focused element.
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Focus a connected element. Returns `false` (focus unchanged) otherwise.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_element(node) || !self.is_connected(node) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(node = node.index(), "focus");
        self.active = Some(node);
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    // --- Location ---

    /// Current location.
    #[must_use]
    pub fn location(&self) -> &Location {
        self.history.current()
    }

    /// Session history.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Rewrite the current history entry.
    pub fn replace_state(&mut self, location: Location) {
        #[cfg(feature = "tracing")]
        tracing::debug!(href = location.href(), "history.replace_state");
        self.history.replace_state(location);
    }

    /// Push a new history entry.
    pub fn push_state(&mut self, location: Location) {
        #[cfg(feature = "tracing")]
        tracing::debug!(href = location.href(), "history.push_state");
        self.history.push_state(location);
    }

    /// Parse `url` and push it as a new entry.
    pub fn navigate(&mut self, url: &str) -> Result<(), DomError> {
        let location = Location::parse(url)?;
        self.push_state(location);
        Ok(())
    }

    // --- Events ---

    /// Propagation path for an event targeted at `target`: the target, then
    /// its ancestors up to the root. Empty for unknown handles.
    #[must_use]
    pub fn event_path(&self, target: NodeId) -> Vec<NodeId> {
        if self.node(target).is_none() {
            return Vec::new();
        }
        let mut path = vec![target];
        path.extend(self.ancestors(target));
        path
    }

    /// Register `callback` for custom events named `name` reaching `node`.
    pub fn observe(
        &mut self,
        node: NodeId,
        name: &str,
        callback: impl FnMut(&CustomEvent) + 'static,
    ) -> ObserverId {
        self.observers.add(node, name, Box::new(callback))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Dispatch `event` on its target, bubbling to the root. Returns the
    /// number of observer invocations.
    pub fn dispatch_custom(&mut self, event: CustomEvent) -> usize {
        let path = self.event_path(event.target);
        let delivered = self.observers.deliver(&path, &event);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            name = %event.name,
            target = event.target.index(),
            delivered,
            "dispatch_custom"
        );
        if self.record_dispatched {
            self.dispatched.push(event);
        }
        delivered
    }

    /// Turn the dispatched-event log on or off. Off by default; turning it
    /// off also drops whatever was recorded.
    pub fn record_dispatched(&mut self, enabled: bool) {
        self.record_dispatched = enabled;
        if !enabled {
            self.dispatched = Vec::new();
        }
    }

    /// Whether dispatched events are being recorded.
    #[must_use]
    pub fn is_recording_dispatched(&self) -> bool {
        self.record_dispatched
    }

    /// Custom events dispatched since the last
    /// [`take_dispatched`](Self::take_dispatched), while recording was on.
    #[must_use]
    pub fn dispatched(&self) -> &[CustomEvent] {
        &self.dispatched
    }

    /// Drain the dispatched-event log.
    pub fn take_dispatched(&mut self) -> Vec<CustomEvent> {
        std::mem::take(&mut self.dispatched)
    }
}
