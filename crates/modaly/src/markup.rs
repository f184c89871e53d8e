#![forbid(unsafe_code)]

//! The markup contract: attribute, class, event, and query-key names.
//!
//! Every name is namespaced under [`PREFIX`].

/// Namespace token shared by attributes, classes, events, and the query key.
pub const PREFIX: &str = "modaly";

/// Modal root marker; the value is the modal identifier.
pub const ATTR_MODAL: &str = "data-modaly";
/// Trigger marker; the value names the modal to open.
pub const ATTR_TRIGGER: &str = "data-modaly-trigger";
/// Close control marker (inside a modal root).
pub const ATTR_CLOSE: &str = "data-modaly-close";
/// Header marker, linked through `aria-labelledby`.
pub const ATTR_HEADER: &str = "data-modaly-header";
/// Description marker, linked through `aria-describedby`.
pub const ATTR_DESCRIPTION: &str = "data-modaly-description";
/// Element focused first when the modal opens.
pub const ATTR_AUTOFOCUS: &str = "data-modaly-autofocus";

/// `"true"` enables location persistence.
pub const ATTR_PERSIST: &str = "data-modaly-persist";
/// `"false"` disables escape-key dismissal.
pub const ATTR_CLOSE_ON_ESCAPE: &str = "data-modaly-close-on-escape";
/// `"false"` disables outside-click dismissal.
pub const ATTR_CLOSE_ON_OUTSIDE: &str = "data-modaly-close-on-outside";
/// Custom open-state class name.
pub const ATTR_OPEN_CLASS: &str = "data-modaly-open-class";
/// Custom close-state class name.
pub const ATTR_CLOSE_CLASS: &str = "data-modaly-close-class";

/// Base class stamped on every registered modal root.
pub const CLASS_BASE: &str = "modaly";
/// Default open-state class.
pub const CLASS_OPEN: &str = "modaly-open";
/// Default close-state class.
pub const CLASS_CLOSE: &str = "modaly-close";

/// Query-string key holding the persisted-open modal identifier.
pub const QUERY_KEY: &str = PREFIX;

/// Prefix of generated header ids (`modaly-header-{identifier}`).
pub const HEADER_ID_PREFIX: &str = "modaly-header-";
/// Prefix of generated description ids (`modaly-desc-{identifier}`).
pub const DESCRIPTION_ID_PREFIX: &str = "modaly-desc-";

pub(crate) const ROLE: &str = "role";
pub(crate) const ARIA_MODAL: &str = "aria-modal";
pub(crate) const ARIA_HIDDEN: &str = "aria-hidden";
pub(crate) const ARIA_LABELLEDBY: &str = "aria-labelledby";
pub(crate) const ARIA_DESCRIBEDBY: &str = "aria-describedby";
