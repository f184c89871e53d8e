#![forbid(unsafe_code)]

//! Mirroring modal visibility into the location's query string.
//!
//! The wire format is a single pair, `?modaly={identifier}`. Writes always
//! replace the current history entry and are skipped when they would not
//! change the URL. One key is shared by every modal: the last writer wins.

use modaly_dom::Document;

use crate::markup::QUERY_KEY;

/// Identifier currently persisted in the document's location. An empty
/// value reads as absent.
#[must_use]
pub fn persisted_identifier(doc: &Document) -> Option<String> {
    doc.location()
        .query_param(QUERY_KEY)
        .filter(|value| !value.is_empty())
}

/// Record `identifier` as the open modal. Returns whether the URL changed.
pub(crate) fn write(doc: &mut Document, identifier: &str) -> bool {
    if persisted_identifier(doc).as_deref() == Some(identifier) {
        return false;
    }
    let next = doc.location().with_query_param(QUERY_KEY, identifier);
    doc.replace_state(next);
    true
}

/// Drop the key if it currently names `identifier`. Another modal's value is
/// left alone. Returns whether the URL changed.
pub(crate) fn clear(doc: &mut Document, identifier: &str) -> bool {
    if persisted_identifier(doc).as_deref() != Some(identifier) {
        return false;
    }
    let next = doc.location().without_query_param(QUERY_KEY);
    doc.replace_state(next);
    true
}
