#![forbid(unsafe_code)]

//! Navigable location and session history.
//!
//! [`History`] owns a list of entries and a cursor; the current entry is the
//! document's [`Location`]. `replace_state` rewrites the current entry in
//! place, `push_state` appends a new one and discards any forward entries.
//!
//! # Invariants
//!
//! 1. There is always at least one entry.
//! 2. `replace_state` never changes `len()`.
//! 3. Query parameter edits preserve the order of unrelated parameters.

use url::Url;

use crate::error::DomError;

/// The document's current URL with query-parameter helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Parse an absolute URL.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        Url::parse(input)
            .map(|url| Self { url })
            .map_err(|err| DomError::invalid_url(input, err))
    }

    /// Full serialized URL.
    #[must_use]
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Borrow the underlying parsed URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    /// First value of the query parameter `key`, percent-decoded.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// A copy of this location with `key` set to `value`.
    ///
    /// Replaces every existing occurrence of `key` with a single pair at the
    /// position of the first one; appends when absent.
    #[must_use]
    pub fn with_query_param(&self, key: &str, value: &str) -> Self {
        let mut pairs = self.pairs();
        match pairs.iter().position(|(k, _)| k == key) {
            Some(first) => {
                pairs[first].1 = value.to_owned();
                let mut index = 0;
                pairs.retain(|(k, _)| {
                    let keep = k != key || index == first;
                    index += 1;
                    keep
                });
            }
            None => pairs.push((key.to_owned(), value.to_owned())),
        }
        self.with_pairs(&pairs)
    }

    /// A copy of this location with every occurrence of `key` removed.
    #[must_use]
    pub fn without_query_param(&self, key: &str) -> Self {
        let mut pairs = self.pairs();
        pairs.retain(|(k, _)| k != key);
        self.with_pairs(&pairs)
    }

    fn pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn with_pairs(&self, pairs: &[(String, String)]) -> Self {
        let mut url = self.url.clone();
        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
        Self { url }
    }
}

/// Session history for one document.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl History {
    /// Start a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// The current entry.
    #[must_use]
    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history has at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overwrite the current entry.
    pub fn replace_state(&mut self, location: Location) {
        self.entries[self.cursor] = location;
    }

    /// Append a new entry after the cursor, dropping forward entries.
    pub fn push_state(&mut self, location: Location) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    /// Move back one entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move forward one entry. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
