#![forbid(unsafe_code)]

//! Errors raised by the document model.
//!
//! Almost every document operation is absent-tolerant (unknown nodes and
//! missing attributes read as `None`, mutations on them are no-ops). The only
//! fallible input is a location string.

use std::fmt;

/// Errors from document operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// A location string could not be parsed as an absolute URL.
    InvalidUrl {
        /// The rejected input.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { input, reason } => write!(f, "invalid url '{input}': {reason}"),
        }
    }
}

impl std::error::Error for DomError {}

impl DomError {
    pub(crate) fn invalid_url(input: &str, err: url::ParseError) -> Self {
        Self::InvalidUrl {
            input: input.to_owned(),
            reason: err.to_string(),
        }
    }
}
