//! Error types for microdata extraction
//!
//! Only structural failures surface here. Per-element oddities (a property
//! without its value attribute, a property outside any scope) are skipped
//! during extraction and never become errors.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing a document or extracting items.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be turned into a document tree.
    #[error("failed to parse document: {reason}")]
    Parse { reason: String },

    /// A structural search could not run (bad selector, unusable root).
    #[error("query `{selector}` failed: {reason}")]
    Query { selector: String, reason: String },
}

impl Error {
    /// Creates a Parse error from any displayable cause.
    pub fn parse(reason: impl fmt::Display) -> Self {
        Error::Parse {
            reason: reason.to_string(),
        }
    }

    /// Creates a Query error for the given selector text.
    pub fn query(selector: impl Into<String>, reason: impl fmt::Display) -> Self {
        Error::Query {
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Error::Query { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
