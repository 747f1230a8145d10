//! HTML microdata extraction
//!
//! Parses an HTML document and builds the tree of items declared with
//! `itemscope`, `itemtype` and `itemprop`:
//! - Properties attach to their nearest enclosing scope
//! - Scopes used as property values become nested items
//! - Extraction can be restricted to one item type or to a subtree
//!
//! ```no_run
//! let doc = microdata_parser::Document::parse(b"<div itemscope itemtype=\"Person\">...</div>")?;
//! for item in doc.root().find("Person")? {
//!     println!("{}: {:?}", item.item_type(), item.first("name"));
//! }
//! # Ok::<(), microdata_parser::Error>(())
//! ```

pub mod document;
pub mod error;
pub mod microdata;

pub use document::{Document, Node};
pub use error::{Error, Result};
pub use microdata::{ElementKind, Item, PropertyValue};

use std::sync::Arc;

/// Parse `html` and return every item in the document
pub fn find_all(html: &[u8]) -> Result<Vec<Arc<Item>>> {
    Document::parse(html)?.root().find_all()
}

/// Parse `html` and return the items of exactly `item_type`
pub fn find(html: &[u8], item_type: &str) -> Result<Vec<Arc<Item>>> {
    Document::parse(html)?.root().find(item_type)
}
