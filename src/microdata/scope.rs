//! Locating the item scope that owns a property element

use scraper::Selector;

use crate::document::{compile, Node};
use crate::error::Result;

/// Which ancestor scopes may own a property
#[derive(Debug)]
pub struct ScopeFilter {
    selector: Selector,
    item_type: Option<String>,
}

/// The scope a property resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub path: String,
    pub item_type: String,
}

impl ScopeFilter {
    /// Any element carrying `itemscope`
    pub fn any() -> Result<Self> {
        Ok(Self {
            selector: compile("[itemscope]")?,
            item_type: None,
        })
    }

    /// Only scopes whose `itemtype` equals `item_type` exactly.
    ///
    /// The type is compared as a plain string and never becomes part of a
    /// selector, so any text is a valid filter.
    pub fn of_type(item_type: &str) -> Result<Self> {
        Ok(Self {
            item_type: Some(item_type.to_string()),
            ..Self::any()?
        })
    }

    /// The type filter, if any
    pub fn item_type(&self) -> Option<&str> {
        self.item_type.as_deref()
    }

    /// Whether a nested item of `item_type` should be reported on its own
    pub fn accepts(&self, item_type: &str) -> bool {
        match &self.item_type {
            Some(wanted) => wanted == item_type,
            None => true,
        }
    }

    /// Whether the scope element `scope` may own properties under this filter
    fn owns(&self, scope: &Node<'_>) -> bool {
        match &self.item_type {
            Some(wanted) => scope.attr("itemtype") == Some(wanted.as_str()),
            None => true,
        }
    }

    /// Nearest ancestor of `node` passing the filter
    pub fn resolve(&self, node: &Node<'_>) -> Option<Scope> {
        let scope = node
            .ancestors_matching(&self.selector)
            .find(|scope| self.owns(scope))?;
        Some(Scope {
            path: scope.path(),
            item_type: scope.attr("itemtype").unwrap_or_default().to_string(),
        })
    }
}
