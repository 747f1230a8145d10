//! Microdata (itemscope/itemprop/itemtype) extraction
//!
//! Properties are attached to their nearest enclosing scope, nested scopes
//! become items of their own, and every scope yields at most one item per
//! extraction pass.
//! Reference: https://html.spec.whatwg.org/multipage/microdata.html

mod graph;
mod item;
mod property;
mod scope;

pub use item::{Item, PropertyValue};
pub use property::ElementKind;

use std::sync::Arc;

use crate::document::Node;
use crate::error::Result;
use scope::ScopeFilter;

impl<'a> Node<'a> {
    /// Every item under this node, nested ones included.
    ///
    /// Each property attaches to its nearest enclosing scope whatever its
    /// type. Items are ordered by the first property that resolved to them.
    pub fn find_all(&self) -> Result<Vec<Arc<Item>>> {
        graph::find(self, &ScopeFilter::any()?)
    }

    /// Items of exactly `item_type` under this node.
    ///
    /// Properties attach to the nearest ancestor scope of that type, skipping
    /// any intervening scopes of other types. The comparison is plain,
    /// case-sensitive string equality.
    pub fn find(&self, item_type: &str) -> Result<Vec<Arc<Item>>> {
        graph::find(self, &ScopeFilter::of_type(item_type)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_extract_simple_microdata() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Product">
            <span itemprop="name">Test Product</span>
            <meta itemprop="gtin13" content="1234567890123">
            <img itemprop="image" src="/p.jpg">
            <a itemprop="url" href="/product">link</a>
        </div>
        "#;

        let doc = Document::parse_str(html);
        let items = doc.root().find_all().unwrap();
        assert_eq!(items.len(), 1);

        let product = &items[0];
        assert_eq!(product.item_type(), "https://schema.org/Product");
        let text = |name: &str| product.first(name).and_then(|v| v.as_text());
        assert_eq!(text("name"), Some("Test Product"));
        assert_eq!(text("gtin13"), Some("1234567890123"));
        assert_eq!(text("image"), Some("/p.jpg"));
        assert_eq!(text("url"), Some("/product"));
    }

    #[test]
    fn test_nested_microdata() {
        let html = r#"
        <div itemscope itemtype="https://schema.org/Product">
            <span itemprop="name">Product</span>
            <div itemprop="offers" itemscope itemtype="https://schema.org/Offer">
                <span itemprop="price">19.99</span>
            </div>
        </div>
        "#;

        let doc = Document::parse_str(html);
        let items = doc.root().find_all().unwrap();
        assert_eq!(items.len(), 2);

        let offer = items[0].first("offers").and_then(|v| v.as_item()).unwrap();
        assert_eq!(offer.first("price").and_then(|v| v.as_text()), Some("19.99"));
        assert_eq!(items[1].item_type(), "https://schema.org/Offer");
    }

    #[test]
    fn test_find_by_type() {
        let html = r#"
        <div itemscope itemtype="A">
            <div itemscope itemtype="A">
                <span itemprop="x">inner</span>
            </div>
            <div itemscope itemtype="B">
                <span itemprop="y">skipped over</span>
            </div>
        </div>
        "#;

        let doc = Document::parse_str(html);
        let items = doc.root().find("A").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].first("x").and_then(|v| v.as_text()), Some("inner"));
        assert!(items[0].property("y").is_none());
        assert_eq!(
            items[1].first("y").and_then(|v| v.as_text()),
            Some("skipped over")
        );

        assert!(doc.root().find("a").unwrap().is_empty());
    }
}
