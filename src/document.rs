//! HTML document adapter
//!
//! Wraps the scraper crate: parses raw bytes into a tree and answers the
//! handful of structural questions microdata extraction asks of it
//! (descendant and ancestor searches, attributes, text, structural path).

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Compile a CSS selector, mapping failures to a query error
pub fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::query(selector, e))
}

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw HTML bytes. The input must be UTF-8 (a leading BOM is ignored);
    /// decoding is the only step that can fail.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let source = std::str::from_utf8(bytes).map_err(Error::parse)?;
        Ok(Self::parse_str(source))
    }

    /// Parse HTML that is already decoded.
    ///
    /// Malformed markup is recovered from, never rejected: html5ever always
    /// produces an `<html>` document element.
    pub fn parse_str(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The document element (`<html>`)
    pub fn root(&self) -> Node<'_> {
        Node::new(self.html.root_element())
    }

    /// Every element matching a CSS selector, in document order.
    ///
    /// Each match can serve as a search root of its own, restricting
    /// extraction to that subtree.
    pub fn select(&self, selector: &str) -> Result<Vec<Node<'_>>> {
        let compiled = compile(selector)?;
        Ok(self.html.select(&compiled).map(Node::new).collect())
    }

    /// Non-fatal problems html5ever reported while building the tree
    pub fn parse_errors(&self) -> impl Iterator<Item = &str> {
        self.html.errors.iter().map(|e| e.as_ref())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root().path())
            .finish()
    }
}

/// Handle to one element of a parsed document
#[derive(Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Lower-cased tag name
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn attributes(&self) -> HashMap<&'a str, &'a str> {
        self.element.value().attrs().collect()
    }

    /// Concatenated text of all descendant text nodes
    pub fn content(&self) -> String {
        self.element.text().collect()
    }

    /// Structural path of the element, e.g. `/html/body/div[2]/span`.
    ///
    /// Unique within one document: a positional index is added whenever an
    /// element has same-named siblings.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self.element);
        while let Some(element) = current {
            segments.push(path_segment(element));
            current = element.parent().and_then(ElementRef::wrap);
        }

        let mut path = String::new();
        for (name, position) in segments.into_iter().rev() {
            path.push('/');
            path.push_str(name);
            if let Some(position) = position {
                path.push('[');
                path.push_str(&position.to_string());
                path.push(']');
            }
        }
        path
    }

    /// Descendants (excluding this element) matching `selector`, in document order
    pub fn descendants_matching<'s>(
        &self,
        selector: &'s Selector,
    ) -> impl Iterator<Item = Node<'a>> + 's
    where
        'a: 's,
    {
        self.element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(move |el| selector.matches(el))
            .map(Node::new)
    }

    /// Ancestors matching `selector`, nearest first
    pub fn ancestors_matching<'s>(
        &self,
        selector: &'s Selector,
    ) -> impl Iterator<Item = Node<'a>> + 's
    where
        'a: 's,
    {
        self.element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .filter(move |el| selector.matches(el))
            .map(Node::new)
    }

    /// Descendants matching a CSS selector string
    pub fn search(&self, selector: &str) -> Result<Vec<Node<'a>>> {
        let compiled = compile(selector)?;
        Ok(self.descendants_matching(&compiled).collect())
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Node").field(&self.path()).finish()
    }
}

/// Tag name plus 1-based position among same-named siblings, if it has any
fn path_segment<'a>(element: ElementRef<'a>) -> (&'a str, Option<usize>) {
    let name = element.value().name();
    let same_name = |sibling: &ElementRef<'_>| sibling.value().name() == name;

    let before = element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(same_name)
        .count();
    let after = element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .any(|sibling| same_name(&sibling));

    if before == 0 && !after {
        (name, None)
    } else {
        (name, Some(before + 1))
    }
}
