//! Extracted microdata items

use std::fmt;
use std::sync::Arc;

/// One microdata scope: a type plus its properties
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    item_type: String,
    /// Property names in first-seen order, each with its values in document order
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_properties"))]
    properties: Vec<(String, Vec<PropertyValue>)>,
}

/// Value of a single property
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    /// Scalar text (element text, or its `src`/`href`/`content` attribute)
    PlainData(String),
    /// A nested item, shared with the result list when it also matched
    Item(Arc<Item>),
}

impl Item {
    pub(crate) fn new(
        item_type: impl Into<String>,
        properties: Vec<(String, Vec<PropertyValue>)>,
    ) -> Self {
        Self {
            item_type: item_type.into(),
            properties,
        }
    }

    /// Declared `itemtype`, empty when the scope is untyped
    pub fn item_type(&self) -> &str {
        &self.item_type
    }

    /// Iterate `(name, values)` pairs in first-seen order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[PropertyValue])> {
        self.properties
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    /// All values recorded for `name`
    pub fn property(&self, name: &str) -> Option<&[PropertyValue]> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First value recorded for `name`
    pub fn first(&self, name: &str) -> Option<&PropertyValue> {
        self.property(name).and_then(|values| values.first())
    }

    /// Number of distinct property names
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Drop for Item {
    // Unlink nested items onto a local stack so deep chains drop without recursion.
    fn drop(&mut self) {
        let mut pending: Vec<Arc<Item>> = Vec::new();
        take_nested(&mut self.properties, &mut pending);
        while let Some(child) = pending.pop() {
            if let Some(mut item) = Arc::into_inner(child) {
                take_nested(&mut item.properties, &mut pending);
            }
        }
    }
}

fn take_nested(properties: &mut Vec<(String, Vec<PropertyValue>)>, out: &mut Vec<Arc<Item>>) {
    for (_, values) in properties.drain(..) {
        out.extend(values.into_iter().filter_map(|value| match value {
            PropertyValue::Item(item) => Some(item),
            PropertyValue::PlainData(_) => None,
        }));
    }
}

impl PropertyValue {
    pub fn is_item(&self) -> bool {
        matches!(self, PropertyValue::Item(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::PlainData(text) => Some(text),
            PropertyValue::Item(_) => None,
        }
    }

    pub fn as_item(&self) -> Option<&Arc<Item>> {
        match self {
            PropertyValue::Item(item) => Some(item),
            PropertyValue::PlainData(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::PlainData(text) => f.write_str(text),
            PropertyValue::Item(item) => write!(f, "[item {}]", item.item_type()),
        }
    }
}

#[cfg(feature = "serde")]
fn serialize_properties<S>(
    properties: &[(String, Vec<PropertyValue>)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (name, values) in properties {
        map.serialize_entry(name, values)?;
    }
    map.end()
}
