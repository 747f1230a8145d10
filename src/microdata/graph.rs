//! Building the item graph in one pass over a document's property elements

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::item::{Item, PropertyValue};
use super::property::{read_property, RawValue};
use super::scope::ScopeFilter;
use crate::document::{compile, Node};
use crate::error::Result;

type ItemId = usize;

#[derive(Debug, Clone)]
enum PendingValue {
    Text(String),
    Item(ItemId),
}

#[derive(Debug, Default)]
struct PendingItem {
    item_type: String,
    names: HashMap<String, usize>,
    properties: Vec<(String, Vec<PendingValue>)>,
}

impl PendingItem {
    fn new(item_type: String) -> Self {
        Self {
            item_type,
            ..Default::default()
        }
    }

    fn add(&mut self, name: &str, value: PendingValue) {
        match self.names.get(name) {
            Some(&index) => self.properties[index].1.push(value),
            None => {
                self.names.insert(name.to_string(), self.properties.len());
                self.properties.push((name.to_string(), vec![value]));
            }
        }
    }
}

/// Items of one extraction pass, addressed by index until the pass ends
#[derive(Debug, Default)]
struct ItemGraph {
    arena: Vec<PendingItem>,
    by_path: HashMap<String, ItemId>,
    found: Vec<ItemId>,
}

impl ItemGraph {
    fn alloc(&mut self, item_type: String) -> ItemId {
        self.arena.push(PendingItem::new(item_type));
        self.arena.len() - 1
    }

    /// Item for `path`, created and reported as found on first sight
    fn scope_item(&mut self, path: String, item_type: String) -> ItemId {
        if let Some(&id) = self.by_path.get(&path) {
            return id;
        }
        let id = self.alloc(item_type);
        self.by_path.insert(path, id);
        self.found.push(id);
        id
    }

    /// Convert the arena into shared immutable items, preserving identity.
    ///
    /// A nested item is always allocated after the item owning it, so
    /// walking the arena from the last id down sees every child before its
    /// owner and needs no recursion however deep the nesting.
    fn freeze(self) -> Vec<Arc<Item>> {
        let count = self.arena.len();
        let slot = |id: ItemId| count - 1 - id;

        let mut frozen: Vec<Arc<Item>> = Vec::with_capacity(count);
        for pending in self.arena.into_iter().rev() {
            let properties = pending
                .properties
                .into_iter()
                .map(|(name, values)| {
                    let values = values
                        .into_iter()
                        .map(|value| match value {
                            PendingValue::Text(text) => PropertyValue::PlainData(text),
                            PendingValue::Item(child) => {
                                PropertyValue::Item(Arc::clone(&frozen[slot(child)]))
                            }
                        })
                        .collect();
                    (name, values)
                })
                .collect();
            frozen.push(Arc::new(Item::new(pending.item_type, properties)));
        }

        self.found
            .iter()
            .map(|&id| Arc::clone(&frozen[slot(id)]))
            .collect()
    }
}

/// Find the items under `root` whose properties resolve through `filter`
pub fn find(root: &Node<'_>, filter: &ScopeFilter) -> Result<Vec<Arc<Item>>> {
    let props = compile("[itemprop]")?;
    let mut graph = ItemGraph::default();

    debug!(
        root = %root.path(),
        item_type = filter.item_type().unwrap_or("*"),
        "extracting microdata"
    );

    for node in root.descendants_matching(&props) {
        let Some(prop) = read_property(&node) else {
            trace!(element = %node.path(), "skipping property without a usable value");
            continue;
        };

        let Some(scope) = filter.resolve(&node) else {
            trace!(element = %node.path(), "skipping property outside any matching scope");
            continue;
        };

        let owner = graph.scope_item(scope.path, scope.item_type);

        let value = match prop.value {
            RawValue::Text(text) => PendingValue::Text(text),
            RawValue::Scope(item_type) => {
                let surfaced = filter.accepts(&item_type);
                let id = graph.alloc(item_type);
                if surfaced {
                    graph.by_path.insert(node.path(), id);
                    graph.found.push(id);
                }
                PendingValue::Item(id)
            }
        };

        for name in prop.names {
            graph.arena[owner].add(name, value.clone());
        }
    }

    let found = graph.freeze();
    debug!(items = found.len(), "microdata extraction finished");
    Ok(found)
}
