// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;

use crate::item::ClientItem;

/// The decoded items of a single client, keyed by client id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClientItemCatalog {
    items: BTreeMap<u16, ClientItem>,
}

impl ClientItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, item: ClientItem) {
        self.items.insert(item.id, item);
    }

    /// Looks up an item by its client id.
    pub fn get(&self, id: u16) -> Option<&ClientItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: u16) -> bool {
        self.items.contains_key(&id)
    }

    /// Iterates over the items in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ClientItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The lowest client id, if there are any items.
    pub fn min_id(&self) -> Option<u16> {
        self.items.keys().next().copied()
    }

    /// The highest client id, if there are any items.
    pub fn max_id(&self) -> Option<u16> {
        self.items.keys().next_back().copied()
    }

    /// Removes every item, used when a client is unloaded.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a ClientItemCatalog {
    type Item = &'a ClientItem;
    type IntoIter = std::collections::btree_map::Values<'a, u16, ClientItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}
