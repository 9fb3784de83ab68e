// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::client::SupportedClient;
use crate::error::Error;
use crate::ByteBuffer;

/// A single sprite referenced by one or more items.
///
/// The catalog decoder only knows the identifier; the pixel data is filled in later by a
/// [SpriteSource].
#[derive(Debug)]
pub struct Sprite {
    id: u32,
    pixels: OnceLock<ByteBuffer>,
}

impl Sprite {
    fn new(id: u32) -> Self {
        Self {
            id,
            pixels: OnceLock::new(),
        }
    }

    /// The identifier of this sprite in the sprite file.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The decoded pixel data, if a sprite source has provided it.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.pixels.get().map(Vec::as_slice)
    }

    /// Stores the decoded pixel data. Returns `false` if pixels were already set.
    pub fn set_pixels(&self, pixels: ByteBuffer) -> bool {
        self.pixels.set(pixels).is_ok()
    }
}

impl PartialEq for Sprite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sprite {}

/// Keeps exactly one [Sprite] per identifier for a single decoded catalog.
#[derive(Debug, Default)]
pub struct SpriteStore {
    sprites: BTreeMap<u32, Arc<Sprite>>,
}

impl SpriteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sprite for `id`, creating it the first time the identifier is seen.
    pub fn resolve(&mut self, id: u32) -> Arc<Sprite> {
        self.sprites
            .entry(id)
            .or_insert_with(|| Arc::new(Sprite::new(id)))
            .clone()
    }

    /// Returns the sprite for `id` without creating it.
    pub fn get(&self, id: u32) -> Option<&Arc<Sprite>> {
        self.sprites.get(&id)
    }

    /// Checks whether any item referenced `id`.
    pub fn contains(&self, id: u32) -> bool {
        self.sprites.contains_key(&id)
    }

    /// The number of distinct sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Iterates over the sprites in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Sprite>> {
        self.sprites.values()
    }

    /// Forgets every sprite.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

/// Decodes pixel data for the sprites of a [SpriteStore], usually from a SPR file.
///
/// Implementations look up each sprite by [Sprite::id] and call [Sprite::set_pixels].
pub trait SpriteSource {
    /// Fills in the pixels of `sprites`. The client's extended and transparency settings are passed
    /// through untouched.
    fn load_sprites(&mut self, sprites: &SpriteStore, client: &SupportedClient) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_deduplicates() {
        let mut store = SpriteStore::new();

        let first = store.resolve(7);
        let second = store.resolve(7);
        let other = store.resolve(8);

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn get_does_not_create() {
        let mut store = SpriteStore::new();
        store.resolve(1);

        assert!(store.get(1).is_some());
        assert!(store.get(2).is_none());
        assert!(!store.contains(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn iterates_in_id_order() {
        let mut store = SpriteStore::new();
        for id in [30, 10, 20, 10] {
            store.resolve(id);
        }

        let ids: Vec<u32> = store.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn pixels_are_write_once() {
        let mut store = SpriteStore::new();
        let sprite = store.resolve(5);

        assert_eq!(sprite.pixels(), None);
        assert!(sprite.set_pixels(vec![1, 2, 3]));
        assert!(!sprite.set_pixels(vec![4]));

        // every holder of the handle sees the same pixels
        assert_eq!(store.get(5).unwrap().pixels(), Some([1u8, 2, 3].as_slice()));
    }

    #[test]
    fn clear() {
        let mut store = SpriteStore::new();
        store.resolve(1);
        store.clear();

        assert!(store.is_empty());
    }
}
