// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use bitflags::bitflags;

use crate::dat::Payload;
use crate::schema::Attribute;
use crate::sprite::Sprite;

/// The lens help type that marks an item as readable.
const LENS_HELP_READABLE: u16 = 1112;

/// What kind of object an item is. These are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemCategory {
    /// Anything that isn't one of the other categories.
    #[default]
    Plain,
    Ground,
    Container,
    /// Holds fluids, like a vial.
    FluidSource,
    /// Fluid lying on the ground.
    FluidSplash,
}

/// Where an item is drawn in a tile's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOrder {
    Border = 1,
    Bottom = 2,
    Top = 3,
}

bitflags! {
    /// Boolean capabilities of an item. Once set by a flag, they are never cleared.
    pub struct ItemFlags : u32 {
        const STACKABLE = 0x1;
        const UNPASSABLE = 0x2;
        const NON_MOVABLE = 0x4;
        const BLOCK_MISSILES = 0x8;
        const BLOCK_PATHFINDER = 0x10;
        const PICKUPABLE = 0x20;
        const HANGABLE = 0x40;
        const HOOK_EAST = 0x80;
        const HOOK_SOUTH = 0x100;
        const ROTATABLE = 0x200;
        const HAS_ELEVATION = 0x400;
        const IGNORE_LOOK = 0x800;
        const FULL_GROUND = 0x1000;
        const MULTI_USE = 0x2000;
        const READABLE = 0x4000;
    }
}

/// Market metadata, only present in newer revisions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarketInfo {
    pub category: u16,
    /// The item id this item is traded as.
    pub trade_as: u16,
    /// The item id this item is displayed as.
    pub show_as: u16,
    /// The display name.
    pub name: String,
    pub restrict_profession: u16,
    pub minimum_level: u16,
}

/// How an item's sprites are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteLayout {
    /// Width in tiles.
    pub width: u8,
    /// Height in tiles.
    pub height: u8,
    pub layers: u8,
    pub pattern_x: u8,
    pub pattern_y: u8,
    pub pattern_z: u8,
    /// Number of animation frames.
    pub frames: u8,
}

impl SpriteLayout {
    /// The number of sprites described by this layout.
    pub fn sprite_count(&self) -> u64 {
        [
            self.width,
            self.height,
            self.layers,
            self.pattern_x,
            self.pattern_y,
            self.pattern_z,
            self.frames,
        ]
        .iter()
        .map(|&n| n as u64)
        .product()
    }
}

impl Default for SpriteLayout {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            layers: 1,
            pattern_x: 1,
            pattern_y: 1,
            pattern_z: 1,
            frames: 1,
        }
    }
}

/// A single item as described by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientItem {
    /// The client id of this item, starting at 100.
    pub id: u16,
    pub category: ItemCategory,
    pub flags: ItemFlags,
    /// Only set for items drawn at a fixed position of the stack.
    pub stack_order: Option<StackOrder>,
    /// Movement cost, only set for ground.
    pub ground_speed: Option<u16>,
    pub light_level: Option<u16>,
    pub light_color: Option<u16>,
    pub minimap_color: Option<u16>,
    /// Maximum text length of items that can be written once.
    pub max_read_chars: Option<u16>,
    /// Maximum text length of writable items.
    pub max_read_write_chars: Option<u16>,
    pub market: Option<MarketInfo>,
    pub layout: SpriteLayout,
    /// One entry per sprite of the layout, in file order.
    pub sprites: Vec<Arc<Sprite>>,
}

impl ClientItem {
    /// Creates a plain item with no attributes and no sprites.
    pub fn new(id: u16) -> Self {
        Self {
            id,
            category: ItemCategory::Plain,
            flags: ItemFlags::empty(),
            stack_order: None,
            ground_speed: None,
            light_level: None,
            light_color: None,
            minimap_color: None,
            max_read_chars: None,
            max_read_write_chars: None,
            market: None,
            layout: SpriteLayout::default(),
            sprites: Vec::new(),
        }
    }

    pub fn is_movable(&self) -> bool {
        !self.flags.contains(ItemFlags::NON_MOVABLE)
    }

    pub fn is_animation(&self) -> bool {
        self.layout.frames > 1
    }

    pub fn sprite_count(&self) -> u64 {
        self.layout.sprite_count()
    }

    /// The id this item is traded as on the market.
    pub fn trade_as(&self) -> Option<u16> {
        self.market.as_ref().map(|m| m.trade_as)
    }

    /// The market display name.
    pub fn name(&self) -> Option<&str> {
        self.market.as_ref().map(|m| m.name.as_str())
    }

    /// Applies a decoded flag. Categories and stack orders are overwritten by later flags,
    /// capabilities are only ever added.
    pub(crate) fn apply(&mut self, attribute: Attribute, payload: Payload) {
        match (attribute, payload) {
            (Attribute::Ground, Payload::Word(speed)) => {
                self.category = ItemCategory::Ground;
                self.ground_speed = Some(speed);
            }
            (Attribute::GroundBorder, _) => self.stack_order = Some(StackOrder::Border),
            (Attribute::OnBottom, _) => self.stack_order = Some(StackOrder::Bottom),
            (Attribute::OnTop, _) => self.stack_order = Some(StackOrder::Top),
            (Attribute::Container, _) => self.category = ItemCategory::Container,
            (Attribute::FluidContainer, _) => self.category = ItemCategory::FluidSource,
            (Attribute::Fluid, _) => self.category = ItemCategory::FluidSplash,
            (Attribute::Stackable, _) => self.flags.insert(ItemFlags::STACKABLE),
            (Attribute::MultiUse, _) => self.flags.insert(ItemFlags::MULTI_USE),
            (Attribute::Writable, Payload::Word(length)) => {
                self.flags.insert(ItemFlags::READABLE);
                self.max_read_write_chars = Some(length);
            }
            (Attribute::WritableOnce, Payload::Word(length)) => {
                self.flags.insert(ItemFlags::READABLE);
                self.max_read_chars = Some(length);
            }
            (Attribute::Unpassable, _) => self.flags.insert(ItemFlags::UNPASSABLE),
            (Attribute::Unmovable, _) => self.flags.insert(ItemFlags::NON_MOVABLE),
            (Attribute::BlockMissiles, _) => self.flags.insert(ItemFlags::BLOCK_MISSILES),
            (Attribute::BlockPathfinder, _) => self.flags.insert(ItemFlags::BLOCK_PATHFINDER),
            (Attribute::Pickupable, _) => self.flags.insert(ItemFlags::PICKUPABLE),
            (Attribute::Hangable, _) => self.flags.insert(ItemFlags::HANGABLE),
            (Attribute::HookEast, _) => self.flags.insert(ItemFlags::HOOK_EAST),
            (Attribute::HookSouth, _) => self.flags.insert(ItemFlags::HOOK_SOUTH),
            (Attribute::Rotatable, _) => self.flags.insert(ItemFlags::ROTATABLE),
            (Attribute::Light, Payload::WordPair(level, color)) => {
                self.light_level = Some(level);
                self.light_color = Some(color);
            }
            // the height itself isn't kept
            (Attribute::Elevation, _) => self.flags.insert(ItemFlags::HAS_ELEVATION),
            (Attribute::Minimap, Payload::Word(color)) => self.minimap_color = Some(color),
            (Attribute::LensHelp, Payload::Word(kind)) => {
                if kind == LENS_HELP_READABLE {
                    self.flags.insert(ItemFlags::READABLE);
                }
            }
            (Attribute::FullGround, _) => self.flags.insert(ItemFlags::FULL_GROUND),
            (Attribute::IgnoreLook, _) => self.flags.insert(ItemFlags::IGNORE_LOOK),
            (Attribute::Market, Payload::Market(info)) => self.market = Some(info),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_category_wins() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::Ground, Payload::Word(150));
        item.apply(Attribute::Container, Payload::None);

        assert_eq!(item.category, ItemCategory::Container);
        // the speed stays, only the category is exclusive
        assert_eq!(item.ground_speed, Some(150));
    }

    #[test]
    fn later_stack_order_wins() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::OnTop, Payload::None);
        item.apply(Attribute::GroundBorder, Payload::None);

        assert_eq!(item.stack_order, Some(StackOrder::Border));
    }

    #[test]
    fn capabilities_are_monotonic() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::Writable, Payload::Word(256));
        item.apply(Attribute::LensHelp, Payload::Word(1100));

        assert!(item.flags.contains(ItemFlags::READABLE));
        assert_eq!(item.max_read_write_chars, Some(256));
        assert_eq!(item.max_read_chars, None);
    }

    #[test]
    fn lens_help_readable() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::LensHelp, Payload::Word(1100));
        assert!(!item.flags.contains(ItemFlags::READABLE));

        item.apply(Attribute::LensHelp, Payload::Word(LENS_HELP_READABLE));
        assert!(item.flags.contains(ItemFlags::READABLE));
    }

    #[test]
    fn unmovable() {
        let mut item = ClientItem::new(100);
        assert!(item.is_movable());

        item.apply(Attribute::Unmovable, Payload::None);
        assert!(!item.is_movable());
    }

    #[test]
    fn light_and_market() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::Light, Payload::WordPair(7, 215));
        item.apply(
            Attribute::Market,
            Payload::Market(MarketInfo {
                trade_as: 100,
                name: "torch".to_string(),
                ..Default::default()
            }),
        );

        assert_eq!(item.light_level, Some(7));
        assert_eq!(item.light_color, Some(215));
        assert_eq!(item.trade_as(), Some(100));
        assert_eq!(item.name(), Some("torch"));
    }

    #[test]
    fn ignored_attributes() {
        let mut item = ClientItem::new(100);
        item.apply(Attribute::Offset, Payload::WordPair(8, 8));
        item.apply(Attribute::AnimateAlways, Payload::None);
        item.apply(Attribute::Cloth, Payload::Word(2));

        assert_eq!(item, ClientItem::new(100));
    }

    #[test]
    fn sprite_count() {
        let layout = SpriteLayout {
            width: 2,
            height: 2,
            layers: 1,
            pattern_x: 4,
            pattern_y: 1,
            pattern_z: 1,
            frames: 3,
        };
        assert_eq!(layout.sprite_count(), 48);

        let empty = SpriteLayout {
            frames: 0,
            ..Default::default()
        };
        assert_eq!(empty.sprite_count(), 0);
    }

    #[test]
    fn animation() {
        let mut item = ClientItem::new(100);
        assert!(!item.is_animation());

        item.layout.frames = 2;
        assert!(item.is_animation());
    }
}
