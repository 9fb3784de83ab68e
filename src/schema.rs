// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! The flag codes used by each known revision of the item catalog format.
//!
//! Every revision describes the same kind of attributes, but assigns them different byte codes.
//! The decoder is driven by a [FlagSchema] instead of having a code path per revision.

/// The semantic meaning of a flag code, independent of the byte that encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Walkable ground, followed by the movement cost.
    Ground,
    /// Drawn as a ground border.
    GroundBorder,
    /// Drawn on the bottom of the stack, like walls.
    OnBottom,
    /// Drawn on top of everything else, like doorways.
    OnTop,
    Container,
    Stackable,
    ForceUse,
    MultiUse,
    HasCharges,
    /// Can be written to, followed by the maximum text length.
    Writable,
    /// Can be written to once, followed by the maximum text length.
    WritableOnce,
    FluidContainer,
    /// Fluid on the ground, also known as a splash.
    Fluid,
    Unpassable,
    Unmovable,
    BlockMissiles,
    BlockPathfinder,
    NoMoveAnimation,
    Pickupable,
    Hangable,
    /// Can be hung on an east wall.
    HookEast,
    /// Can be hung on a south wall.
    HookSouth,
    Rotatable,
    /// Emits light, followed by the light level and the light color.
    Light,
    DontHide,
    Translucent,
    FloorChange,
    /// Drawn with a pixel offset, followed by the x and y offsets.
    Offset,
    /// Raises things placed on top of it, followed by the height.
    Elevation,
    Lying,
    AnimateAlways,
    /// Shown on the minimap, followed by the minimap color.
    Minimap,
    /// Followed by the lens help type.
    LensHelp,
    FullGround,
    IgnoreLook,
    /// Wearable, followed by the equipment slot.
    Cloth,
    /// Tradeable on the market, followed by the market metadata.
    Market,
    /// Followed by the default action.
    DefaultAction,
    Wrappable,
    Unwrappable,
    TopEffect,
    Usable,
    /// Ends the attribute list of an item.
    Terminator,
}

/// The trailing fields that follow a flag code in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Nothing follows the flag.
    None,
    /// A single `u16`.
    Word,
    /// Two `u16` values.
    WordPair,
    /// Market category, trade-as id, show-as id, a `u16` length prefixed name,
    /// restricted profession and minimum level.
    Market,
}

impl Attribute {
    /// The payload that has to be consumed after this attribute's flag code.
    pub const fn payload_shape(&self) -> PayloadShape {
        match self {
            Attribute::Ground
            | Attribute::Writable
            | Attribute::WritableOnce
            | Attribute::Elevation
            | Attribute::Minimap
            | Attribute::LensHelp
            | Attribute::Cloth
            | Attribute::DefaultAction => PayloadShape::Word,
            Attribute::Light | Attribute::Offset => PayloadShape::WordPair,
            Attribute::Market => PayloadShape::Market,
            _ => PayloadShape::None,
        }
    }
}

/// A known revision of the item catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatRevision {
    /// Clients 7.80 up to 8.54, which still have the "has charges" flag.
    V780,
    /// Clients 8.60 up to 9.86, which introduce market metadata.
    V860,
    /// Clients 10.10 up to 10.41, which add the "no move animation" flag.
    V1010,
}

impl FormatRevision {
    /// Returns the flag schema of this revision.
    pub fn schema(&self) -> &'static FlagSchema {
        match self {
            FormatRevision::V780 => &SCHEMA_V780,
            FormatRevision::V860 => &SCHEMA_V860,
            FormatRevision::V1010 => &SCHEMA_V1010,
        }
    }
}

/// Maps flag codes to attributes for a single format revision.
#[derive(Debug)]
pub struct FlagSchema {
    revision: FormatRevision,
    table: [Option<Attribute>; 256],
}

impl FlagSchema {
    /// Builds a schema from a list of code and attribute pairs.
    ///
    /// # Panics
    ///
    /// Panics if a code is listed twice. In a `static` this happens at compile time.
    pub const fn new(revision: FormatRevision, entries: &[(u8, Attribute)]) -> Self {
        let mut table = [None; 256];

        let mut i = 0;
        while i < entries.len() {
            let (code, attribute) = entries[i];
            assert!(table[code as usize].is_none(), "flag code listed twice");
            table[code as usize] = Some(attribute);
            i += 1;
        }

        Self { revision, table }
    }

    /// The revision this schema describes.
    pub fn revision(&self) -> FormatRevision {
        self.revision
    }

    /// Looks up the attribute for `code`, or `None` if this revision doesn't define it.
    pub fn attribute(&self, code: u8) -> Option<Attribute> {
        self.table[code as usize]
    }

    /// Returns the code that encodes `attribute` in this revision, if any.
    pub fn code_of(&self, attribute: Attribute) -> Option<u8> {
        self.codes()
            .find(|(_, a)| *a == attribute)
            .map(|(code, _)| code)
    }

    /// Iterates over every defined code in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = (u8, Attribute)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(code, attribute)| attribute.map(|a| (code as u8, a)))
    }
}

define_flag_schema! {
    /// Flag codes of 7.80 - 8.54 clients.
    pub static SCHEMA_V780: V780 {
        0x00 => Ground,
        0x01 => GroundBorder,
        0x02 => OnBottom,
        0x03 => OnTop,
        0x04 => Container,
        0x05 => Stackable,
        0x06 => ForceUse,
        0x07 => MultiUse,
        0x08 => HasCharges,
        0x09 => Writable,
        0x0A => WritableOnce,
        0x0B => FluidContainer,
        0x0C => Fluid,
        0x0D => Unpassable,
        0x0E => Unmovable,
        0x0F => BlockMissiles,
        0x10 => BlockPathfinder,
        0x11 => Pickupable,
        0x12 => Hangable,
        0x13 => HookEast,
        0x14 => HookSouth,
        0x15 => Rotatable,
        0x16 => Light,
        0x17 => DontHide,
        0x18 => FloorChange,
        0x19 => Offset,
        0x1A => Elevation,
        0x1B => Lying,
        0x1C => AnimateAlways,
        0x1D => Minimap,
        0x1E => LensHelp,
        0x1F => FullGround,
        0x20 => IgnoreLook,
        0xFF => Terminator,
    }
}

define_flag_schema! {
    /// Flag codes of 8.60 - 9.86 clients.
    pub static SCHEMA_V860: V860 {
        0x00 => Ground,
        0x01 => GroundBorder,
        0x02 => OnBottom,
        0x03 => OnTop,
        0x04 => Container,
        0x05 => Stackable,
        0x06 => ForceUse,
        0x07 => MultiUse,
        0x08 => Writable,
        0x09 => WritableOnce,
        0x0A => FluidContainer,
        0x0B => Fluid,
        0x0C => Unpassable,
        0x0D => Unmovable,
        0x0E => BlockMissiles,
        0x0F => BlockPathfinder,
        0x10 => Pickupable,
        0x11 => Hangable,
        0x12 => HookEast,
        0x13 => HookSouth,
        0x14 => Rotatable,
        0x15 => Light,
        0x16 => DontHide,
        0x17 => Translucent,
        0x18 => Offset,
        0x19 => Elevation,
        0x1A => Lying,
        0x1B => AnimateAlways,
        0x1C => Minimap,
        0x1D => LensHelp,
        0x1E => FullGround,
        0x1F => IgnoreLook,
        0x20 => Cloth,
        0x21 => Market,
        0xFF => Terminator,
    }
}

define_flag_schema! {
    /// Flag codes of 10.10 - 10.41 clients.
    pub static SCHEMA_V1010: V1010 {
        0x00 => Ground,
        0x01 => GroundBorder,
        0x02 => OnBottom,
        0x03 => OnTop,
        0x04 => Container,
        0x05 => Stackable,
        0x06 => ForceUse,
        0x07 => MultiUse,
        0x08 => Writable,
        0x09 => WritableOnce,
        0x0A => FluidContainer,
        0x0B => Fluid,
        0x0C => Unpassable,
        0x0D => Unmovable,
        0x0E => BlockMissiles,
        0x0F => BlockPathfinder,
        0x10 => NoMoveAnimation,
        0x11 => Pickupable,
        0x12 => Hangable,
        0x13 => HookEast,
        0x14 => HookSouth,
        0x15 => Rotatable,
        0x16 => Light,
        0x17 => DontHide,
        0x18 => Translucent,
        0x19 => Offset,
        0x1A => Elevation,
        0x1B => Lying,
        0x1C => AnimateAlways,
        0x1D => Minimap,
        0x1E => LensHelp,
        0x1F => FullGround,
        0x20 => IgnoreLook,
        0x21 => Cloth,
        0x22 => Market,
        0x23 => DefaultAction,
        0x24 => Wrappable,
        0x25 => Unwrappable,
        0x26 => TopEffect,
        0xFE => Usable,
        0xFF => Terminator,
    }
}
