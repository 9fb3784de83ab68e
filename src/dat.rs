// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of item catalog (DAT) files.
//!
//! A DAT file starts with a signature and the number of objects of each kind, followed by one
//! record per item. Records have no length prefix: each one is a list of flag codes, some of them
//! followed by a payload, ended by a terminator and then the sprite layout and sprite ids.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use binrw::{binread, BinRead, BinReaderExt};
use tracing::{debug, warn};

use crate::catalog::ClientItemCatalog;
use crate::client::SupportedClient;
use crate::error::Error;
use crate::item::{ClientItem, MarketInfo, SpriteLayout};
use crate::schema::{Attribute, FlagSchema, PayloadShape};
use crate::sprite::SpriteStore;
use crate::ByteSpan;

/// The first client id used by items.
pub const MIN_ITEM_ID: u16 = 100;

/// Upper bound for preallocating sprite lists, the layout of a broken file can claim billions.
const MAX_SPRITE_PREALLOCATION: u64 = 1024;

/// The object counts following the signature.
#[binread]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct ObjectCounts {
    /// Also the highest item id.
    pub item_count: u16,
    pub outfit_count: u16,
    pub effect_count: u16,
    pub missile_count: u16,
}

/// The trailing fields read after a flag code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Payload {
    None,
    Word(u16),
    WordPair(u16, u16),
    Market(MarketInfo),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    AwaitingFlag,
    ConsumingPayload(Attribute),
    Terminated,
}

/// Reads item records from a stream, keeping track of the offset for error reporting.
struct RecordDecoder<'a, R> {
    reader: &'a mut R,
    schema: &'a FlagSchema,
    extended: bool,
    offset: u64,
}

impl<'a, R: Read + Seek> RecordDecoder<'a, R> {
    fn new(reader: &'a mut R, schema: &'a FlagSchema, extended: bool) -> Result<Self, Error> {
        let offset = reader.stream_position()?;

        Ok(Self {
            reader,
            schema,
            extended,
            offset,
        })
    }

    fn read_error(&self, err: binrw::Error) -> Error {
        if err.is_eof() {
            Error::UnexpectedEndOfStream {
                offset: self.offset,
            }
        } else {
            match err {
                binrw::Error::Io(io) => Error::Io(io),
                err => Error::Parse(err),
            }
        }
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        let value = self
            .reader
            .read_le::<u8>()
            .map_err(|e| self.read_error(e))?;
        self.offset += 1;
        Ok(value)
    }

    fn read_u16(&mut self) -> Result<u16, Error> {
        let value = self
            .reader
            .read_le::<u16>()
            .map_err(|e| self.read_error(e))?;
        self.offset += 2;
        Ok(value)
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        let value = self
            .reader
            .read_le::<u32>()
            .map_err(|e| self.read_error(e))?;
        self.offset += 4;
        Ok(value)
    }

    fn read_counts(&mut self) -> Result<ObjectCounts, Error> {
        let counts = ObjectCounts::read(&mut *self.reader).map_err(|e| self.read_error(e))?;
        self.offset += 8;
        Ok(counts)
    }

    /// Reads a `u16` length prefixed string. Each byte is a single character.
    fn read_string(&mut self) -> Result<String, Error> {
        let length = self.read_u16()?;

        let mut bytes = vec![0u8; length as usize];
        self.reader
            .read_exact(&mut bytes)
            .map_err(|e| self.read_error(binrw::Error::Io(e)))?;
        self.offset += length as u64;

        Ok(bytes.iter().map(|&b| b as char).collect())
    }

    fn read_payload(&mut self, shape: PayloadShape) -> Result<Payload, Error> {
        Ok(match shape {
            PayloadShape::None => Payload::None,
            PayloadShape::Word => Payload::Word(self.read_u16()?),
            PayloadShape::WordPair => {
                let first = self.read_u16()?;
                let second = self.read_u16()?;
                Payload::WordPair(first, second)
            }
            PayloadShape::Market => Payload::Market(MarketInfo {
                category: self.read_u16()?,
                trade_as: self.read_u16()?,
                show_as: self.read_u16()?,
                name: self.read_string()?,
                restrict_profession: self.read_u16()?,
                minimum_level: self.read_u16()?,
            }),
        })
    }

    fn read_layout(&mut self) -> Result<SpriteLayout, Error> {
        let width = self.read_u8()?;
        let height = self.read_u8()?;
        if width > 1 || height > 1 {
            // exact size, unused
            self.read_u8()?;
        }

        Ok(SpriteLayout {
            width,
            height,
            layers: self.read_u8()?,
            pattern_x: self.read_u8()?,
            pattern_y: self.read_u8()?,
            pattern_z: self.read_u8()?,
            frames: self.read_u8()?,
        })
    }

    fn read_sprite_id(&mut self) -> Result<u32, Error> {
        if self.extended {
            self.read_u32()
        } else {
            self.read_u16().map(u32::from)
        }
    }

    /// Decodes the record of a single item, resolving its sprites through `sprites`.
    fn decode_item(&mut self, id: u16, sprites: &mut SpriteStore) -> Result<ClientItem, Error> {
        let mut item = ClientItem::new(id);

        let mut state = RecordState::AwaitingFlag;
        while state != RecordState::Terminated {
            state = match state {
                RecordState::AwaitingFlag => {
                    let code = self.read_u8()?;
                    match self.schema.attribute(code) {
                        Some(Attribute::Terminator) => RecordState::Terminated,
                        Some(attribute) => RecordState::ConsumingPayload(attribute),
                        None => {
                            warn!("Error while parsing, unknown flag {code:#X} at id {id}.");
                            return Err(Error::UnknownFlagCode { code, item_id: id });
                        }
                    }
                }
                RecordState::ConsumingPayload(attribute) => {
                    let payload = self.read_payload(attribute.payload_shape())?;
                    item.apply(attribute, payload);
                    RecordState::AwaitingFlag
                }
                RecordState::Terminated => RecordState::Terminated,
            };
        }

        item.layout = self.read_layout()?;

        let sprite_count = item.layout.sprite_count();
        if sprite_count == 0 {
            warn!(id, "Item declares no sprites.");
            return Err(Error::InvalidSpriteCount { item_id: id });
        }

        item.sprites = Vec::with_capacity(sprite_count.min(MAX_SPRITE_PREALLOCATION) as usize);
        for _ in 0..sprite_count {
            let sprite_id = self.read_sprite_id()?;
            item.sprites.push(sprites.resolve(sprite_id));
        }

        Ok(item)
    }
}

/// A decoded item catalog, usually with the `.dat` file extension.
#[derive(Debug)]
pub struct DatFile {
    /// The signature at the start of the file.
    pub signature: u32,
    /// The object counts of the header. Only items are decoded.
    pub counts: ObjectCounts,
    /// Every item, keyed by client id.
    pub items: ClientItemCatalog,
    /// Every sprite referenced by an item.
    pub sprites: SpriteStore,
}

impl DatFile {
    /// Decodes a whole catalog from `reader`, which has to be positioned at the start of the file.
    ///
    /// The first four bytes have to match `expected_signature`. If `extended` is set, sprite ids
    /// are read as 32-bit instead of 16-bit. Nothing is returned unless every item decodes.
    pub fn decode<R: Read + Seek>(
        reader: &mut R,
        schema: &FlagSchema,
        expected_signature: u32,
        extended: bool,
    ) -> Result<DatFile, Error> {
        let mut decoder = RecordDecoder::new(reader, schema, extended)?;

        let signature = decoder.read_u32()?;
        if signature != expected_signature {
            warn!(
                "Bad dat signature. Expected signature is {expected_signature:X} and loaded signature is {signature:X}."
            );
            return Err(Error::SignatureMismatch {
                expected: expected_signature,
                actual: signature,
            });
        }

        let counts = decoder.read_counts()?;

        debug!(
            revision = ?schema.revision(),
            item_count = counts.item_count,
            outfit_count = counts.outfit_count,
            effect_count = counts.effect_count,
            missile_count = counts.missile_count,
            extended,
            "Decoding item catalog"
        );

        let mut items = ClientItemCatalog::new();
        let mut sprites = SpriteStore::new();

        for id in MIN_ITEM_ID..=counts.item_count {
            let item = decoder.decode_item(id, &mut sprites)?;
            items.insert(item);
        }

        debug!(
            items = items.len(),
            sprites = sprites.len(),
            "Decoded item catalog"
        );

        Ok(DatFile {
            signature,
            counts,
            items,
            sprites,
        })
    }

    /// Decodes a catalog using the signature and sprite id width of `client`.
    pub fn decode_for_client<R: Read + Seek>(
        reader: &mut R,
        schema: &FlagSchema,
        client: &SupportedClient,
    ) -> Result<DatFile, Error> {
        Self::decode(reader, schema, client.dat_signature, client.extended)
    }

    /// Decodes a catalog from an in-memory buffer.
    pub fn from_existing(
        buffer: ByteSpan,
        schema: &FlagSchema,
        expected_signature: u32,
        extended: bool,
    ) -> Result<DatFile, Error> {
        Self::decode(&mut Cursor::new(buffer), schema, expected_signature, extended)
    }

    /// Opens and decodes the catalog at `path`. The file is closed before returning.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        schema: &FlagSchema,
        expected_signature: u32,
        extended: bool,
    ) -> Result<DatFile, Error> {
        let mut reader = BufReader::new(File::open(path)?);

        Self::decode(&mut reader, schema, expected_signature, extended)
    }
}
