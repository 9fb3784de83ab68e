// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

/// Everything that can go wrong while decoding a client's item catalog.
///
/// Any of these aborts the whole decode: records have no length prefix, so a single bad read
/// leaves every following record misaligned.
#[derive(Debug, Error)]
pub enum Error {
    /// The file signature doesn't belong to the selected client.
    #[error("bad dat signature, expected {expected:#X} but the file has {actual:#X}")]
    SignatureMismatch {
        /// The signature of the selected client.
        expected: u32,
        /// The signature found at the start of the file.
        actual: u32,
    },
    /// A flag code that the selected schema doesn't know about.
    #[error("unknown flag {code:#X} at id {item_id}")]
    UnknownFlagCode {
        /// The offending byte.
        code: u8,
        /// The item that was being decoded.
        item_id: u16,
    },
    /// The stream ended in the middle of a read.
    #[error("unexpected end of stream at offset {offset}")]
    UnexpectedEndOfStream {
        /// Where the failing read started.
        offset: u64,
    },
    /// The sprite layout of an item multiplies out to zero sprites.
    #[error("item {item_id} declares no sprites")]
    InvalidSpriteCount {
        /// The item that was being decoded.
        item_id: u16,
    },
    /// binrw rejected a structure for a reason other than running out of data.
    #[error("failed to parse: {0}")]
    Parse(binrw::Error),
    /// The dat file couldn't be opened or read.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The external sprite decoder rejected the sprite file.
    #[error("failed to load sprites: {0}")]
    SpriteSource(String),
}
