// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! Reading the item catalogs (DAT) of game clients, together with the sprites they reference.

/// Represents a continuous block of memory which is not owned, and comes either from an in-memory location or from a file.
pub type ByteSpan<'a> = &'a [u8];

/// Represents a continuous block of memory which is owned.
pub type ByteBuffer = Vec<u8>;

#[macro_use]
mod macros;

/// Flag codes of the known format revisions.
pub mod schema;

/// Decoding item catalog (DAT) files.
pub mod dat;

/// Items and their attributes.
pub mod item;

/// The collection of decoded items.
pub mod catalog;

/// Sprites referenced by items.
pub mod sprite;

/// Descriptions of supported client versions.
pub mod client;

/// Loading and unloading clients.
pub mod session;

/// Errors returned while decoding.
pub mod error;

pub use error::Error;
