// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::ClientItemCatalog;
use crate::client::SupportedClient;
use crate::dat::DatFile;
use crate::error::Error;
use crate::schema::FlagSchema;
use crate::sprite::{SpriteSource, SpriteStore};

/// The items and sprites of the currently loaded client.
///
/// Loading a client always throws away whatever was loaded before, so items and sprites of two
/// different clients are never mixed.
#[derive(Debug, Default)]
pub struct ClientSession {
    client: Option<SupportedClient>,
    items: ClientItemCatalog,
    sprites: SpriteStore,
}

impl ClientSession {
    /// Creates a session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the catalog of `client` from `dat`, then lets `source` decode the sprites.
    ///
    /// On failure the session is left empty.
    pub fn load<R: Read + Seek, S: SpriteSource>(
        &mut self,
        client: &SupportedClient,
        schema: &FlagSchema,
        dat: &mut R,
        source: &mut S,
    ) -> Result<(), Error> {
        self.unload();

        let dat = DatFile::decode_for_client(dat, schema, client).inspect_err(|_| {
            warn!("Failed to load dat.");
        })?;

        source.load_sprites(&dat.sprites, client).inspect_err(|_| {
            warn!("Failed to load spr.");
        })?;

        info!(
            client = %client.description,
            items = dat.items.len(),
            sprites = dat.sprites.len(),
            "Loaded client"
        );

        self.client = Some(client.clone());
        self.items = dat.items;
        self.sprites = dat.sprites;

        Ok(())
    }

    /// Same as [ClientSession::load], but opens the DAT file at `dat_path`.
    pub fn load_from_path<P: AsRef<Path>, S: SpriteSource>(
        &mut self,
        client: &SupportedClient,
        schema: &FlagSchema,
        dat_path: P,
        source: &mut S,
    ) -> Result<(), Error> {
        self.unload();

        let mut reader = BufReader::new(File::open(dat_path)?);

        self.load(client, schema, &mut reader, source)
    }

    /// Forgets the loaded client, its items and its sprites.
    pub fn unload(&mut self) {
        self.client = None;
        self.items.clear();
        self.sprites.clear();
    }

    /// The loaded client, if any.
    pub fn client(&self) -> Option<&SupportedClient> {
        self.client.as_ref()
    }

    pub fn items(&self) -> &ClientItemCatalog {
        &self.items
    }

    pub fn sprites(&self) -> &SpriteStore {
        &self.sprites
    }

    pub fn is_loaded(&self) -> bool {
        self.client.is_some()
    }
}
