// SPDX-FileCopyrightText: 2025 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::read;
use std::path::PathBuf;
use std::sync::Arc;

use itemdat::client::{SupportedClient, SupportedClients};
use itemdat::dat::DatFile;
use itemdat::item::{ItemCategory, ItemFlags, StackOrder};
use itemdat::schema::FormatRevision;
use itemdat::session::ClientSession;
use itemdat::sprite::{SpriteSource, SpriteStore};
use itemdat::Error;

const SIGNATURE: u32 = 0x4C2C7993;

fn fixture_path() -> PathBuf {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("resources/tests");
    d.push("items_860.dat");
    d
}

fn clients() -> SupportedClients {
    SupportedClients::new(vec![SupportedClient::new(
        860,
        "Client 8.60",
        SIGNATURE,
        0x4C220594,
    )])
}

#[test]
fn test_dat_read() {
    let dat = DatFile::from_path(fixture_path(), FormatRevision::V860.schema(), SIGNATURE, false).unwrap();

    assert_eq!(dat.counts.item_count, 103);
    assert_eq!(dat.items.len(), 4);
    assert_eq!(dat.items.min_id(), Some(100));
    assert_eq!(dat.items.max_id(), Some(103));

    let ground = dat.items.get(100).unwrap();
    assert_eq!(ground.category, ItemCategory::Ground);
    assert_eq!(ground.ground_speed, Some(150));

    let border = dat.items.get(101).unwrap();
    assert_eq!(border.category, ItemCategory::Plain);
    assert_eq!(border.stack_order, Some(StackOrder::Border));

    let bag = dat.items.get(102).unwrap();
    assert_eq!(bag.category, ItemCategory::Container);
    assert!(bag.flags.contains(ItemFlags::PICKUPABLE));
    assert_eq!(bag.name(), Some("Bag"));
    assert_eq!(bag.trade_as(), Some(102));

    let coins = dat.items.get(103).unwrap();
    assert!(coins.flags.contains(ItemFlags::STACKABLE | ItemFlags::PICKUPABLE));
    assert_eq!(coins.light_level, Some(7));
    assert_eq!(coins.light_color, Some(215));
    assert_eq!(coins.sprites.len(), 4);
    assert_eq!(coins.layout.pattern_x, 4);
}

#[test]
fn test_sprite_sharing() {
    let buffer = read(fixture_path()).unwrap();
    let dat = DatFile::from_existing(&buffer, FormatRevision::V860.schema(), SIGNATURE, false).unwrap();

    // 10 is used by both the ground and the coins
    assert_eq!(dat.sprites.len(), 6);
    let ground = dat.items.get(100).unwrap();
    let coins = dat.items.get(103).unwrap();
    assert!(Arc::ptr_eq(&ground.sprites[0], &coins.sprites[3]));

    for item in &dat.items {
        assert_eq!(item.sprites.len() as u64, item.sprite_count());
        assert!(item.sprite_count() >= 1);
    }
}

#[test]
fn test_wrong_schema() {
    let buffer = read(fixture_path()).unwrap();

    // 0x21 is market in 8.60, but doesn't exist in 7.80
    assert!(matches!(
        DatFile::from_existing(&buffer, FormatRevision::V780.schema(), SIGNATURE, false),
        Err(Error::UnknownFlagCode {
            code: 0x21,
            item_id: 102
        })
    ));
}

#[test]
fn test_missing_file() {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("resources/tests");
    d.push("missing.dat");

    assert!(matches!(
        DatFile::from_path(d, FormatRevision::V860.schema(), SIGNATURE, false),
        Err(Error::Io(_))
    ));
}

struct BlankSprites;

impl SpriteSource for BlankSprites {
    fn load_sprites(&mut self, sprites: &SpriteStore, client: &SupportedClient) -> Result<(), Error> {
        let size = if client.transparency { 32 * 32 * 4 } else { 32 * 32 * 3 };
        for sprite in sprites.iter() {
            sprite.set_pixels(vec![0; size]);
        }
        Ok(())
    }
}

#[test]
fn test_session_load() {
    let clients = clients();
    let client = clients.find_by_signatures(SIGNATURE, 0x4C220594).unwrap();

    let mut session = ClientSession::new();
    session
        .load_from_path(client, FormatRevision::V860.schema(), fixture_path(), &mut BlankSprites)
        .unwrap();

    assert_eq!(session.client().unwrap().version, 860);
    assert_eq!(session.items().len(), 4);
    assert!(session
        .sprites()
        .iter()
        .all(|sprite| sprite.pixels().map(<[u8]>::len) == Some(32 * 32 * 3)));
}
