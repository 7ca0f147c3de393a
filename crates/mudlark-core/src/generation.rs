//! Synthetic worlds: a rectangular grid of rooms with mutual exits and a
//! random scattering of mobs and items. Used for smoke testing the loader
//! and the resolution pass without hand-written data.

use crate::config::MAX_ROOMS;
use crate::direction::Direction;
use crate::records::{ItemRecord, MobRecord, RoomRecord, WorldRecords};
use rand::seq::SliceRandom;
use rand::Rng;

const ROOM_NAMES: &[&str] = &[
    "Cellar", "Hall", "Gallery", "Pantry", "Cistern", "Crypt", "Landing", "Study", "Vault",
    "Scullery", "Chapel", "Armory",
];

const MOB_NAMES: &[(&str, u8, u8)] = &[
    ("rat", 3, 1),
    ("goblin", 10, 2),
    ("bat", 2, 1),
    ("skeleton", 12, 3),
    ("troll", 30, 5),
];

const ITEM_NAMES: &[&str] = &[
    "a brass lamp",
    "a rusty key",
    "a coil of rope",
    "a silver coin",
    "a torn map",
];

/// Configuration for grid generation
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Chance (0.0-1.0) that a room gets a mob.
    pub mob_chance: f64,
    /// Chance (0.0-1.0) that a room gets an item.
    pub item_chance: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            mob_chance: 0.25,
            item_chance: 0.25,
        }
    }
}

/// Generate a `width` x `height` grid, row-major, every exit mutual.
///
/// Rows that would push the room count past what exit ids can address are
/// dropped.
pub fn generate_grid(config: &GridConfig, rng: &mut impl Rng) -> WorldRecords {
    let width = config.width.clamp(1, MAX_ROOMS);
    let height = config.height.clamp(1, MAX_ROOMS / width);
    if height < config.height {
        log::warn!(
            "Grid {}x{} exceeds {} rooms, generating {}x{}",
            config.width,
            config.height,
            MAX_ROOMS,
            width,
            height
        );
    }

    let mut records = WorldRecords::default();
    let mob_chance = config.mob_chance.clamp(0.0, 1.0);
    let item_chance = config.item_chance.clamp(0.0, 1.0);

    for y in 0..height {
        for x in 0..width {
            let base = ROOM_NAMES.choose(rng).copied().unwrap_or("Room");
            let mut room = RoomRecord::new(
                format!("{} ({}, {})", base, x, y),
                format!("A dusty {} in row {}.", base.to_lowercase(), y),
            );

            let id = |x: usize, y: usize| (y * width + x) as u8;
            if y > 0 {
                room = room.with_exit(Direction::North, id(x, y - 1));
            }
            if y + 1 < height {
                room = room.with_exit(Direction::South, id(x, y + 1));
            }
            if x + 1 < width {
                room = room.with_exit(Direction::East, id(x + 1, y));
            }
            if x > 0 {
                room = room.with_exit(Direction::West, id(x - 1, y));
            }

            if rng.gen_bool(mob_chance) {
                if let Some(&(name, health, attack)) = MOB_NAMES.choose(rng) {
                    room = room.with_mob(records.mobs.len() as u8);
                    records.mobs.push(MobRecord {
                        name: name.to_string(),
                        description: String::new(),
                        health,
                        attack,
                    });
                }
            }
            if rng.gen_bool(item_chance) {
                if let Some(&name) = ITEM_NAMES.choose(rng) {
                    room = room.with_item(records.items.len() as u8);
                    records.items.push(ItemRecord {
                        name: name.to_string(),
                        description: String::new(),
                    });
                }
            }

            records.rooms.push(room);
        }
    }

    log::debug!(
        "Generated {}x{} grid: {} mobs, {} items",
        width,
        height,
        records.mobs.len(),
        records.items.len()
    );
    records
}
