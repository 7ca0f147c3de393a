//! Load-time records: the raw batch a world is built from.
//!
//! Records are positional. A room's index in `rooms` is its id for exit
//! resolution, and `mob`/`item` fields index into `mobs`/`items`.
//!
//! ```json
//! {
//!   "rooms": [
//!     { "name": "Start", "description": "A cellar.", "mob": 0, "exits": { "east": 1 } },
//!     { "name": "End", "exits": { "west": 0 } }
//!   ],
//!   "mobs": [ { "name": "rat", "health": 3, "attack": 1 } ],
//!   "items": []
//! }
//! ```

use crate::direction::Direction;
use crate::error::LoadError;
use crate::item::Item;
use crate::mob::Mob;
use crate::room::NO_EXIT;
use serde::{Deserialize, Serialize};
use std::io::Read;

fn no_exit() -> u8 {
    NO_EXIT
}

/// Raw exit ids. A missing field means no exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitIds {
    #[serde(default = "no_exit")]
    pub north: u8,
    #[serde(default = "no_exit")]
    pub south: u8,
    #[serde(default = "no_exit")]
    pub east: u8,
    #[serde(default = "no_exit")]
    pub west: u8,
}

impl Default for ExitIds {
    fn default() -> Self {
        Self {
            north: NO_EXIT,
            south: NO_EXIT,
            east: NO_EXIT,
            west: NO_EXIT,
        }
    }
}

impl ExitIds {
    pub fn get(&self, direction: Direction) -> u8 {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, id: u8) {
        match direction {
            Direction::North => self.north = id,
            Direction::South => self.south = id,
            Direction::East => self.east = id,
            Direction::West => self.west = id,
        }
    }

    /// Ids in `Direction::ALL` order.
    pub fn to_array(self) -> [u8; 4] {
        Direction::ALL.map(|dir| self.get(dir))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Index into `WorldRecords::mobs`.
    #[serde(default)]
    pub mob: Option<u8>,
    /// Index into `WorldRecords::items`.
    #[serde(default)]
    pub item: Option<u8>,
    #[serde(default)]
    pub exits: ExitIds,
}

impl RoomRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            mob: None,
            item: None,
            exits: ExitIds::default(),
        }
    }

    pub fn with_exit(mut self, direction: Direction, id: u8) -> Self {
        self.exits.set(direction, id);
        self
    }

    pub fn with_mob(mut self, index: u8) -> Self {
        self.mob = Some(index);
        self
    }

    pub fn with_item(mut self, index: u8) -> Self {
        self.item = Some(index);
        self
    }
}

fn default_attack() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub health: u8,
    #[serde(default = "default_attack")]
    pub attack: u8,
}

impl From<&MobRecord> for Mob {
    fn from(record: &MobRecord) -> Self {
        Mob::new(record.name.clone(), record.health, record.attack)
            .with_description(record.description.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl From<&ItemRecord> for Item {
    fn from(record: &ItemRecord) -> Self {
        Item::new(record.name.clone(), record.description.clone())
    }
}

/// One load batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRecords {
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub mobs: Vec<MobRecord>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl WorldRecords {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_exits_default_to_sentinel() {
        let records = WorldRecords::from_json_str(
            r#"{ "rooms": [ { "name": "Start", "exits": { "east": 1 } } ] }"#,
        )
        .unwrap();

        let room = &records.rooms[0];
        assert_eq!(room.exits.to_array(), [NO_EXIT, NO_EXIT, 1, NO_EXIT]);
        assert_eq!(room.mob, None);
        assert!(room.description.is_empty());
        assert!(records.mobs.is_empty());
    }

    #[test]
    fn test_mob_attack_defaults_to_one() {
        let records = WorldRecords::from_json_str(
            r#"{ "mobs": [ { "name": "rat", "health": 3 } ] }"#,
        )
        .unwrap();
        let mob = Mob::from(&records.mobs[0]);
        assert_eq!(mob.attack, 1);
        assert_eq!(mob.health, 3);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = WorldRecords::from_json_str(r#"{ "rooms": [ { "exits": 3 } ] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_builder_sets_exits_and_occupants() {
        let room = RoomRecord::new("Hall", "")
            .with_exit(Direction::North, 4)
            .with_mob(0)
            .with_item(2);
        assert_eq!(room.exits.get(Direction::North), 4);
        assert_eq!(room.exits.get(Direction::South), NO_EXIT);
        assert_eq!(room.mob, Some(0));
        assert_eq!(room.item, Some(2));
    }
}
