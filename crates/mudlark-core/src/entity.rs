//! The shared capability set every game entity exposes.
//!
//! Variants implement [`Entity`] and override only what they need; anything
//! left out falls back to the default method. Callers always go through the
//! instance's own implementation (`&dyn Entity`), never a static type.

use crate::direction::Direction;
use crate::error::InitError;
use crate::item::ItemId;
use crate::mob::MobId;
use crate::room::{Exits, RoomId};

/// Byte-sized result of `take_action`. Meaning is variant-defined
/// (damage dealt, for mobs).
pub type Outcome = u8;

/// What the default `take_action` produces.
pub const NEUTRAL_OUTCOME: Outcome = 0;

/// Operations shared by rooms, mobs and items.
pub trait Entity {
    /// Class name, for diagnostics.
    fn class(&self) -> &'static str;

    /// Runs once, right after the instance is recorded in its registry.
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Runs once if `init` fails.
    fn destroy(&mut self) {}

    /// Append a player-facing description to `out`.
    fn describe(&self, _out: &mut String) {}

    /// First half of an interaction: compute the effect on `target`.
    fn take_action(&self, _target: &dyn Entity) -> Outcome {
        NEUTRAL_OUTCOME
    }

    /// Second half of an interaction: apply an effect. Returns whether it
    /// was accepted.
    fn recv_action(&mut self, _parameter: Outcome) -> bool {
        true
    }

    /// Attempt to move. `exits` are those of the room the entity is in;
    /// returning `None` means staying put. Legality is the variant's call.
    fn move_action(&mut self, _direction: Direction, _exits: &Exits) -> Option<RoomId> {
        None
    }
}

/// Handle to any entity in a world, for dispatching capability operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    Room(RoomId),
    Mob(MobId),
    Item(ItemId),
}

impl From<RoomId> for EntityRef {
    fn from(id: RoomId) -> Self {
        EntityRef::Room(id)
    }
}

impl From<MobId> for EntityRef {
    fn from(id: MobId) -> Self {
        EntityRef::Mob(id)
    }
}

impl From<ItemId> for EntityRef {
    fn from(id: ItemId) -> Self {
        EntityRef::Item(id)
    }
}

impl EntityRef {
    pub fn index(self) -> usize {
        match self {
            EntityRef::Room(h) => h.index(),
            EntityRef::Mob(h) => h.index(),
            EntityRef::Item(h) => h.index(),
        }
    }
}

