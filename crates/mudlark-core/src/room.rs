//! Room variant: a node of the world graph.

use crate::direction::Direction;
use crate::entity::Entity;
use crate::error::InitError;
use crate::item::ItemId;
use crate::mob::MobId;
use crate::registry::Handle;

/// Serialized exit id meaning "wall, no exit this way".
pub const NO_EXIT: u8 = u8::MAX;

pub type RoomId = Handle<Room>;

/// The four outgoing edges of a room.
///
/// Holds both the raw ids stamped at load time and, after resolution,
/// the handles they resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exits {
    pending: [u8; 4],
    links: [Option<RoomId>; 4],
}

impl Default for Exits {
    fn default() -> Self {
        Self {
            pending: [NO_EXIT; 4],
            links: [None; 4],
        }
    }
}

impl Exits {
    /// Unresolved exits from raw ids, in `Direction::ALL` order.
    pub fn new(pending: [u8; 4]) -> Self {
        Self {
            pending,
            links: [None; 4],
        }
    }

    /// Raw id stamped for `direction`, or `None` for the sentinel.
    pub fn pending(&self, direction: Direction) -> Option<u8> {
        match self.pending[direction.index()] {
            NO_EXIT => None,
            id => Some(id),
        }
    }

    /// Resolved neighbour in `direction`.
    pub fn get(&self, direction: Direction) -> Option<RoomId> {
        self.links[direction.index()]
    }

    /// Resolved exits in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, RoomId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|id| (dir, id)))
    }

    /// True when every non-sentinel id has a resolved link.
    pub fn is_resolved(&self) -> bool {
        Direction::ALL
            .into_iter()
            .all(|dir| self.pending(dir).is_none() || self.get(dir).is_some())
    }

    pub(crate) fn link(&mut self, direction: Direction, target: RoomId) {
        self.links[direction.index()] = Some(target);
    }

    fn clear_links(&mut self) {
        self.links = [None; 4];
    }
}

/// A location. Occupants are referenced, not owned: mobs and items live in
/// their own registries and may move between rooms.
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub(crate) mob: Option<MobId>,
    pub(crate) item: Option<ItemId>,
    pub(crate) exits: Exits,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_pending_exits(mut self, ids: [u8; 4]) -> Self {
        self.exits = Exits::new(ids);
        self
    }

    pub fn mob(&self) -> Option<MobId> {
        self.mob
    }

    pub fn item(&self) -> Option<ItemId> {
        self.item
    }

    pub fn exits(&self) -> &Exits {
        &self.exits
    }
}

impl Entity for Room {
    fn class(&self) -> &'static str {
        "room"
    }

    /// Occupants and resolved links start empty; pending ids are kept for
    /// the resolution pass.
    fn init(&mut self) -> Result<(), InitError> {
        self.mob = None;
        self.item = None;
        self.exits.clear_links();
        Ok(())
    }

    fn describe(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push('\n');
        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push('\n');
        }

        let exits: Vec<&str> = self.exits.iter().map(|(dir, _)| dir.name()).collect();
        if exits.is_empty() {
            out.push_str("There are no exits.\n");
        } else {
            out.push_str("Exits: ");
            out.push_str(&exits.join(", "));
            out.push_str(".\n");
        }
    }
}
