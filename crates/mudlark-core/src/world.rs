//! World graph: loading a record batch, resolving exits, and the queries and
//! capability dispatch gameplay code runs against the resolved graph.
//!
//! Construction is two-phase. [`load`] builds every room, mob and item
//! through the registries and stamps each room with its raw exit ids.
//! [`LoadedBatch::resolve`] then turns those ids into handles. Only a
//! resolved [`World`] is navigable; a failed load or resolution exposes
//! nothing.

use crate::config::LoadOptions;
use crate::direction::Direction;
use crate::entity::{Entity, EntityRef, Outcome};
use crate::error::{LoadError, WorldError};
use crate::item::{Item, ItemId};
use crate::mob::{Mob, MobId};
use crate::records::WorldRecords;
use crate::registry::{Handle, Registry};
use crate::room::{Room, RoomId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Constructed but unresolved batch. Rooms carry raw exit ids only.
#[derive(Debug)]
pub struct LoadedBatch {
    rooms: Registry<Room>,
    mobs: Registry<Mob>,
    items: Registry<Item>,
    options: LoadOptions,
}

/// Build every entity in `records`.
///
/// Mobs and items are constructed first so rooms can reference them. Any
/// failed construction or bad reference abandons the whole batch.
pub fn load(records: &WorldRecords, options: LoadOptions) -> Result<LoadedBatch, LoadError> {
    let max = options.room_limit();
    if records.rooms.len() > max {
        return Err(LoadError::TooManyRooms {
            count: records.rooms.len(),
            max,
        });
    }

    let mut mobs = Registry::new();
    for (index, record) in records.mobs.iter().enumerate() {
        mobs
            .construct(Mob::from(record))
            .map_err(|source| LoadError::Construct {
                kind: "mob",
                index,
                source,
            })?;
    }

    let mut items = Registry::new();
    for (index, record) in records.items.iter().enumerate() {
        items
            .construct(Item::from(record))
            .map_err(|source| LoadError::Construct {
                kind: "item",
                index,
                source,
            })?;
    }

    let mut rooms = Registry::new();
    let mut mob_homes = HashMap::new();
    let mut item_homes = HashMap::new();
    for (index, record) in records.rooms.iter().enumerate() {
        let room = Room::new(&record.name, &record.description)
            .with_pending_exits(record.exits.to_array());
        let id = rooms
            .construct(room)
            .map_err(|source| LoadError::Construct {
                kind: "room",
                index,
                source,
            })?;

        let mob = record
            .mob
            .map(|m| claim(&mobs, &mut mob_homes, "mob", m, index, &options))
            .transpose()?;
        let item = record
            .item
            .map(|i| claim(&items, &mut item_homes, "item", i, index, &options))
            .transpose()?;

        if let Some(room) = rooms.get_mut(id) {
            room.mob = mob;
            room.item = item;
        }
    }

    log::info!(
        "Loaded {} rooms, {} mobs, {} items",
        rooms.len(),
        mobs.len(),
        items.len()
    );

    Ok(LoadedBatch {
        rooms,
        mobs,
        items,
        options,
    })
}

/// Look up an occupant for `room` and record where it was placed.
fn claim<T>(
    registry: &Registry<T>,
    homes: &mut HashMap<u8, usize>,
    kind: &'static str,
    index: u8,
    room: usize,
    options: &LoadOptions,
) -> Result<Handle<T>, LoadError> {
    let handle = registry
        .handle_at(index as usize)
        .ok_or(LoadError::UnknownOccupant { room, kind, index })?;

    match homes.entry(index) {
        Entry::Vacant(slot) => {
            slot.insert(room);
        }
        Entry::Occupied(first) if !options.allow_shared_occupants => {
            return Err(LoadError::SharedOccupant {
                kind,
                index,
                first: *first.get(),
                second: room,
            });
        }
        Entry::Occupied(_) => {}
    }
    Ok(handle)
}

impl LoadedBatch {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Unresolved room at `index`, for inspecting raw exit ids.
    pub fn room(&self, index: usize) -> Option<&Room> {
        self.rooms.handle_at(index).and_then(|h| self.rooms.get(h))
    }

    /// Resolution pass: convert every non-sentinel exit id into a handle to
    /// a room in this batch.
    pub fn resolve(mut self) -> Result<World, WorldError> {
        let count = self.rooms.len();
        let mut linked = 0;

        for (id, room) in self.rooms.iter_mut() {
            for dir in Direction::ALL {
                let Some(target) = room.exits.pending(dir) else {
                    continue;
                };
                if target as usize >= count {
                    return Err(WorldError::UnresolvedExit {
                        room: id.index(),
                        direction: dir,
                        id: target,
                    });
                }
                room.exits.link(dir, Handle::new(target as usize));
                linked += 1;
            }
        }

        let one_way = one_way_exits(&self.rooms);
        for &(room, dir) in &one_way {
            let target = self
                .rooms
                .get(room)
                .and_then(|r| r.exits.get(dir))
                .map_or(0, |t| t.index());
            if self.options.require_mutual_exits {
                return Err(WorldError::OneWayExit {
                    room: room.index(),
                    direction: dir,
                    target,
                });
            }
            log::warn!(
                "Room #{} exit {} leads to room #{} with no way back",
                room.index(),
                dir,
                target
            );
        }

        log::info!(
            "Resolved {} exits across {} rooms ({} one-way)",
            linked,
            count,
            one_way.len()
        );

        Ok(World {
            rooms: self.rooms,
            mobs: self.mobs,
            items: self.items,
        })
    }
}

/// Exits whose destination does not lead back the opposite way.
fn one_way_exits(rooms: &Registry<Room>) -> Vec<(RoomId, Direction)> {
    let mut found = Vec::new();
    for (id, room) in rooms.iter() {
        for (dir, target) in room.exits.iter() {
            let back = rooms.get(target).and_then(|t| t.exits.get(dir.opposite()));
            if back != Some(id) {
                found.push((id, dir));
            }
        }
    }
    found
}

/// Result of a two-phase interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    /// What the actor's `take_action` produced.
    pub outcome: Outcome,
    /// What the target's `recv_action` reported.
    pub accepted: bool,
}

/// A resolved, navigable world. Owns every entity; dropping it (or calling
/// [`World::teardown`]) releases them all.
#[derive(Debug)]
pub struct World {
    rooms: Registry<Room>,
    mobs: Registry<Mob>,
    items: Registry<Item>,
}

impl World {
    /// Handle for the room with id `index`.
    pub fn room_id(&self, index: usize) -> Option<RoomId> {
        self.rooms.handle_at(index)
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn mob(&self, id: MobId) -> Option<&Mob> {
        self.mobs.get(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn mobs(&self) -> impl Iterator<Item = (MobId, &Mob)> {
        self.mobs.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.live_count()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.live_count()
    }

    pub fn item_count(&self) -> usize {
        self.items.live_count()
    }

    /// Room reached by leaving `room` towards `direction`.
    pub fn neighbor(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        self.rooms.get(room)?.exits.get(direction)
    }

    /// True if leaving `room` towards `direction` and then going the
    /// opposite way returns to `room`.
    pub fn is_mutual(&self, room: RoomId, direction: Direction) -> bool {
        self.neighbor(room, direction)
            .and_then(|next| self.neighbor(next, direction.opposite()))
            == Some(room)
    }

    pub fn one_way_exits(&self) -> Vec<(RoomId, Direction)> {
        one_way_exits(&self.rooms)
    }

    /// Room whose mob slot holds `mob`.
    pub fn mob_location(&self, mob: MobId) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|(_, room)| room.mob == Some(mob))
            .map(|(id, _)| id)
    }

    pub fn entity(&self, entity: EntityRef) -> Option<&dyn Entity> {
        match entity {
            EntityRef::Room(id) => self.rooms.get(id).map(|e| e as &dyn Entity),
            EntityRef::Mob(id) => self.mobs.get(id).map(|e| e as &dyn Entity),
            EntityRef::Item(id) => self.items.get(id).map(|e| e as &dyn Entity),
        }
    }

    pub fn entity_mut(&mut self, entity: EntityRef) -> Option<&mut dyn Entity> {
        match entity {
            EntityRef::Room(id) => self.rooms.get_mut(id).map(|e| e as &mut dyn Entity),
            EntityRef::Mob(id) => self.mobs.get_mut(id).map(|e| e as &mut dyn Entity),
            EntityRef::Item(id) => self.items.get_mut(id).map(|e| e as &mut dyn Entity),
        }
    }

    /// Describe any single entity through its own `describe`.
    pub fn describe(&self, entity: EntityRef) -> Result<String, WorldError> {
        let target = self
            .entity(entity)
            .ok_or(WorldError::UnknownEntity(entity))?;
        let mut out = String::new();
        target.describe(&mut out);
        Ok(out)
    }

    /// The room's own description followed by each occupant's.
    pub fn describe_room(&self, id: RoomId) -> Result<String, WorldError> {
        let room = self
            .rooms
            .get(id)
            .ok_or(WorldError::UnknownRoom(id.index()))?;

        let mut out = String::new();
        room.describe(&mut out);

        let occupants = [
            room.mob.map(EntityRef::Mob),
            room.item.map(EntityRef::Item),
        ];
        for occupant in occupants.into_iter().flatten() {
            if let Some(entity) = self.entity(occupant) {
                entity.describe(&mut out);
            }
        }
        Ok(out)
    }

    /// Run one interaction: `actor` computes an effect on `target`, then
    /// `target` applies it.
    pub fn exchange(
        &mut self,
        actor: EntityRef,
        target: EntityRef,
    ) -> Result<Exchange, WorldError> {
        let outcome = {
            let actor_entity = self.entity(actor).ok_or(WorldError::UnknownEntity(actor))?;
            let target_entity = self
                .entity(target)
                .ok_or(WorldError::UnknownEntity(target))?;
            actor_entity.take_action(target_entity)
        };

        let accepted = self
            .entity_mut(target)
            .ok_or(WorldError::UnknownEntity(target))?
            .recv_action(outcome);

        log::debug!(
            "{:?} -> {:?}: outcome {}, accepted {}",
            actor,
            target,
            outcome,
            accepted
        );
        Ok(Exchange { outcome, accepted })
    }

    /// Ask the mob in `from` to move towards `direction`.
    ///
    /// Returns the room it moved into, or `None` if there is no mob, the
    /// mob declined, or the destination's mob slot is taken.
    pub fn move_mob(
        &mut self,
        from: RoomId,
        direction: Direction,
    ) -> Result<Option<RoomId>, WorldError> {
        let room = self
            .rooms
            .get(from)
            .ok_or(WorldError::UnknownRoom(from.index()))?;
        let Some(mob_id) = room.mob else {
            return Ok(None);
        };
        let exits = room.exits;

        let mob = self
            .mobs
            .get_mut(mob_id)
            .ok_or(WorldError::UnknownEntity(EntityRef::Mob(mob_id)))?;
        let Some(dest) = mob.move_action(direction, &exits) else {
            return Ok(None);
        };

        let dest_room = self
            .rooms
            .get_mut(dest)
            .ok_or(WorldError::UnknownRoom(dest.index()))?;
        if dest_room.mob.is_some() {
            log::debug!("Mob {:?} blocked: room {:?} is occupied", mob_id, dest);
            return Ok(None);
        }
        dest_room.mob = Some(mob_id);

        if let Some(origin) = self.rooms.get_mut(from) {
            origin.mob = None;
        }
        log::debug!(
            "Mob {:?} moved {} from {:?} to {:?}",
            mob_id,
            direction,
            from,
            dest
        );
        Ok(Some(dest))
    }

    /// Release every room, mob and item together. Returns how many records
    /// were released.
    pub fn teardown(self) -> usize {
        let released =
            self.rooms.teardown() + self.mobs.teardown() + self.items.teardown();
        log::info!("Released {} entities", released);
        released
    }
}
