//! Integration tests for the load → resolve → dispatch pipeline.
//!
//! Exercises: WorldRecords → load (registries) → resolve (exit ids to
//! handles) → describe / exchange / move on the resolved graph.

use mudlark_core::prelude::*;
use proptest::prelude::*;

const SAMPLE_JSON: &str = include_str!("../../../data/sample_world.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn resolve(records: &WorldRecords) -> World {
    load(records, LoadOptions::default())
        .expect("load failed")
        .resolve()
        .expect("resolve failed")
}

/// Rooms chained east/west in the order of `row` and north/south in the
/// order of `column`, every exit declared both ways.
fn chained(row: &[u8], column: &[u8]) -> WorldRecords {
    let mut rooms: Vec<RoomRecord> = (0..row.len())
        .map(|i| RoomRecord::new(format!("Room {}", i), ""))
        .collect();

    for pair in row.windows(2) {
        rooms[pair[0] as usize].exits.set(Direction::East, pair[1]);
        rooms[pair[1] as usize].exits.set(Direction::West, pair[0]);
    }
    for pair in column.windows(2) {
        rooms[pair[0] as usize].exits.set(Direction::South, pair[1]);
        rooms[pair[1] as usize].exits.set(Direction::North, pair[0]);
    }

    WorldRecords {
        rooms,
        ..Default::default()
    }
}

fn permutations() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (1u8..60).prop_flat_map(|n| {
        let ids: Vec<u8> = (0..n).collect();
        (Just(ids.clone()).prop_shuffle(), Just(ids).prop_shuffle())
    })
}

// ── Graph properties ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn mutual_exits_round_trip((row, column) in permutations()) {
        let world = load(&chained(&row, &column), LoadOptions::strict())
            .unwrap()
            .resolve()
            .unwrap();

        for (id, room) in world.rooms() {
            for (dir, next) in room.exits().iter() {
                prop_assert_eq!(world.neighbor(next, dir.opposite()), Some(id));
                prop_assert!(world.is_mutual(id, dir));
            }
        }
    }

    #[test]
    fn every_pending_id_resolves_into_the_batch((row, column) in permutations()) {
        let records = chained(&row, &column);
        let world = resolve(&records);

        for (index, record) in records.rooms.iter().enumerate() {
            let id = world.room_id(index).unwrap();
            for dir in Direction::ALL {
                let expected = match record.exits.get(dir) {
                    NO_EXIT => None,
                    raw => world.room_id(raw as usize),
                };
                prop_assert_eq!(world.neighbor(id, dir), expected);
            }
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn start_and_end_rooms_link_both_ways() {
    let records = WorldRecords {
        rooms: vec![
            RoomRecord::new("Start", "").with_exit(Direction::East, 1),
            RoomRecord::new("End", "").with_exit(Direction::West, 0),
        ],
        ..Default::default()
    };
    let world = resolve(&records);
    let start = world.room_id(0).unwrap();
    let end = world.room_id(1).unwrap();

    assert_eq!(world.room(start).unwrap().exits().get(Direction::East), Some(end));
    assert_eq!(world.room(end).unwrap().exits().get(Direction::West), Some(start));
    assert!(world.describe(EntityRef::Room(start)).unwrap().contains("Start"));
}

#[test]
fn exit_to_missing_room_exposes_no_graph() {
    let records = WorldRecords {
        rooms: vec![
            RoomRecord::new("Start", "").with_exit(Direction::East, 1),
            RoomRecord::new("End", "").with_exit(Direction::East, 9),
        ],
        ..Default::default()
    };
    let result = load(&records, LoadOptions::default()).unwrap().resolve();
    assert!(matches!(
        result,
        Err(WorldError::UnresolvedExit { room: 1, id: 9, .. })
    ));
}

#[test]
fn base_capabilities_are_neutral() {
    // Items keep the base take/recv pair.
    let records = WorldRecords {
        rooms: vec![RoomRecord::new("Shelf", "").with_item(0)],
        items: vec![
            ItemRecord {
                name: "a rusty key".into(),
                description: String::new(),
            },
            ItemRecord {
                name: "a coil of rope".into(),
                description: String::new(),
            },
        ],
        ..Default::default()
    };
    let mut world = resolve(&records);
    let items: Vec<EntityRef> = world.items().map(|(id, _)| EntityRef::Item(id)).collect();

    let exchange = world.exchange(items[0], items[1]).unwrap();
    assert_eq!(exchange.outcome, NEUTRAL_OUTCOME);
    assert!(exchange.accepted);
}

#[test]
fn teardown_releases_everything_once() {
    let records = WorldRecords {
        rooms: vec![RoomRecord::new("Den", "").with_mob(0).with_item(0)],
        mobs: vec![MobRecord {
            name: "a fox".into(),
            description: String::new(),
            health: 4,
            attack: 1,
        }],
        items: vec![ItemRecord {
            name: "a bone".into(),
            description: String::new(),
        }],
    };
    // One construction sequence, three records.
    assert_eq!(resolve(&records).teardown(), 3);
}

// ── Sample data ────────────────────────────────────────────────────────

#[test]
fn sample_world_loads_strictly() {
    let records = WorldRecords::from_json_str(SAMPLE_JSON).unwrap();
    let world = load(&records, LoadOptions::strict())
        .unwrap()
        .resolve()
        .unwrap();

    assert_eq!(world.room_count(), 5);
    assert_eq!(world.mob_count(), 2);
    assert_eq!(world.item_count(), 2);
    assert!(world.one_way_exits().is_empty());

    for (id, _) in world.rooms() {
        assert!(!world.describe_room(id).unwrap().is_empty());
    }
}

#[test]
fn sample_world_goblin_fights_and_wanders() {
    let records = WorldRecords::from_json_str(SAMPLE_JSON).unwrap();
    let mut world = resolve(&records);

    let hall = world.room_id(3).unwrap();
    let chapel = world.room_id(4).unwrap();
    let goblin = world.room(hall).unwrap().mob().unwrap();
    let rat = world.room(world.room_id(1).unwrap()).unwrap().mob().unwrap();

    let exchange = world
        .exchange(EntityRef::Mob(goblin), EntityRef::Mob(rat))
        .unwrap();
    assert_eq!(exchange.outcome, 3);
    assert!(exchange.accepted);
    assert!(!world.mob(rat).unwrap().is_alive());

    assert_eq!(world.move_mob(hall, Direction::East).unwrap(), Some(chapel));
    assert_eq!(world.mob_location(goblin), Some(chapel));
    assert!(world.describe_room(chapel).unwrap().contains("a goblin is here."));
}
