//! Mudlark Core - runtime core of a small interactive-fiction engine.
//!
//! Every game entity (room, mob, item) shares one polymorphic capability set
//! through the [`entity::Entity`] trait, and rooms are wired together into a
//! four-way directed graph.
//!
//! # Architecture
//!
//! - **Registry**: a typed arena that owns every constructed entity and
//!   releases them together at teardown.
//! - **Entities**: `Room`, `Mob` and `Item` implement `Entity`, overriding
//!   only the operations they care about.
//! - **World graph**: rooms are loaded with raw directional ids, then a
//!   resolution pass turns those ids into handles into the same batch.
//!
//! # Example
//!
//! ```rust
//! use mudlark_core::prelude::*;
//!
//! let records = WorldRecords {
//!     rooms: vec![
//!         RoomRecord::new("Start", "A bare cellar.").with_exit(Direction::East, 1),
//!         RoomRecord::new("End", "A narrow stair.").with_exit(Direction::West, 0),
//!     ],
//!     ..Default::default()
//! };
//!
//! let world = load(&records, LoadOptions::default())?.resolve()?;
//! let start = world.room_id(0).unwrap();
//! assert!(world.describe_room(start)?.contains("Start"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Load options (room limit, occupant sharing, exit symmetry) |
//! | [`diagnostics`] | Optional crash hook that prints a backtrace |
//! | [`direction`] | The four cardinal directions |
//! | [`entity`] | Shared capability trait and entity handles |
//! | [`error`] | Init, load and world errors |
//! | [`generation`] | Synthetic grid worlds for smoke testing |
//! | [`item`] | Item variant |
//! | [`mob`] | Mob variant (combat exchange, movement) |
//! | [`records`] | Serialized load-time records |
//! | [`registry`] | Lifetime registry / typed arena |
//! | [`room`] | Room variant and its exits |
//! | [`world`] | Loading, resolution and graph queries |

pub mod config;
pub mod diagnostics;
pub mod direction;
pub mod entity;
pub mod error;
pub mod generation;
pub mod item;
pub mod mob;
pub mod records;
pub mod registry;
pub mod room;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::LoadOptions;
    pub use crate::direction::Direction;
    pub use crate::entity::{Entity, EntityRef, Outcome, NEUTRAL_OUTCOME};
    pub use crate::error::{InitError, LoadError, WorldError};
    pub use crate::item::{Item, ItemId};
    pub use crate::mob::{Mob, MobId};
    pub use crate::records::{ExitIds, ItemRecord, MobRecord, RoomRecord, WorldRecords};
    pub use crate::registry::{Handle, Registry};
    pub use crate::room::{Exits, Room, RoomId, NO_EXIT};
    pub use crate::world::{load, Exchange, LoadedBatch, World};
}
