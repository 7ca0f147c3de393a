//! Error types for construction, loading and graph operations.

use crate::direction::Direction;
use crate::entity::EntityRef;
use thiserror::Error;

/// A variant's `init` rejected its inputs.
///
/// Recoverable at the construction boundary: the instance has already been
/// torn down through its own `destroy`, but its record stays in the registry
/// until bulk release.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("{class} has an empty name")]
    EmptyName { class: &'static str },
    #[error("mob `{name}` starts with zero health")]
    Lifeless { name: String },
    #[error("{class} rejected: {reason}")]
    Rejected { class: &'static str, reason: String },
}

/// Errors that abandon a whole load batch.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse world records: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read world records: {0}")]
    Io(#[from] std::io::Error),
    #[error("{count} rooms exceeds the limit of {max}")]
    TooManyRooms { count: usize, max: usize },
    #[error("{kind} #{index} failed to construct: {source}")]
    Construct {
        kind: &'static str,
        index: usize,
        #[source]
        source: InitError,
    },
    #[error("room #{room} references unknown {kind} #{index}")]
    UnknownOccupant {
        room: usize,
        kind: &'static str,
        index: u8,
    },
    #[error("{kind} #{index} is placed in both room #{first} and room #{second}")]
    SharedOccupant {
        kind: &'static str,
        index: u8,
        first: usize,
        second: usize,
    },
}

/// Errors raised by the resolution pass and by graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("room #{room} exit {direction} points at missing room id {id}")]
    UnresolvedExit {
        room: usize,
        direction: Direction,
        id: u8,
    },
    #[error("room #{room} exit {direction} leads to room #{target}, which has no way back")]
    OneWayExit {
        room: usize,
        direction: Direction,
        target: usize,
    },
    #[error("no room with index {0}")]
    UnknownRoom(usize),
    #[error("no live entity for {0:?}")]
    UnknownEntity(EntityRef),
}
