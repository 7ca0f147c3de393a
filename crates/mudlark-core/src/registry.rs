//! Lifetime registry: the single owner of every constructed entity.
//!
//! `Registry<T>` is a typed arena. Construction records an instance before
//! running its `init`, so an instance that fails initialization is still
//! owned here until bulk release. Nothing is freed individually during
//! normal operation; `teardown` (or drop) releases everything together.

use crate::entity::Entity;
use crate::error::InitError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Typed index of a live instance inside a [`Registry`].
pub struct Handle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Position in construction order. For a successfully loaded batch this
    /// is also the entity's id.
    pub fn index(self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordState {
    Live,
    /// `init` failed and `destroy` already ran; kept only for bulk release.
    Destroyed,
}

#[derive(Debug)]
struct Record<T> {
    value: T,
    state: RecordState,
}

/// Arena of entities of one variant.
#[derive(Debug)]
pub struct Registry<T> {
    records: Vec<Record<T>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Live instance behind `handle`, if it was constructed successfully.
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.records
            .get(handle.index)
            .filter(|r| r.state == RecordState::Live)
            .map(|r| &r.value)
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        self.records
            .get_mut(handle.index)
            .filter(|r| r.state == RecordState::Live)
            .map(|r| &mut r.value)
    }

    /// Handle for the record at `index`, if that record is live.
    pub fn handle_at(&self, index: usize) -> Option<Handle<T>> {
        let handle = Handle::new(index);
        self.get(handle).map(|_| handle)
    }

    /// Live instances in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.state == RecordState::Live)
            .map(|(i, r)| (Handle::new(i), &r.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        self.records
            .iter_mut()
            .enumerate()
            .filter(|(_, r)| r.state == RecordState::Live)
            .map(|(i, r)| (Handle::new(i), &mut r.value))
    }

    /// Number of records, including instances whose `init` failed.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.state == RecordState::Live)
            .count()
    }

    /// Release every record at once and report how many were released.
    ///
    /// Takes the registry by value, so a second teardown cannot happen.
    pub fn teardown(self) -> usize {
        let released = self.records.len();
        drop(self.records);
        released
    }
}

impl<T: Entity> Registry<T> {
    /// The single construction path.
    ///
    /// Records `value`, then runs its `init`. If `init` fails, the
    /// instance's `destroy` runs once and the error is returned; the record
    /// stays registered (unreachable through `get`) until teardown.
    pub fn construct(&mut self, value: T) -> Result<Handle<T>, InitError> {
        let index = self.records.len();
        self.records.push(Record {
            value,
            state: RecordState::Live,
        });
        let record = &mut self.records[index];

        match record.value.init() {
            Ok(()) => {
                log::debug!("constructed {} #{}", record.value.class(), index);
                Ok(Handle::new(index))
            }
            Err(e) => {
                record.value.destroy();
                record.state = RecordState::Destroyed;
                log::debug!("{} #{} failed init: {}", record.value.class(), index, e);
                Err(e)
            }
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
