//! Identity-tagged navigation entries.

use std::fmt;

use uuid::Uuid;

/// Unique identity of one navigation entry.
///
/// Pushing the same destination twice yields two entries with different
/// ids, so each can own its own child presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A destination payload paired with the identity of its path entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination<D> {
    id: EntryId,
    value: D,
}

impl<D> Destination<D> {
    /// Tag `value` with a fresh identity.
    pub fn new(value: D) -> Self {
        Self {
            id: EntryId::new(),
            value,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn value(&self) -> &D {
        &self.value
    }

    pub fn into_value(self) -> D {
        self.value
    }
}
