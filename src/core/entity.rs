//! Card instance identification.
//!
//! Every physical copy of a card in a session has a unique `EntityId`.
//! Ids are dense: they are allocated sequentially from 0 when the catalog
//! is expanded, and double as the index into the session's instance arena.
//!
//! ## Usage
//!
//! ```
//! use castaway::core::EntityId;
//!
//! let first = EntityId(0);
//! assert_eq!(first.index(), 0);
//! assert_eq!(first.next(), EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this instance.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
