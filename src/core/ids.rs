//! Card and slot identifiers.
//!
//! Cards are opaque integers in `[0, deck_size)`; what a card *means* is
//! up to the [`SetRules`](crate::rules::SetRules) implementation. Slots
//! are fixed positions on the table in `[0, table_size)`.

use serde::{Deserialize, Serialize};

/// Number of cards in a set, which is also the token budget per player
/// and the capacity of a player's pending-action queue.
pub const SET_SIZE: usize = 3;

/// Identity of a single card in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A fixed position on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotId(pub u16);

impl SlotId {
    /// Create a new slot ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the slot's index into the table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every slot of a table with `table_size` slots.
    pub fn all(table_size: usize) -> impl Iterator<Item = SlotId> {
        (0..table_size as u16).map(SlotId)
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}
