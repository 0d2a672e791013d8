//! Point-in-time copies of the table.

use serde::{Deserialize, Serialize};

use super::layout::SlotTokens;
use crate::core::{CardId, PlayerId, SlotId};

/// One slot as seen in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub card: Option<CardId>,
    pub tokens: SlotTokens,
}

/// Owned copy of the whole layout.
///
/// Taken under the table lock, so it is always internally consistent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub slots: Vec<SlotView>,
    pub accepting: bool,
}

impl TableSnapshot {
    /// The slot holding `card`, if it is on the table.
    #[must_use]
    pub fn slot_of(&self, card: CardId) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|s| s.card == Some(card))
            .map(|i| SlotId(i as u16))
    }

    /// Cards on the table, in slot order.
    #[must_use]
    pub fn cards(&self) -> Vec<CardId> {
        self.slots.iter().filter_map(|s| s.card).collect()
    }

    /// Number of tokens `player` has on the table.
    #[must_use]
    pub fn token_count(&self, player: PlayerId) -> usize {
        self.slots
            .iter()
            .filter(|s| s.tokens.contains(&player))
            .count()
    }
}
