//! Claims and their verdicts.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, PlayerId, SlotId, SET_SIZE};
use crate::rules::SetRules;
use crate::table::Table;

/// Outcome of resolving one claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Legal set, still on the table. Score +1 and a short freeze.
    Point,

    /// Not a set. Long freeze, no score change.
    Penalty,

    /// At least one of the claimed cards has left its slot since the
    /// claim was captured. Dropped without score or freeze.
    Stale,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Point => write!(f, "point"),
            Verdict::Penalty => write!(f, "penalty"),
            Verdict::Stale => write!(f, "stale"),
        }
    }
}

/// A candidate set submitted by a player.
///
/// Captured under the table lock when the player places its third token,
/// so the three (card, slot) pairs were all true at that instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub player: PlayerId,
    pub cards: [CardId; SET_SIZE],
    pub slots: [SlotId; SET_SIZE],
}

impl Claim {
    /// Snapshot `player`'s three selected slots and the cards in them.
    ///
    /// Returns `None` unless the player has exactly three tokens down.
    #[must_use]
    pub fn capture(player: PlayerId, table: &Table) -> Option<Self> {
        let selected = table.tokens_of(player);
        let slots: [SlotId; SET_SIZE] = selected.as_slice().try_into().ok()?;
        let cards = [
            table.card_at(slots[0])?,
            table.card_at(slots[1])?,
            table.card_at(slots[2])?,
        ];
        Some(Self { player, cards, slots })
    }

    /// Does every claimed card still sit in the slot it was taken from?
    #[must_use]
    pub fn is_current(&self, table: &Table) -> bool {
        self.slots
            .iter()
            .zip(&self.cards)
            .all(|(slot, card)| table.card_at(*slot) == Some(*card))
    }

    /// Judge the claim against the table as it is now.
    ///
    /// Staleness wins over legality: a claim whose cards are gone is
    /// never penalised.
    #[must_use]
    pub fn judge(&self, table: &Table, rules: &dyn SetRules) -> Verdict {
        if !self.is_current(table) {
            Verdict::Stale
        } else if rules.is_legal_set(&self.cards) {
            Verdict::Point
        } else {
            Verdict::Penalty
        }
    }
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} claims {}@{} {}@{} {}@{}",
            self.player,
            self.cards[0],
            self.slots[0],
            self.cards[1],
            self.slots[1],
            self.cards[2],
            self.slots[2]
        )
    }
}
