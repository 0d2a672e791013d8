//! The shared card layout.
//!
//! `Table` tracks which card sits in which slot and which players have
//! tokens on each slot. It supports:
//! - Card placement and removal with one-card-per-slot and
//!   one-slot-per-card checks
//! - Token toggling with a per-player budget of three
//! - Reverse lookup from card to slot
//! - Immediate notification of the display sink on every change
//!
//! `Table` itself is not synchronized; the game keeps it behind a single
//! `Mutex` and every caller follows the player → table → claim queue lock
//! order.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

use super::snapshot::{SlotView, TableSnapshot};
use crate::core::{CardId, InvariantViolation, PlayerId, SlotId, SET_SIZE};
use crate::ui::Ui;

/// Tokens on a single slot. Rarely more than a handful of players.
pub type SlotTokens = SmallVec<[PlayerId; 4]>;

/// Slots one player has selected.
pub type Selection = SmallVec<[SlotId; SET_SIZE]>;

/// Card and token layout.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use rust_set::core::{CardId, PlayerId, SlotId};
/// use rust_set::table::Table;
/// use rust_set::ui::NullUi;
///
/// let mut table = Table::new(12, Arc::new(NullUi));
/// table.place_card(SlotId(0), CardId(40)).unwrap();
/// table.place_token(PlayerId(1), SlotId(0)).unwrap();
///
/// assert_eq!(table.slot_of(CardId(40)), Some(SlotId(0)));
/// assert_eq!(table.token_count(PlayerId(1)), 1);
///
/// // Removing the card takes its tokens with it
/// table.remove_card(SlotId(0)).unwrap();
/// assert_eq!(table.token_count(PlayerId(1)), 0);
/// ```
pub struct Table {
    /// slot -> card
    slot_to_card: Vec<Option<CardId>>,

    /// card -> slot, for every card currently on the table
    card_to_slot: FxHashMap<CardId, SlotId>,

    /// slot -> players with a token there
    tokens: Vec<SlotTokens>,

    /// False while the dealer is sweeping; players may not select then.
    accepting: bool,

    ui: Arc<dyn Ui>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("slots", &self.slot_to_card)
            .field("tokens", &self.tokens)
            .field("accepting", &self.accepting)
            .finish()
    }
}

impl Table {
    /// Create an empty table with `table_size` slots.
    ///
    /// A new table does not accept selections until the first deal.
    #[must_use]
    pub fn new(table_size: usize, ui: Arc<dyn Ui>) -> Self {
        Self {
            slot_to_card: vec![None; table_size],
            card_to_slot: FxHashMap::default(),
            tokens: vec![SlotTokens::new(); table_size],
            accepting: false,
            ui,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slot_to_card.len()
    }

    fn check(&self, slot: SlotId) -> Result<usize, InvariantViolation> {
        match slot.index() < self.size() {
            true => Ok(slot.index()),
            false => Err(InvariantViolation::SlotOutOfRange(slot)),
        }
    }

    // === Cards ===

    /// The card in `slot`, if any. Out-of-range slots hold nothing.
    #[must_use]
    pub fn card_at(&self, slot: SlotId) -> Option<CardId> {
        self.slot_to_card.get(slot.index()).copied().flatten()
    }

    /// The slot holding `card`, if it is on the table.
    #[must_use]
    pub fn slot_of(&self, card: CardId) -> Option<SlotId> {
        self.card_to_slot.get(&card).copied()
    }

    /// Cards on the table, in slot order.
    #[must_use]
    pub fn cards(&self) -> Vec<CardId> {
        self.slot_to_card.iter().flatten().copied().collect()
    }

    /// Number of cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.card_to_slot.len()
    }

    /// Slots that currently hold a card.
    #[must_use]
    pub fn occupied_slots(&self) -> Vec<SlotId> {
        SlotId::all(self.size())
            .filter(|slot| self.card_at(*slot).is_some())
            .collect()
    }

    /// Slots that currently hold no card.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<SlotId> {
        SlotId::all(self.size())
            .filter(|slot| self.card_at(*slot).is_none())
            .collect()
    }

    /// Put `card` into an empty slot.
    pub fn place_card(&mut self, slot: SlotId, card: CardId) -> Result<(), InvariantViolation> {
        let index = self.check(slot)?;
        if let Some(existing) = self.slot_to_card[index] {
            return Err(InvariantViolation::SlotOccupied { slot, card: existing });
        }
        if let Some(other) = self.slot_of(card) {
            return Err(InvariantViolation::CardOnTable { card, slot: other });
        }

        self.slot_to_card[index] = Some(card);
        self.card_to_slot.insert(card, slot);
        self.ui.place_card(slot, card);
        Ok(())
    }

    /// Take the card out of `slot`, along with every token on it.
    ///
    /// Returns the removed card, or `None` if the slot was already empty.
    pub fn remove_card(&mut self, slot: SlotId) -> Result<Option<CardId>, InvariantViolation> {
        let index = self.check(slot)?;
        if !self.tokens[index].is_empty() {
            self.tokens[index].clear();
            self.ui.remove_tokens_at(slot);
        }

        let card = self.slot_to_card[index].take();
        if let Some(card) = card {
            self.card_to_slot.remove(&card);
            self.ui.remove_card(slot);
        }
        Ok(card)
    }

    // === Tokens ===

    /// Does `player` have a token on `slot`?
    #[must_use]
    pub fn has_token(&self, player: PlayerId, slot: SlotId) -> bool {
        self.tokens
            .get(slot.index())
            .map_or(false, |tokens| tokens.contains(&player))
    }

    /// Players with a token on `slot`.
    #[must_use]
    pub fn tokens_at(&self, slot: SlotId) -> &[PlayerId] {
        self.tokens
            .get(slot.index())
            .map(|t| t.as_slice())
            .unwrap_or(&[])
    }

    /// Slots where `player` has a token, in slot order.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> Selection {
        SlotId::all(self.size())
            .filter(|slot| self.has_token(player, *slot))
            .collect()
    }

    /// Number of tokens `player` has on the table.
    #[must_use]
    pub fn token_count(&self, player: PlayerId) -> usize {
        self.tokens.iter().filter(|t| t.contains(&player)).count()
    }

    /// Put a token for `player` on a slot that holds a card.
    pub fn place_token(&mut self, player: PlayerId, slot: SlotId) -> Result<(), InvariantViolation> {
        let index = self.check(slot)?;
        if self.slot_to_card[index].is_none() {
            return Err(InvariantViolation::EmptySlot(slot));
        }
        if self.tokens[index].contains(&player) {
            return Err(InvariantViolation::DuplicateToken { player, slot });
        }
        if self.token_count(player) >= SET_SIZE {
            return Err(InvariantViolation::NoTokensLeft(player));
        }

        self.tokens[index].push(player);
        self.ui.place_token(player, slot);
        Ok(())
    }

    /// Take `player`'s token off `slot`.
    ///
    /// Returns `true` if a token was actually removed.
    pub fn remove_token(&mut self, player: PlayerId, slot: SlotId) -> bool {
        let Some(tokens) = self.tokens.get_mut(slot.index()) else {
            return false;
        };
        let before = tokens.len();
        tokens.retain(|p| *p != player);
        let removed = tokens.len() != before;
        if removed {
            self.ui.remove_token(player, slot);
        }
        removed
    }

    /// Take every token off the table.
    pub fn remove_all_tokens(&mut self) {
        self.tokens.iter_mut().for_each(SlotTokens::clear);
        self.ui.remove_all_tokens();
    }

    /// Take every token and card off the table.
    ///
    /// Returns the removed cards in slot order.
    pub fn clear(&mut self) -> Vec<CardId> {
        self.remove_all_tokens();
        let mut removed = Vec::with_capacity(self.card_count());
        for (index, entry) in self.slot_to_card.iter_mut().enumerate() {
            if let Some(card) = entry.take() {
                self.card_to_slot.remove(&card);
                self.ui.remove_card(SlotId(index as u16));
                removed.push(card);
            }
        }
        removed
    }

    // === Selection gate ===

    /// May players select cards right now?
    #[must_use]
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn set_accepting(&mut self, accepting: bool) {
        self.accepting = accepting;
    }

    /// Copy of the full layout for rendering or inspection.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            slots: self
                .slot_to_card
                .iter()
                .zip(&self.tokens)
                .map(|(card, tokens)| SlotView {
                    card: *card,
                    tokens: tokens.clone(),
                })
                .collect(),
            accepting: self.accepting,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{NullUi, UiEvent, UiRecorder};

    fn table(size: usize) -> Table {
        Table::new(size, Arc::new(NullUi))
    }

    #[test]
    fn test_place_card_rejects_occupied_slot() {
        let mut t = table(3);
        t.place_card(SlotId(0), CardId(1)).unwrap();

        assert_eq!(
            t.place_card(SlotId(0), CardId(2)),
            Err(InvariantViolation::SlotOccupied { slot: SlotId(0), card: CardId(1) })
        );
        assert_eq!(t.card_at(SlotId(0)), Some(CardId(1)));
    }

    #[test]
    fn test_place_card_rejects_card_already_dealt() {
        let mut t = table(3);
        t.place_card(SlotId(0), CardId(1)).unwrap();

        assert_eq!(
            t.place_card(SlotId(2), CardId(1)),
            Err(InvariantViolation::CardOnTable { card: CardId(1), slot: SlotId(0) })
        );
        assert_eq!(t.card_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut t = table(3);
        assert_eq!(
            t.place_card(SlotId(3), CardId(0)),
            Err(InvariantViolation::SlotOutOfRange(SlotId(3)))
        );
        assert_eq!(t.card_at(SlotId(9)), None);
        assert!(!t.remove_token(PlayerId(0), SlotId(9)));
        assert!(t.tokens_at(SlotId(9)).is_empty());
    }

    #[test]
    fn test_token_needs_card() {
        let mut t = table(3);
        assert_eq!(
            t.place_token(PlayerId(0), SlotId(1)),
            Err(InvariantViolation::EmptySlot(SlotId(1)))
        );
    }

    #[test]
    fn test_token_budget() {
        let mut t = table(4);
        for i in 0..4 {
            t.place_card(SlotId(i), CardId(i)).unwrap();
        }
        for i in 0..3 {
            t.place_token(PlayerId(0), SlotId(i)).unwrap();
        }

        assert_eq!(
            t.place_token(PlayerId(0), SlotId(3)),
            Err(InvariantViolation::NoTokensLeft(PlayerId(0)))
        );
        assert_eq!(t.token_count(PlayerId(0)), 3);
        assert_eq!(t.tokens_of(PlayerId(0)).as_slice(), &[SlotId(0), SlotId(1), SlotId(2)]);

        // Another player's budget is independent
        t.place_token(PlayerId(1), SlotId(3)).unwrap();
        assert_eq!(t.tokens_at(SlotId(3)), &[PlayerId(1)]);
    }

    #[test]
    fn test_duplicate_token() {
        let mut t = table(3);
        t.place_card(SlotId(0), CardId(0)).unwrap();
        t.place_token(PlayerId(2), SlotId(0)).unwrap();

        assert_eq!(
            t.place_token(PlayerId(2), SlotId(0)),
            Err(InvariantViolation::DuplicateToken { player: PlayerId(2), slot: SlotId(0) })
        );
        assert_eq!(t.token_count(PlayerId(2)), 1);
    }

    #[test]
    fn test_remove_token_reports_whether_removed() {
        let mut t = table(3);
        t.place_card(SlotId(1), CardId(7)).unwrap();
        t.place_token(PlayerId(0), SlotId(1)).unwrap();

        assert!(t.remove_token(PlayerId(0), SlotId(1)));
        assert!(!t.remove_token(PlayerId(0), SlotId(1)));
        assert!(!t.has_token(PlayerId(0), SlotId(1)));
    }

    #[test]
    fn test_remove_card_clears_all_tokens() {
        let ui = Arc::new(UiRecorder::new());
        let mut t = Table::new(3, ui.clone());
        t.place_card(SlotId(0), CardId(9)).unwrap();
        t.place_token(PlayerId(0), SlotId(0)).unwrap();
        t.place_token(PlayerId(1), SlotId(0)).unwrap();

        assert_eq!(t.remove_card(SlotId(0)), Ok(Some(CardId(9))));
        assert_eq!(t.remove_card(SlotId(0)), Ok(None));
        assert_eq!(t.slot_of(CardId(9)), None);
        assert_eq!(t.token_count(PlayerId(0)), 0);
        assert_eq!(t.token_count(PlayerId(1)), 0);

        let changes = ui.changes();
        assert!(changes.contains(&UiEvent::TokensRemovedAt { slot: SlotId(0) }));
        assert_eq!(changes.last(), Some(&UiEvent::CardRemoved { slot: SlotId(0) }));
    }

    #[test]
    fn test_clear_returns_cards() {
        let mut t = table(5);
        t.place_card(SlotId(1), CardId(3)).unwrap();
        t.place_card(SlotId(4), CardId(8)).unwrap();
        t.place_token(PlayerId(0), SlotId(4)).unwrap();

        assert_eq!(t.clear(), vec![CardId(3), CardId(8)]);
        assert_eq!(t.card_count(), 0);
        assert_eq!(t.token_count(PlayerId(0)), 0);
        assert_eq!(t.empty_slots().len(), 5);
    }

    #[test]
    fn test_snapshot() {
        let mut t = table(2);
        t.set_accepting(true);
        t.place_card(SlotId(1), CardId(5)).unwrap();
        t.place_token(PlayerId(3), SlotId(1)).unwrap();

        let snap = t.snapshot();
        assert!(snap.accepting);
        assert_eq!(snap.slots[0].card, None);
        assert_eq!(snap.slots[1].card, Some(CardId(5)));
        assert_eq!(snap.slots[1].tokens.as_slice(), &[PlayerId(3)]);
    }
}
