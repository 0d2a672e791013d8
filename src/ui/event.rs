//! Recorded display events.
//!
//! `UiRecorder` is a [`Ui`] that keeps every notification as a `UiEvent`
//! so callers can replay or inspect what a game showed.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::sink::Ui;
use crate::core::sync::lock;
use crate::core::{CardId, PlayerId, SlotId};

/// One display notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiEvent {
    Score { player: PlayerId, score: u32 },
    Freeze { player: PlayerId, millis: u64 },
    Countdown { millis: u64, warn: bool },
    Elapsed { millis: u64 },
    CardPlaced { slot: SlotId, card: CardId },
    CardRemoved { slot: SlotId },
    TokenPlaced { player: PlayerId, slot: SlotId },
    TokenRemoved { player: PlayerId, slot: SlotId },
    TokensRemovedAt { slot: SlotId },
    AllTokensRemoved,
    Winners { players: Vec<PlayerId> },
}

impl UiEvent {
    /// Clock updates arrive every dealer tick and are usually noise.
    #[must_use]
    pub fn is_clock(&self) -> bool {
        matches!(self, UiEvent::Countdown { .. } | UiEvent::Elapsed { .. })
    }
}

/// Sink that records every event in order.
#[derive(Debug, Default)]
pub struct UiRecorder {
    events: Mutex<Vec<UiEvent>>,
}

impl UiRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: UiEvent) {
        lock(&self.events).push(event);
    }

    /// Copy of every event so far.
    #[must_use]
    pub fn events(&self) -> Vec<UiEvent> {
        lock(&self.events).clone()
    }

    /// Every event except clock updates.
    #[must_use]
    pub fn changes(&self) -> Vec<UiEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| !e.is_clock())
            .cloned()
            .collect()
    }

    /// Take the events recorded so far, leaving the recorder empty.
    pub fn drain(&self) -> Vec<UiEvent> {
        std::mem::take(&mut *lock(&self.events))
    }

    /// The winners announcement, if the game has ended.
    #[must_use]
    pub fn winners(&self) -> Option<Vec<PlayerId>> {
        lock(&self.events).iter().rev().find_map(|e| match e {
            UiEvent::Winners { players } => Some(players.clone()),
            _ => None,
        })
    }
}

impl Ui for UiRecorder {
    fn set_score(&self, player: PlayerId, score: u32) {
        self.push(UiEvent::Score { player, score });
    }
    fn set_freeze(&self, player: PlayerId, millis: u64) {
        self.push(UiEvent::Freeze { player, millis });
    }
    fn set_countdown(&self, millis: u64, warn: bool) {
        self.push(UiEvent::Countdown { millis, warn });
    }
    fn set_elapsed(&self, millis: u64) {
        self.push(UiEvent::Elapsed { millis });
    }
    fn place_card(&self, slot: SlotId, card: CardId) {
        self.push(UiEvent::CardPlaced { slot, card });
    }
    fn remove_card(&self, slot: SlotId) {
        self.push(UiEvent::CardRemoved { slot });
    }
    fn place_token(&self, player: PlayerId, slot: SlotId) {
        self.push(UiEvent::TokenPlaced { player, slot });
    }
    fn remove_token(&self, player: PlayerId, slot: SlotId) {
        self.push(UiEvent::TokenRemoved { player, slot });
    }
    fn remove_tokens_at(&self, slot: SlotId) {
        self.push(UiEvent::TokensRemovedAt { slot });
    }
    fn remove_all_tokens(&self) {
        self.push(UiEvent::AllTokensRemoved);
    }
    fn announce_winners(&self, winners: &[PlayerId]) {
        self.push(UiEvent::Winners {
            players: winners.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order() {
        let ui = UiRecorder::new();
        ui.place_card(SlotId(0), CardId(5));
        ui.set_countdown(1_000, false);
        ui.place_token(PlayerId(1), SlotId(0));

        assert_eq!(ui.events().len(), 3);
        assert_eq!(
            ui.changes(),
            vec![
                UiEvent::CardPlaced { slot: SlotId(0), card: CardId(5) },
                UiEvent::TokenPlaced { player: PlayerId(1), slot: SlotId(0) },
            ]
        );
    }

    #[test]
    fn test_drain_and_winners() {
        let ui = UiRecorder::new();
        assert!(ui.winners().is_none());

        ui.announce_winners(&[PlayerId(0), PlayerId(2)]);
        assert_eq!(ui.winners(), Some(vec![PlayerId(0), PlayerId(2)]));

        assert_eq!(ui.drain().len(), 1);
        assert!(ui.events().is_empty());
    }
}
