//! The display sink trait and its stock implementations.

use crate::core::{CardId, PlayerId, SlotId};

/// Receiver of every visible change in the game.
///
/// Calls are one-way notifications made from whichever task caused the
/// change, often while that task holds the table lock. Implementations
/// must be cheap and must never call back into the game.
///
/// Every method defaults to doing nothing, so a sink only overrides what
/// it renders.
pub trait Ui: Send + Sync {
    /// A player's score changed.
    fn set_score(&self, _player: PlayerId, _score: u32) {}

    /// A player's freeze has `_millis` left; zero means unfrozen.
    fn set_freeze(&self, _player: PlayerId, _millis: u64) {}

    /// Countdown clock update. `_warn` asks for a forced, highlighted redraw.
    fn set_countdown(&self, _millis: u64, _warn: bool) {}

    /// Elapsed-time clock update.
    fn set_elapsed(&self, _millis: u64) {}

    fn place_card(&self, _slot: SlotId, _card: CardId) {}

    fn remove_card(&self, _slot: SlotId) {}

    fn place_token(&self, _player: PlayerId, _slot: SlotId) {}

    fn remove_token(&self, _player: PlayerId, _slot: SlotId) {}

    /// Every token on one slot is gone.
    fn remove_tokens_at(&self, _slot: SlotId) {}

    /// Every token on the table is gone.
    fn remove_all_tokens(&self) {}

    /// The game is over; `_winners` holds every player tied for best score.
    fn announce_winners(&self, _winners: &[PlayerId]) {}
}

/// Sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullUi;

impl Ui for NullUi {}

/// Sink that writes each change to the `log` facade.
///
/// Table and clock updates go to `trace`, score and winners to `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogUi;

impl Ui for LogUi {
    fn set_score(&self, player: PlayerId, score: u32) {
        log::info!("[ui] {} score {}", player, score);
    }
    fn set_freeze(&self, player: PlayerId, millis: u64) {
        log::debug!("[ui] {} frozen {}ms", player, millis);
    }
    fn set_countdown(&self, millis: u64, warn: bool) {
        if warn {
            log::debug!("[ui] countdown {}ms (warn)", millis);
        } else {
            log::trace!("[ui] countdown {}ms", millis);
        }
    }
    fn set_elapsed(&self, millis: u64) {
        log::trace!("[ui] elapsed {}ms", millis);
    }
    fn place_card(&self, slot: SlotId, card: CardId) {
        log::trace!("[ui] {} <- {}", slot, card);
    }
    fn remove_card(&self, slot: SlotId) {
        log::trace!("[ui] {} cleared", slot);
    }
    fn place_token(&self, player: PlayerId, slot: SlotId) {
        log::trace!("[ui] {} token on {}", player, slot);
    }
    fn remove_token(&self, player: PlayerId, slot: SlotId) {
        log::trace!("[ui] {} token off {}", player, slot);
    }
    fn remove_tokens_at(&self, slot: SlotId) {
        log::trace!("[ui] tokens off {}", slot);
    }
    fn remove_all_tokens(&self) {
        log::trace!("[ui] all tokens removed");
    }
    fn announce_winners(&self, winners: &[PlayerId]) {
        let names: Vec<String> = winners.iter().map(PlayerId::to_string).collect();
        log::info!("[ui] winners: {}", names.join(", "));
    }
}
