//! Error types.
//!
//! Normal play has no recoverable errors. What remains are programming
//! faults ([`InvariantViolation`]), bad configuration ([`ConfigError`]) and
//! a dealer task that died ([`GameError`]). Stale claims are an expected
//! race outcome and are modelled as a verdict, not an error.

use thiserror::Error;

use super::ids::{CardId, SlotId};
use super::player::PlayerId;

/// A broken table or protocol invariant.
///
/// The offending operation is aborted before any state changes, so the
/// table is never left half-updated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("{0} is outside the table")]
    SlotOutOfRange(SlotId),

    #[error("{slot} already holds {card}")]
    SlotOccupied { slot: SlotId, card: CardId },

    #[error("{card} is already on the table at {slot}")]
    CardOnTable { card: CardId, slot: SlotId },

    #[error("{0} holds no card")]
    EmptySlot(SlotId),

    #[error("{player} already has a token on {slot}")]
    DuplicateToken { player: PlayerId, slot: SlotId },

    #[error("{0} has no tokens left to place")]
    NoTokensLeft(PlayerId),

    #[error("{0} has no claim awaiting a verdict")]
    NoClaimOutstanding(PlayerId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

/// Rejected configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("table must have at least 3 slots, got {0}")]
    TableTooSmall(usize),

    #[error("table size {0} exceeds the slot id range")]
    TableTooLarge(usize),

    #[error("deck must hold at least 3 cards, got {0}")]
    DeckTooSmall(usize),

    #[error("deck size {requested} exceeds the {available} cards the rules provide")]
    DeckExceedsRules { requested: usize, available: usize },

    #[error("game needs between 1 and 255 players, got {0}")]
    PlayerCount(usize),

    #[error("dealer tick must be positive")]
    ZeroTick,

    #[error("countdown mode needs a positive round length")]
    ZeroRound,

    #[error("invalid config: {0}")]
    Parse(String),
}

/// Failure surfaced by [`Game`](crate::Game) itself.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dealer task failed: {0}")]
    Dealer(#[from] tokio::task::JoinError),
}
