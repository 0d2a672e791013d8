//! # rust-set
//!
//! The concurrency core of a real-time Set card game.
//!
//! One dealer and any number of players run as independent tokio tasks
//! around a shared table. Players toggle tokens on cards; a third token
//! submits a claim; the dealer resolves claims one at a time, awards
//! points and penalties, refills the table and sweeps it when a round
//! ends.
//!
//! ## Design Principles
//!
//! 1. **One lock per owner**: the table, each player's state and the
//!    claim queue each sit behind their own mutex, always taken in the
//!    order player → table → claim queue.
//!
//! 2. **No busy waiting**: every wait is a `Notify` raced against a
//!    deadline, so idle actors cost nothing and shutdown interrupts
//!    freezes promptly.
//!
//! 3. **Pluggable edges**: the card predicate ([`SetRules`]) and the
//!    display ([`Ui`]) are traits supplied by the host.
//!
//! ## Modules
//!
//! - `core`: IDs, players, configuration, RNG, errors
//! - `table`: card and token layout
//! - `claims`: claims, verdicts and the claim queue
//! - `rules`: the set predicate and deck enumeration
//! - `ui`: display sink trait and stock sinks
//! - `actors`: dealer, player and bot tasks, round timer
//! - `game`: builder and host-facing facade

pub mod actors;
pub mod claims;
pub mod core;
pub mod game;
pub mod rules;
pub mod table;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{
    CardId, Config, ConfigError, GameError, GameRng, InvariantViolation, PlayerId, PlayerKind,
    PlayerMap, SlotId, TimerMode, SET_SIZE,
};

pub use crate::actors::{Control, Dealer, DealerPhase, Player, PlayerPhase, RoundTimer};

pub use crate::claims::{Claim, ClaimQueue, Verdict};

pub use crate::game::{Game, GameBuilder};

pub use crate::rules::{ClassicRules, SetRules};

pub use crate::table::{Table, TableSnapshot};

pub use crate::ui::{LogUi, NullUi, Ui, UiEvent, UiRecorder};
