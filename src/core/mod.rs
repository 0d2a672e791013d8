//! Core types: identifiers, players, configuration, RNG, errors.
//!
//! Everything here is plain data with no knowledge of tasks or locks;
//! the table, claim queue and actors build on top of it.

pub mod config;
pub mod error;
pub mod ids;
pub mod player;
pub mod rng;
pub(crate) mod sync;

pub use config::{Config, PlayerKind, TimerMode};
pub use error::{ConfigError, GameError, InvariantViolation};
pub use ids::{CardId, SlotId, SET_SIZE};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
