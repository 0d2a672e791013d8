//! Shared card layout.
//!
//! The [`Table`] maps each slot to an optional card and to the tokens
//! players have put on it. Both the dealer (cards) and the players
//! (tokens) mutate it; [`TableSnapshot`] gives readers a consistent copy.

pub mod layout;
pub mod snapshot;

pub use layout::{Selection, SlotTokens, Table};
pub use snapshot::{SlotView, TableSnapshot};
