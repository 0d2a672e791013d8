//! Claims: candidate sets on their way from a player to the dealer.
//!
//! A player that places its third token captures a [`Claim`] and pushes
//! it onto the [`ClaimQueue`]. The dealer pops claims one at a time in
//! submission order and judges each against the current table, producing
//! a [`Verdict`].
//!
//! ## Verdicts
//!
//! - `Point`: the cards form a set and are all still in place
//! - `Penalty`: the cards are in place but do not form a set
//! - `Stale`: an earlier resolution already moved at least one card

mod claim;
mod queue;

pub use claim::{Claim, Verdict};
pub use queue::ClaimQueue;
