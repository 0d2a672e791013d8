//! Game rules seen by the engine.
//!
//! The engine treats the rules as an oracle:
//! - `SetRules::deck` enumerates the cards
//! - `SetRules::is_legal_set` judges a claim
//!
//! `ClassicRules` is the standard Set deck. Tests and variants plug in
//! their own implementation.

pub mod classic;
pub mod engine;

pub use classic::ClassicRules;
pub use engine::SetRules;
