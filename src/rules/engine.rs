//! Rules trait consumed by the dealer.
//!
//! The dealer needs exactly two things from the game rules:
//! - the full deck of card identities
//! - a pure predicate deciding whether three cards form a set
//!
//! Everything else (finding sets for the end-of-game check) has a default
//! built on the predicate.

use crate::core::{CardId, SET_SIZE};

/// Matching predicate and deck enumeration.
///
/// Implementations must be pure: the dealer calls them while holding the
/// table lock and assumes no side effects.
pub trait SetRules: Send + Sync {
    /// Every card in a fresh deck.
    fn deck(&self) -> Vec<CardId>;

    /// Do these three cards form a legal set?
    fn is_legal_set(&self, cards: &[CardId; SET_SIZE]) -> bool;

    // === Convenience Methods ===

    /// Find up to `limit` legal sets among `cards`.
    ///
    /// Sets come out in lexicographic index order of `cards`.
    fn find_sets(&self, cards: &[CardId], limit: usize) -> Vec<[CardId; SET_SIZE]> {
        let mut found = Vec::new();
        let n = cards.len();

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    if found.len() >= limit {
                        return found;
                    }
                    let triple = [cards[i], cards[j], cards[k]];
                    if self.is_legal_set(&triple) {
                        found.push(triple);
                    }
                }
            }
        }

        found
    }

    /// Is there at least one legal set among `cards`?
    fn has_set(&self, cards: &[CardId]) -> bool {
        !self.find_sets(cards, 1).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets are exactly the triples whose ids sum to a multiple of 10.
    struct SumRules;

    impl SetRules for SumRules {
        fn deck(&self) -> Vec<CardId> {
            (0..10).map(CardId).collect()
        }
        fn is_legal_set(&self, cards: &[CardId; SET_SIZE]) -> bool {
            cards.iter().map(|c| c.raw()).sum::<u16>() % 10 == 0
        }
    }

    #[test]
    fn test_find_sets_respects_limit() {
        let deck = SumRules.deck();
        let all = SumRules.find_sets(&deck, usize::MAX);
        assert!(all.len() > 2);
        assert_eq!(SumRules.find_sets(&deck, 2), all[..2].to_vec());
        assert!(SumRules.find_sets(&deck, 0).is_empty());
    }

    #[test]
    fn test_has_set() {
        assert!(SumRules.has_set(&[CardId(1), CardId(2), CardId(7)]));
        assert!(!SumRules.has_set(&[CardId(1), CardId(2), CardId(3)]));
        assert!(!SumRules.has_set(&[CardId(5), CardId(5)]));
    }
}
