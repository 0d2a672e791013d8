//! The classic Set deck.
//!
//! A card is a point in `values ^ features` space: card id `n` written
//! in base `values` gives one digit per feature (number, shading, colour,
//! shape for the standard 81-card deck). Three cards form a set when, for
//! every feature, their values are either all equal or all different.

use smallvec::SmallVec;

use super::engine::SetRules;
use crate::core::{CardId, SET_SIZE};

/// Classic Set rules with a configurable feature space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassicRules {
    features: u32,
    values: u16,
}

impl Default for ClassicRules {
    /// Four features with three values each: 81 cards.
    fn default() -> Self {
        Self::new(4, 3)
    }
}

impl ClassicRules {
    #[must_use]
    pub fn new(features: u32, values: u16) -> Self {
        assert!(features > 0, "Need at least one feature");
        assert!(values >= 2, "Need at least two values per feature");
        assert!(
            u64::from(values).pow(features) <= u64::from(u16::MAX),
            "Deck does not fit card ids"
        );
        Self { features, values }
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        usize::from(self.values).pow(self.features)
    }

    /// Decode a card into one value per feature, least significant first.
    #[must_use]
    pub fn features(&self, card: CardId) -> SmallVec<[u16; 4]> {
        let mut rest = card.raw();
        (0..self.features)
            .map(|_| {
                let digit = rest % self.values;
                rest /= self.values;
                digit
            })
            .collect()
    }
}

impl SetRules for ClassicRules {
    fn deck(&self) -> Vec<CardId> {
        (0..self.deck_size() as u16).map(CardId).collect()
    }

    fn is_legal_set(&self, cards: &[CardId; SET_SIZE]) -> bool {
        if cards[0] == cards[1] || cards[1] == cards[2] || cards[0] == cards[2] {
            return false;
        }
        let [a, b, c] = (*cards).map(|card| self.features(card));
        a.iter().zip(&b).zip(&c).all(|((x, y), z)| {
            let all_same = x == y && y == z;
            let all_different = x != y && y != z && x != z;
            all_same || all_different
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(digits: [u16; 4]) -> CardId {
        CardId(digits[0] + 3 * digits[1] + 9 * digits[2] + 27 * digits[3])
    }

    #[test]
    fn test_deck_size() {
        assert_eq!(ClassicRules::default().deck().len(), 81);
        assert_eq!(ClassicRules::new(3, 3).deck_size(), 27);
    }

    #[test]
    fn test_features_roundtrip() {
        let rules = ClassicRules::default();
        assert_eq!(rules.features(card([2, 0, 1, 2])).as_slice(), &[2, 0, 1, 2]);
    }

    #[test]
    fn test_all_same_or_all_different() {
        let rules = ClassicRules::default();

        // feature 0 differs everywhere, the rest are equal
        assert!(rules.is_legal_set(&[card([0, 1, 1, 1]), card([1, 1, 1, 1]), card([2, 1, 1, 1])]));
        // every feature differs
        assert!(rules.is_legal_set(&[card([0, 0, 0, 0]), card([1, 1, 1, 1]), card([2, 2, 2, 2])]));
        // feature 1 is two-and-one
        assert!(!rules.is_legal_set(&[card([0, 0, 0, 0]), card([1, 0, 1, 1]), card([2, 1, 2, 2])]));
    }

    #[test]
    fn test_repeated_card_is_not_a_set() {
        let rules = ClassicRules::default();
        let c = card([1, 1, 1, 1]);
        assert!(!rules.is_legal_set(&[c, c, c]));
    }

    #[test]
    fn test_any_two_cards_complete_exactly_one_set() {
        let rules = ClassicRules::default();
        let deck = rules.deck();
        let (a, b) = (deck[4], deck[50]);

        let thirds = deck
            .iter()
            .filter(|&&c| rules.is_legal_set(&[a, b, c]))
            .count();
        assert_eq!(thirds, 1);
    }

    #[test]
    fn test_full_deck_has_sets() {
        let rules = ClassicRules::default();
        assert!(rules.has_set(&rules.deck()));
        assert_eq!(rules.find_sets(&rules.deck(), usize::MAX).len(), 1080);
    }
}
