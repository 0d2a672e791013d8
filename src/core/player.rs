//! Player identification and per-player storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access. The dealer keeps
//! its player actors in a `PlayerMap`, and final scores are collected into
//! one when winners are announced.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_set::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl DoubleEndedIterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_set::core::{PlayerId, PlayerMap};
///
/// let scores: PlayerMap<u32> = PlayerMap::new(3, |p| p.index() as u32);
/// assert_eq!(scores[PlayerId::new(2)], 2);
/// assert!(scores.get(PlayerId::new(7)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's entry, or `None` for an unknown player.
    ///
    /// Input sources may name any player, so lookups never panic.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in id order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the entries in id order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.data.iter()
    }

    /// Build a new map by projecting every entry.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.data.iter().map(&mut f).collect(),
        }
    }

    /// Players whose entry equals the maximum under `key`.
    ///
    /// Ties are all returned, in id order.
    pub fn argmax_by_key<K: Ord>(&self, mut key: impl FnMut(&T) -> K) -> Vec<PlayerId> {
        let keys: Vec<K> = self.data.iter().map(&mut key).collect();
        match keys.iter().max() {
            Some(best) => keys
                .iter()
                .enumerate()
                .filter(|(_, k)| *k == best)
                .map(|(i, _)| PlayerId(i as u8))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}
