//! Game configuration.
//!
//! `Config` is plain data: table and deck sizes, timer behaviour, freeze
//! lengths and the seat list. It deserializes from JSON with every field
//! optional, and offers builder methods for code and tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;
use super::ids::SET_SIZE;

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    /// Input arrives through [`Game::key_pressed`](crate::Game::key_pressed).
    Human,
    /// A generator task presses random keys on the player's behalf.
    Bot,
}

impl PlayerKind {
    #[must_use]
    pub fn is_human(self) -> bool {
        self == PlayerKind::Human
    }
}

/// How a round ends and what the clock shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerMode {
    /// Round ends when `round_ms` has passed; the sink shows time left.
    #[default]
    Countdown,
    /// Round ends when the table holds no legal set; the sink shows the
    /// time since the last deal or point.
    Elapsed,
    /// Round ends when the table holds no legal set; no clock at all.
    Unlimited,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of slots on the table.
    pub table_size: usize,

    /// Number of cards taken from the rules' deck. Building a game fails
    /// if the rules provide fewer.
    pub deck_size: usize,

    /// Round ending and clock display.
    pub timer: TimerMode,

    /// Round length in countdown mode.
    pub round_ms: u64,

    /// Below this much time left the countdown is drawn in warning style.
    pub warning_ms: u64,

    /// Freeze after a correct set.
    pub point_freeze_ms: u64,

    /// Freeze after a wrong set.
    pub penalty_freeze_ms: u64,

    /// Longest the dealer sleeps without refreshing the clock.
    pub tick_ms: u64,

    /// Pause between two bot key presses. Zero only yields.
    pub bot_delay_ms: u64,

    /// One entry per seat, in player id order.
    pub players: Vec<PlayerKind>,

    /// Seed for dealing and bots. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_size: 12,
            deck_size: 81,
            timer: TimerMode::Countdown,
            round_ms: 60_000,
            warning_ms: 5_000,
            point_freeze_ms: 1_000,
            penalty_freeze_ms: 3_000,
            tick_ms: 10,
            bot_delay_ms: 0,
            players: vec![PlayerKind::Human, PlayerKind::Bot],
            seed: None,
        }
    }
}

impl Config {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can run a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_size < SET_SIZE {
            return Err(ConfigError::TableTooSmall(self.table_size));
        }
        if self.table_size > u16::MAX as usize {
            return Err(ConfigError::TableTooLarge(self.table_size));
        }
        if self.deck_size < SET_SIZE {
            return Err(ConfigError::DeckTooSmall(self.deck_size));
        }
        if self.players.is_empty() || self.players.len() > 255 {
            return Err(ConfigError::PlayerCount(self.players.len()));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.timer == TimerMode::Countdown && self.round_ms == 0 {
            return Err(ConfigError::ZeroRound);
        }
        Ok(())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn round_duration(&self) -> Duration {
        Duration::from_millis(self.round_ms)
    }

    #[must_use]
    pub fn warning(&self) -> Duration {
        Duration::from_millis(self.warning_ms)
    }

    #[must_use]
    pub fn point_freeze(&self) -> Duration {
        Duration::from_millis(self.point_freeze_ms)
    }

    #[must_use]
    pub fn penalty_freeze(&self) -> Duration {
        Duration::from_millis(self.penalty_freeze_ms)
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[must_use]
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Replace the seat list.
    #[must_use]
    pub fn with_players(mut self, players: Vec<PlayerKind>) -> Self {
        self.players = players;
        self
    }

    /// Seat `humans` human players followed by `bots` bots.
    #[must_use]
    pub fn with_seats(self, humans: usize, bots: usize) -> Self {
        let mut players = vec![PlayerKind::Human; humans];
        players.extend(std::iter::repeat(PlayerKind::Bot).take(bots));
        self.with_players(players)
    }

    #[must_use]
    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }

    #[must_use]
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.deck_size = deck_size;
        self
    }

    #[must_use]
    pub fn with_timer(mut self, timer: TimerMode) -> Self {
        self.timer = timer;
        self
    }

    #[must_use]
    pub fn with_round_ms(mut self, round_ms: u64) -> Self {
        self.round_ms = round_ms;
        self
    }

    /// Set point and penalty freeze lengths.
    #[must_use]
    pub fn with_freezes(mut self, point_ms: u64, penalty_ms: u64) -> Self {
        self.point_freeze_ms = point_ms;
        self.penalty_freeze_ms = penalty_ms;
        self
    }

    #[must_use]
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    #[must_use]
    pub fn with_bot_delay_ms(mut self, delay_ms: u64) -> Self {
        self.bot_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
