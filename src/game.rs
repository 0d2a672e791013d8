//! Game facade.
//!
//! [`GameBuilder`] wires a configuration, a rules oracle and a display
//! sink into a [`Game`]. The game owns the shared table, one [`Player`]
//! per seat and the [`Dealer`], and exposes the host-facing entry points:
//! starting, key presses, inspection and shutdown.
//!
//! ## Example
//!
//! ```no_run
//! use rust_set::{Config, GameBuilder};
//!
//! # async fn demo() -> Result<(), rust_set::GameError> {
//! let mut game = GameBuilder::new(Config::default().with_seats(0, 2)).build()?;
//! game.start();
//! tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//! game.terminate();
//! let winners = game.join().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::actors::{Context, Control, Dealer, DealerPhase, Player, PlayerPhase};
use crate::core::sync::lock;
use crate::core::{Config, ConfigError, GameError, GameRng, PlayerId, PlayerMap, SlotId};
use crate::rules::{ClassicRules, SetRules};
use crate::table::{Table, TableSnapshot};
use crate::ui::{NullUi, Ui};

/// Builder for creating a [`Game`].
pub struct GameBuilder {
    config: Config,
    rules: Arc<dyn SetRules>,
    ui: Arc<dyn Ui>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl GameBuilder {
    /// Classic rules and no display until told otherwise.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rules: Arc::new(ClassicRules::default()),
            ui: Arc::new(NullUi),
        }
    }

    #[must_use]
    pub fn rules(mut self, rules: impl SetRules + 'static) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    #[must_use]
    pub fn ui(mut self, ui: Arc<dyn Ui>) -> Self {
        self.ui = ui;
        self
    }

    /// Validate the configuration and set the table.
    ///
    /// The deck is the first `deck_size` cards the rules enumerate.
    pub fn build(self) -> Result<Game, ConfigError> {
        self.config.validate()?;

        let mut rng = GameRng::from_seed_or_entropy(self.config.seed);
        let mut deck = self.rules.deck();
        if deck.len() < self.config.deck_size {
            return Err(ConfigError::DeckExceedsRules {
                requested: self.config.deck_size,
                available: deck.len(),
            });
        }
        deck.truncate(self.config.deck_size);

        let ctx = Context::new(self.config, self.ui);
        let players = PlayerMap::new(ctx.config.player_count(), |id| {
            Arc::new(Player::new(id, ctx.config.players[id.index()], ctx.clone()))
        });
        let control = Arc::new(Control::new());
        log::debug!(
            "[game] {} seats, {} cards, seed {}",
            players.player_count(),
            deck.len(),
            rng.seed()
        );

        let dealer = Dealer::new(
            ctx.clone(),
            self.rules,
            players.clone(),
            Arc::clone(&control),
            deck,
            rng.fork(),
        );

        Ok(Game {
            ctx,
            players,
            control,
            dealer: Some(dealer),
            handle: None,
        })
    }
}

/// A running (or ready to run) game.
pub struct Game {
    ctx: Context,
    players: PlayerMap<Arc<Player>>,
    control: Arc<Control>,
    dealer: Option<Dealer>,
    handle: Option<JoinHandle<Vec<PlayerId>>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.ctx.config)
            .field("phase", &self.control.phase())
            .field("started", &self.handle.is_some())
            .finish()
    }
}

impl Game {
    /// Spawn the dealer (which spawns the players) on the current tokio
    /// runtime. Calling it again does nothing.
    pub fn start(&mut self) {
        match self.dealer.take() {
            Some(dealer) => self.handle = Some(dealer.spawn()),
            None => log::warn!("[game] already started"),
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    /// Input entry point, callable from any thread.
    ///
    /// Returns whether the press was queued; unknown players and
    /// ineligible presses are dropped.
    pub fn key_pressed(&self, player: PlayerId, slot: SlotId) -> bool {
        self.players
            .get(player)
            .map_or(false, |seat| seat.key_pressed(slot))
    }

    /// Ask the game to end. [`Game::join`] then returns the winners.
    pub fn terminate(&self) {
        log::info!("[game] terminate requested");
        self.control.terminate();
    }

    /// Shared stop handle, usable after the game has been moved into
    /// [`Game::join`].
    #[must_use]
    pub fn control(&self) -> Arc<Control> {
        Arc::clone(&self.control)
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.control.is_terminated()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&Arc<Player>> {
        self.players.get(player)
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Arc<Player>> {
        &self.players
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.players.get(player).map(|seat| seat.score())
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.players.map(|seat| seat.score())
    }

    #[must_use]
    pub fn player_phase(&self, player: PlayerId) -> Option<PlayerPhase> {
        self.players.get(player).map(|seat| seat.phase())
    }

    #[must_use]
    pub fn phase(&self) -> DealerPhase {
        self.control.phase()
    }

    /// Countdown deadline of the current round, if one is running.
    #[must_use]
    pub fn round_deadline(&self) -> Option<Instant> {
        self.control.deadline()
    }

    /// Consistent copy of the table.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        lock(&self.ctx.table).snapshot()
    }

    #[must_use]
    pub fn table(&self) -> &Mutex<Table> {
        &self.ctx.table
    }

    /// Pending claims not yet picked up by the dealer.
    #[must_use]
    pub fn pending_claims(&self) -> usize {
        self.ctx.claims.len()
    }

    /// Wait for the game to end and return the winners.
    ///
    /// Starts the game first if needed.
    pub async fn join(mut self) -> Result<Vec<PlayerId>, GameError> {
        if !self.is_started() {
            self.start();
        }
        match self.handle.take() {
            Some(handle) => Ok(handle.await?),
            None => Ok(Vec::new()),
        }
    }
}
