//! Dealer actor.
//!
//! The dealer owns the undealt pool and the round clock and is the only
//! consumer of the claim queue. Its life cycle:
//!
//! ```text
//! Dealing ─▶ RoundActive ─▶ Sweeping ─┐
//!    ▲                                 │
//!    └──────── more sets left ─────────┘
//!                 │ no set left / terminate
//!                 ▼
//!             Announcing
//! ```
//!
//! ## Claim resolution
//!
//! One claim at a time, in submission order. Judging the claim, removing
//! a scored set and refilling the freed slots happen in one table
//! critical section; the verdict is delivered to the player after the
//! table lock is released.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::player::Player;
use super::timer::RoundTimer;
use super::{Context, Control};
use crate::claims::{Claim, Verdict};
use crate::core::sync::lock;
use crate::core::{CardId, GameRng, InvariantViolation, PlayerId, PlayerMap, TimerMode};
use crate::rules::SetRules;
use crate::table::Table;

/// Where the dealer is in the round life cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealerPhase {
    /// Filling empty slots from the pool.
    #[default]
    Dealing,
    /// Accepting and resolving claims until the round ends.
    RoundActive,
    /// Returning every card to the pool and resetting the players.
    Sweeping,
    /// Game over; winners reported.
    Announcing,
}

/// The coordinating actor.
pub struct Dealer {
    ctx: Context,
    rules: Arc<dyn SetRules>,
    players: PlayerMap<Arc<Player>>,
    control: Arc<Control>,
    pool: Vec<CardId>,
    rng: GameRng,
    timer: RoundTimer,

    /// Whether the table held a legal set after the last deal or point.
    table_has_set: bool,
}

impl std::fmt::Debug for Dealer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dealer")
            .field("pool", &self.pool.len())
            .field("timer", &self.timer)
            .field("table_has_set", &self.table_has_set)
            .finish()
    }
}

impl Dealer {
    /// Create a dealer holding `deck` in its pool.
    #[must_use]
    pub fn new(
        ctx: Context,
        rules: Arc<dyn SetRules>,
        players: PlayerMap<Arc<Player>>,
        control: Arc<Control>,
        deck: Vec<CardId>,
        rng: GameRng,
    ) -> Self {
        let timer = RoundTimer::new(&ctx.config);
        Self {
            ctx,
            rules,
            players,
            control,
            pool: deck,
            rng,
            timer,
            table_has_set: false,
        }
    }

    /// Cards not on the table and not yet scored.
    #[must_use]
    pub fn pool(&self) -> &[CardId] {
        &self.pool
    }

    #[must_use]
    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    fn set_phase(&self, phase: DealerPhase) {
        log::debug!("[dealer] phase {:?}", phase);
        self.control.set_phase(phase);
    }

    // === Termination ===

    /// The game is over when asked to stop or when no legal set is left
    /// among the pool and the table together.
    #[must_use]
    pub fn should_finish(&self) -> bool {
        if self.control.is_terminated() {
            return true;
        }
        let mut remaining = lock(&self.ctx.table).cards();
        remaining.extend_from_slice(&self.pool);
        !self.rules.has_set(&remaining)
    }

    fn round_over(&self) -> bool {
        if self.control.is_terminated() {
            return true;
        }
        match self.timer.mode() {
            TimerMode::Countdown => self.timer.expired(),
            TimerMode::Elapsed | TimerMode::Unlimited => !self.table_has_set,
        }
    }

    // === Dealing ===

    /// Fill every empty slot from the pool while cards remain.
    fn deal_into(&mut self, table: &mut Table) -> Result<usize, InvariantViolation> {
        let mut dealt = 0;
        for slot in table.empty_slots() {
            let Some(card) = self.rng.take(&mut self.pool) else {
                break;
            };
            if let Err(e) = table.place_card(slot, card) {
                self.pool.push(card);
                return Err(e);
            }
            dealt += 1;
        }
        self.table_has_set = self.rules.has_set(&table.cards());
        Ok(dealt)
    }

    /// Deal a fresh round, start the clock and open the table.
    pub fn start_round(&mut self) {
        let table = Arc::clone(&self.ctx.table);
        {
            let mut table = lock(&table);
            match self.deal_into(&mut table) {
                Ok(dealt) => log::info!(
                    "[dealer] dealt {} cards, {} left in pool",
                    dealt,
                    self.pool.len()
                ),
                Err(e) => log::error!("[dealer] deal aborted: {}", e),
            }
            table.set_accepting(true);
        }
        self.timer.reset();
        self.control.set_deadline(self.timer.deadline());
        self.timer.show(self.ctx.ui.as_ref(), true);
        for player in self.players.values() {
            player.wake();
        }
    }

    // === Resolution ===

    /// Judge one claim, update the table and deliver the verdict.
    pub fn resolve(&mut self, claim: Claim) -> Verdict {
        let table = Arc::clone(&self.ctx.table);
        let verdict = {
            let mut table = lock(&table);
            let verdict = claim.judge(&table, self.rules.as_ref());
            if verdict == Verdict::Point {
                for slot in claim.slots {
                    if let Err(e) = table.remove_card(slot) {
                        log::error!("[dealer] {}", e);
                    }
                }
                if let Err(e) = self.deal_into(&mut table) {
                    log::error!("[dealer] refill aborted: {}", e);
                }
            }
            verdict
        };

        match verdict {
            Verdict::Stale => log::warn!("[dealer] dropped stale claim: {}", claim),
            _ => log::info!("[dealer] {} -> {}", claim, verdict),
        }
        if verdict == Verdict::Point {
            self.timer.scored();
            self.timer.show(self.ctx.ui.as_ref(), true);
        }

        match self.players.get(claim.player) {
            Some(player) => {
                if let Err(e) = player.award(verdict) {
                    log::error!("[dealer] {}", e);
                }
            }
            None => log::error!("[dealer] {}", InvariantViolation::UnknownPlayer(claim.player)),
        }
        verdict
    }

    async fn round_loop(&mut self) {
        let tick = self.ctx.config.tick();
        while !self.round_over() {
            if let Some(claim) = self.ctx.claims.pop() {
                self.resolve(claim);
                continue;
            }
            self.timer.show(self.ctx.ui.as_ref(), false);
            log::trace!("[dealer] tick");

            let wait = self.timer.remaining().map_or(tick, |left| left.min(tick));
            tokio::select! {
                _ = self.ctx.claims.ready() => {}
                _ = self.control.woken() => {}
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    // === Sweeping ===

    /// Return every card to the pool, void pending claims and reset the
    /// players.
    pub fn sweep(&mut self) {
        let returned = {
            let mut table = lock(&self.ctx.table);
            table.set_accepting(false);
            table.clear()
        };
        let count = returned.len();
        self.pool.extend(returned);

        let voided = self.ctx.claims.clear();
        for player in self.players.values() {
            player.reset_round();
        }
        self.timer.clear();
        self.control.set_deadline(None);
        log::info!(
            "[dealer] swept {} cards back, {} claims voided",
            count,
            voided
        );
    }

    // === Announcing ===

    /// Report every player tied at the top score.
    pub fn announce(&self) -> Vec<PlayerId> {
        let winners = self.players.argmax_by_key(|player| player.score());
        log::info!("[dealer] winners: {:?}", winners);
        self.ctx.ui.announce_winners(&winners);
        winners
    }

    // === Task ===

    /// Run the whole game: start the players, play rounds until done,
    /// stop the players and announce the winners.
    pub async fn run(mut self) -> Vec<PlayerId> {
        log::info!("[dealer] starting with {} players", self.players.player_count());
        let mut handles: Vec<(PlayerId, JoinHandle<()>)> = Vec::new();
        for (id, player) in self.players.iter() {
            handles.push((id, player.spawn(self.rng.fork())));
        }

        while !self.should_finish() {
            self.set_phase(DealerPhase::Dealing);
            self.start_round();
            self.set_phase(DealerPhase::RoundActive);
            self.round_loop().await;
            self.timer.show(self.ctx.ui.as_ref(), false);
            self.set_phase(DealerPhase::Sweeping);
            self.sweep();
            tokio::task::yield_now().await;
        }

        for (id, handle) in handles.into_iter().rev() {
            if let Some(player) = self.players.get(id) {
                player.terminate();
            }
            if let Err(e) = handle.await {
                log::error!("[dealer] player {} task failed: {}", id, e);
            }
        }

        self.set_phase(DealerPhase::Announcing);
        let winners = self.announce();
        log::info!("[dealer] terminated");
        winners
    }

    /// Start [`Dealer::run`] on the current runtime.
    pub fn spawn(self) -> JoinHandle<Vec<PlayerId>> {
        tokio::spawn(self.run())
    }
}
