//! Player actor.
//!
//! A `Player` owns a small pending-action queue, its score, the
//! claim-outstanding flag and an optional freeze. Input arrives through
//! [`Player::key_pressed`] from any thread; the player's own task drains
//! the queue one slot at a time and toggles tokens on the table.
//!
//! ## States
//!
//! ```text
//! Idle ─▶ Selecting ─▶ AwaitingVerdict ─▶ PointFrozen ─┐
//!   ▲                        │          └▶ PenaltyFrozen ┤
//!   │                        └── stale ──────────────────┤
//!   └────────────────────────────────────────────────────┘
//! ```
//!
//! `Terminated` is reachable from every state and checked at every
//! suspension point.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::bot::Bot;
use super::timer::millis;
use super::Context;
use crate::claims::{Claim, Verdict};
use crate::core::sync::lock;
use crate::core::{GameRng, InvariantViolation, PlayerId, PlayerKind, SlotId, SET_SIZE};
use crate::table::Table;

/// Freeze countdowns are reported to the sink at this granularity.
pub const FREEZE_STEP: Duration = Duration::from_secs(1);

/// Where a player is in its action cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// No tokens on the table.
    Idle,
    /// One or two tokens on the table.
    Selecting,
    /// Claim submitted, waiting for the dealer.
    AwaitingVerdict,
    /// Serving the short freeze after a point.
    PointFrozen,
    /// Serving the long freeze after a penalty.
    PenaltyFrozen,
    /// Stopped for good.
    Terminated,
}

#[derive(Clone, Copy, Debug)]
struct Freeze {
    until: Instant,
    verdict: Verdict,
}

#[derive(Debug, Default)]
struct PlayerState {
    score: u32,
    actions: VecDeque<SlotId>,
    checking: bool,
    freeze: Option<Freeze>,
}

/// Result of one [`Player::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Nothing eligible right now.
    Wait,
    /// A freeze is running.
    Frozen,
    /// One action was applied.
    Acted,
}

/// One seat at the table.
pub struct Player {
    id: PlayerId,
    kind: PlayerKind,
    ctx: Context,
    state: Mutex<PlayerState>,

    /// Wakes the actor loop: new action, verdict, round reset, shutdown.
    wake: Notify,

    /// Wakes the bot when the queue has room again.
    space: Notify,

    /// Interrupts the bot's delays on shutdown.
    halt: Notify,

    terminate: AtomicBool,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, kind: PlayerKind, ctx: Context) -> Self {
        Self {
            id,
            kind,
            ctx,
            state: Mutex::new(PlayerState::default()),
            wake: Notify::new(),
            space: Notify::new(),
            halt: Notify::new(),
            terminate: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        lock(&self.state).score
    }

    /// Number of presses waiting to be applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.state).actions.len()
    }

    #[must_use]
    pub fn has_room(&self) -> bool {
        self.pending() < SET_SIZE
    }

    #[must_use]
    pub fn is_checking(&self) -> bool {
        lock(&self.state).checking
    }

    /// End of the current freeze, if frozen.
    #[must_use]
    pub fn freeze_deadline(&self) -> Option<Instant> {
        lock(&self.state).freeze.map(|f| f.until)
    }

    /// Tokens this player has on the table.
    #[must_use]
    pub fn token_count(&self) -> usize {
        lock(&self.ctx.table).token_count(self.id)
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn phase(&self) -> PlayerPhase {
        if self.is_terminated() {
            return PlayerPhase::Terminated;
        }
        let state = lock(&self.state);
        match (state.freeze, state.checking) {
            (Some(Freeze { verdict: Verdict::Point, .. }), _) => PlayerPhase::PointFrozen,
            (Some(_), _) => PlayerPhase::PenaltyFrozen,
            (None, true) => PlayerPhase::AwaitingVerdict,
            (None, false) => match lock(&self.ctx.table).token_count(self.id) {
                0 => PlayerPhase::Idle,
                _ => PlayerPhase::Selecting,
            },
        }
    }

    // === Input ===

    /// Queue a press on `slot`.
    ///
    /// Dropped unless the queue has room, the player is neither frozen
    /// nor waiting for a verdict, the table is accepting and the slot
    /// holds a card. Returns whether the press was queued.
    pub fn key_pressed(&self, slot: SlotId) -> bool {
        if self.is_terminated() {
            return false;
        }
        let accepted = {
            let mut state = lock(&self.state);
            if state.actions.len() >= SET_SIZE || state.freeze.is_some() || state.checking {
                false
            } else {
                let table = lock(&self.ctx.table);
                let open = table.is_accepting() && table.card_at(slot).is_some();
                if open {
                    state.actions.push_back(slot);
                }
                open
            }
        };
        if accepted {
            log::debug!("[player {}] pressed {}", self.id, slot);
            self.wake.notify_one();
        }
        accepted
    }

    // === Actor loop ===

    /// Apply at most one pending action.
    ///
    /// The actor task calls this in a loop; hosts that drive players by
    /// hand may call it directly. Pop, toggle and claim submission all
    /// happen under the player and table locks, so a sweep sees either
    /// the whole step or none of it.
    pub fn step(&self) -> Step {
        let mut state = lock(&self.state);
        if state.freeze.is_some() {
            return Step::Frozen;
        }
        if state.checking || state.actions.is_empty() {
            return Step::Wait;
        }
        let mut table = lock(&self.ctx.table);
        if !table.is_accepting() {
            return Step::Wait;
        }
        let Some(slot) = state.actions.pop_front() else {
            return Step::Wait;
        };
        if let Err(violation) = self.toggle(&mut state, &mut table, slot) {
            log::error!("[player {}] {}", self.id, violation);
        }
        drop(table);
        drop(state);
        self.space.notify_one();
        Step::Acted
    }

    fn toggle(
        &self,
        state: &mut PlayerState,
        table: &mut Table,
        slot: SlotId,
    ) -> Result<(), InvariantViolation> {
        if table.remove_token(self.id, slot) {
            log::debug!("[player {}] lifted token from {}", self.id, slot);
            return Ok(());
        }
        if table.card_at(slot).is_none() {
            log::debug!("[player {}] {} emptied before the press was applied", self.id, slot);
            return Ok(());
        }
        if table.token_count(self.id) >= SET_SIZE {
            log::debug!("[player {}] no tokens left for {}", self.id, slot);
            return Ok(());
        }

        table.place_token(self.id, slot)?;
        log::debug!("[player {}] placed token on {}", self.id, slot);

        if let Some(claim) = Claim::capture(self.id, table) {
            state.checking = true;
            log::debug!("[player {}] {}", self.id, claim);
            self.ctx.claims.push(claim);
        }
        Ok(())
    }

    /// Serve out the current freeze in [`FREEZE_STEP`] slices.
    ///
    /// Returns early on shutdown or when a round reset lifts the freeze.
    async fn settle_freeze(&self) {
        loop {
            if self.is_terminated() {
                return;
            }
            let Some(until) = self.freeze_deadline() else {
                self.ctx.ui.set_freeze(self.id, 0);
                return;
            };
            let remaining = until.saturating_duration_since(Instant::now());
            self.ctx.ui.set_freeze(self.id, millis(remaining));

            if remaining.is_zero() {
                {
                    let mut state = lock(&self.state);
                    if state.freeze.map(|f| f.until) == Some(until) {
                        state.freeze = None;
                    }
                }
                log::debug!("[player {}] unfrozen", self.id);
                self.space.notify_one();
                return;
            }

            tokio::select! {
                _ = tokio::time::sleep(remaining.min(FREEZE_STEP)) => {}
                _ = self.wake.notified() => {}
            }
        }
    }

    async fn run(&self) {
        while !self.is_terminated() {
            match self.step() {
                Step::Acted => tokio::task::yield_now().await,
                Step::Frozen => self.settle_freeze().await,
                Step::Wait => self.wake.notified().await,
            }
        }
    }

    /// Start the actor task, and a bot task for non-human seats.
    ///
    /// The returned handle finishes after the bot has been joined.
    pub fn spawn(self: &Arc<Self>, rng: GameRng) -> JoinHandle<()> {
        let player = Arc::clone(self);
        tokio::spawn(async move {
            log::info!("[player {}] starting ({:?})", player.id, player.kind);
            let bot = match player.kind {
                PlayerKind::Bot => Some(Bot::new(Arc::clone(&player), rng).spawn()),
                PlayerKind::Human => None,
            };

            player.run().await;

            if let Some(bot) = bot {
                if let Err(e) = bot.await {
                    log::error!("[player {}] bot task failed: {}", player.id, e);
                }
            }
            log::info!("[player {}] terminated", player.id);
        })
    }

    // === Dealer side ===

    /// Deliver the verdict on this player's outstanding claim.
    ///
    /// A point raises the score and starts the point freeze, a penalty
    /// starts the penalty freeze, a stale claim only releases the player.
    /// In every case the pending queue is discarded.
    pub fn award(&self, verdict: Verdict) -> Result<(), InvariantViolation> {
        let score = {
            let mut state = lock(&self.state);
            if !state.checking {
                return Err(InvariantViolation::NoClaimOutstanding(self.id));
            }
            state.checking = false;
            state.actions.clear();

            let now = Instant::now();
            match verdict {
                Verdict::Point => {
                    state.score += 1;
                    state.freeze = Some(Freeze {
                        until: now + self.ctx.config.point_freeze(),
                        verdict,
                    });
                    Some(state.score)
                }
                Verdict::Penalty => {
                    state.freeze = Some(Freeze {
                        until: now + self.ctx.config.penalty_freeze(),
                        verdict,
                    });
                    None
                }
                Verdict::Stale => None,
            }
        };

        if let Some(score) = score {
            self.ctx.ui.set_score(self.id, score);
        }
        log::info!("[player {}] verdict: {}", self.id, verdict);
        self.wake.notify_one();
        self.space.notify_one();
        Ok(())
    }

    /// Release a player whose claim went stale.
    pub fn release(&self) -> Result<(), InvariantViolation> {
        self.award(Verdict::Stale)
    }

    /// Forget everything from the previous round.
    ///
    /// Called by the dealer after the table has been cleared, so the
    /// token count is already zero.
    pub fn reset_round(&self) {
        {
            let mut state = lock(&self.state);
            state.actions.clear();
            state.checking = false;
            state.freeze = None;
        }
        self.wake.notify_one();
        self.space.notify_one();
    }

    /// Wake the actor so it re-checks whether it can act.
    pub fn wake(&self) {
        self.wake.notify_one();
        self.space.notify_one();
    }

    /// Stop the actor (and its bot) at the next suspension point.
    pub fn terminate(&self) {
        self.terminate.store(true, Ordering::SeqCst);
        self.wake.notify_one();
        self.space.notify_one();
        self.halt.notify_one();
    }

    // === Bot hooks ===

    /// Whether a press on an occupied slot would be queued right now.
    pub(crate) fn accepts_input(&self) -> bool {
        if self.is_terminated() {
            return false;
        }
        let state = lock(&self.state);
        if state.actions.len() >= SET_SIZE || state.freeze.is_some() || state.checking {
            return false;
        }
        let table = lock(&self.ctx.table);
        table.is_accepting() && table.card_count() > 0
    }

    pub(crate) async fn room(&self) {
        self.space.notified().await;
    }

    pub(crate) async fn halted(&self) {
        self.halt.notified().await;
    }

    pub(crate) fn context(&self) -> &Context {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, Config};
    use crate::ui::NullUi;

    fn seat(table_cards: u16) -> Player {
        let ctx = Context::new(
            Config::default().with_table_size(6).with_freezes(1_000, 3_000),
            Arc::new(NullUi),
        );
        {
            let mut table = lock(&ctx.table);
            for i in 0..table_cards {
                table.place_card(SlotId(i), CardId(i)).unwrap();
            }
            table.set_accepting(true);
        }
        Player::new(PlayerId(0), PlayerKind::Human, ctx)
    }

    fn press(player: &Player, slot: u16) {
        assert!(player.key_pressed(SlotId(slot)));
        assert_eq!(player.step(), Step::Acted);
    }

    #[test]
    fn test_toggle_restores_tokens() {
        let player = seat(6);
        press(&player, 2);
        assert_eq!(player.token_count(), 1);
        assert_eq!(player.phase(), PlayerPhase::Selecting);

        press(&player, 2);
        assert_eq!(player.token_count(), 0);
        assert_eq!(player.phase(), PlayerPhase::Idle);
    }

    #[test]
    fn test_key_pressed_filters() {
        let player = seat(3);

        // Empty slot
        assert!(!player.key_pressed(SlotId(4)));

        // Queue holds three presses at most
        assert!(player.key_pressed(SlotId(0)));
        assert!(player.key_pressed(SlotId(1)));
        assert!(player.key_pressed(SlotId(2)));
        assert!(!player.key_pressed(SlotId(0)));
        assert_eq!(player.pending(), 3);

        // Table not accepting
        lock(&player.ctx.table).set_accepting(false);
        assert_eq!(player.step(), Step::Wait);
        assert!(!player.has_room());
    }

    #[test]
    fn test_third_token_submits_claim() {
        let player = seat(6);
        press(&player, 0);
        press(&player, 3);
        press(&player, 5);

        assert!(player.is_checking());
        assert_eq!(player.phase(), PlayerPhase::AwaitingVerdict);
        let claim = player.ctx.claims.pop().unwrap();
        assert_eq!(claim.slots, [SlotId(0), SlotId(3), SlotId(5)]);
        assert_eq!(claim.cards, [CardId(0), CardId(3), CardId(5)]);

        // No input while waiting for the verdict
        assert!(!player.key_pressed(SlotId(1)));
    }

    #[test]
    fn test_presses_queued_before_claim_wait() {
        let player = seat(6);
        for slot in [0, 1, 2] {
            assert!(player.key_pressed(SlotId(slot)));
        }
        assert_eq!(player.step(), Step::Acted);
        assert_eq!(player.step(), Step::Acted);
        assert_eq!(player.step(), Step::Acted);
        assert_eq!(player.step(), Step::Wait);
        assert_eq!(player.ctx.claims.len(), 1);
    }

    #[test]
    fn test_award_without_claim_is_a_violation() {
        let player = seat(6);
        assert_eq!(
            player.award(Verdict::Point),
            Err(InvariantViolation::NoClaimOutstanding(PlayerId(0)))
        );
        assert_eq!(player.score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_point_and_penalty() {
        let player = seat(6);
        for slot in [0, 1, 2] {
            press(&player, slot);
        }
        player.award(Verdict::Point).unwrap();
        assert_eq!(player.score(), 1);
        assert_eq!(player.phase(), PlayerPhase::PointFrozen);
        assert_eq!(player.freeze_deadline(), Some(Instant::now() + Duration::from_secs(1)));
        assert_eq!(player.step(), Step::Frozen);

        player.settle_freeze().await;
        assert!(player.freeze_deadline().is_none());

        // Tokens are still down; lift one and re-place it to claim again
        press(&player, 0);
        press(&player, 0);
        player.award(Verdict::Penalty).unwrap();
        assert_eq!(player.score(), 1);
        assert_eq!(player.phase(), PlayerPhase::PenaltyFrozen);
        assert_eq!(player.freeze_deadline(), Some(Instant::now() + Duration::from_secs(3)));
    }

    #[test]
    fn test_stale_release() {
        let player = seat(6);
        for slot in [0, 1, 2] {
            press(&player, slot);
        }
        player.release().unwrap();
        assert!(!player.is_checking());
        assert!(player.freeze_deadline().is_none());
        assert_eq!(player.score(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_press_beyond_three_tokens_is_ignored() {
        let ui = Arc::new(crate::ui::UiRecorder::new());
        let ctx = Context::new(
            Config::default().with_table_size(6).with_freezes(1_000, 3_000),
            ui.clone(),
        );
        {
            let mut table = lock(&ctx.table);
            for i in 0..6 {
                table.place_card(SlotId(i), CardId(i)).unwrap();
            }
            table.set_accepting(true);
        }
        let player = Player::new(PlayerId(0), PlayerKind::Human, ctx);
        for slot in [0, 1, 2] {
            press(&player, slot);
        }
        player.ctx.claims.pop().unwrap();
        player.award(Verdict::Penalty).unwrap();
        player.settle_freeze().await;
        assert_eq!(player.phase(), PlayerPhase::Selecting);

        let before = lock(&player.ctx.table).tokens_of(PlayerId(0));
        ui.drain();
        press(&player, 4);

        assert_eq!(lock(&player.ctx.table).tokens_of(PlayerId(0)), before);
        assert_eq!(player.token_count(), 3);
        assert!(player.ctx.claims.is_empty());
        assert!(!player.is_checking());
        assert!(ui.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_freeze_expiry_signals_room() {
        let player = seat(6);
        for slot in [0, 1, 2] {
            press(&player, slot);
        }
        player.award(Verdict::Point).unwrap();
        // Consume the permit left by the verdict
        player.room().await;
        assert!(!player.accepts_input());

        player.settle_freeze().await;
        assert!(player.accepts_input());
        let woke = tokio::time::timeout(Duration::from_millis(1), player.room()).await;
        assert!(woke.is_ok());
    }

    #[test]
    fn test_reset_round() {
        let player = seat(6);
        press(&player, 0);
        assert!(player.key_pressed(SlotId(1)));

        lock(&player.ctx.table).clear();
        player.reset_round();
        assert_eq!(player.pending(), 0);
        assert_eq!(player.phase(), PlayerPhase::Idle);
    }
}
