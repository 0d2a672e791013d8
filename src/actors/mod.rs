//! Concurrent actors: the dealer, the players and their bots.
//!
//! Every actor runs in its own tokio task and shares state through a
//! [`Context`]. Blocking is cooperative: actors wait on a
//! [`Notify`](tokio::sync::Notify) raced against a sleep, never spin.
//!
//! ## Lock order
//!
//! Each owner has its own `Mutex`: every player's state, the table, the
//! claim queue. When more than one is held they are taken in the order
//!
//! player → table → claim queue
//!
//! and the dealer never holds the table lock while locking a player. No
//! guard is held across an `.await`.
//!
//! ## Shutdown
//!
//! [`Control::terminate`] raises a flag the dealer checks at every tick.
//! The dealer then stops players in reverse seat order and joins each
//! one; a player joins its own bot before finishing.

mod bot;
mod dealer;
mod player;
mod timer;

pub use dealer::{Dealer, DealerPhase};
pub use player::{Player, PlayerPhase, Step, FREEZE_STEP};
pub use timer::RoundTimer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::claims::ClaimQueue;
use crate::core::sync::lock;
use crate::core::Config;
use crate::table::Table;
use crate::ui::Ui;

/// State shared by every actor in one game.
#[derive(Clone)]
pub struct Context {
    pub config: Arc<Config>,
    pub table: Arc<Mutex<Table>>,
    pub claims: Arc<ClaimQueue>,
    pub ui: Arc<dyn Ui>,
}

impl Context {
    /// Fresh context with an empty table and claim queue.
    #[must_use]
    pub fn new(config: Config, ui: Arc<dyn Ui>) -> Self {
        let table = Table::new(config.table_size, Arc::clone(&ui));
        Self {
            config: Arc::new(config),
            table: Arc::new(Mutex::new(table)),
            claims: Arc::new(ClaimQueue::new()),
            ui,
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("claims", &self.claims.len())
            .finish()
    }
}

/// Handle the host uses to observe and stop the dealer.
#[derive(Debug, Default)]
pub struct Control {
    terminate: AtomicBool,
    wake: Notify,
    phase: Mutex<DealerPhase>,
    deadline: Mutex<Option<Instant>>,
}

impl Control {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the dealer to finish the game.
    pub fn terminate(&self) {
        self.terminate.store(true, Ordering::SeqCst);
        self.wake.notify_one();
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn phase(&self) -> DealerPhase {
        *lock(&self.phase)
    }

    /// Current countdown deadline, if a countdown round is running.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        *lock(&self.deadline)
    }

    pub(crate) fn set_phase(&self, phase: DealerPhase) {
        *lock(&self.phase) = phase;
    }

    pub(crate) fn set_deadline(&self, deadline: Option<Instant>) {
        *lock(&self.deadline) = deadline;
    }

    pub(crate) async fn woken(&self) {
        self.wake.notified().await;
    }
}
