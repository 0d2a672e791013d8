//! Random key presser for non-human seats.

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::player::Player;
use crate::core::sync::lock;
use crate::core::{GameRng, SlotId};

/// Presses uniformly random occupied slots on behalf of a player.
///
/// Parks while the player's queue is full or while presses are being
/// rejected (frozen, awaiting a verdict, mid-sweep) until the player
/// signals room again.
pub(crate) struct Bot {
    player: Arc<Player>,
    rng: GameRng,
}

impl Bot {
    pub(crate) fn new(player: Arc<Player>, rng: GameRng) -> Self {
        Self { player, rng }
    }

    pub(crate) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    fn pick(&mut self) -> Option<SlotId> {
        let occupied = lock(&self.player.context().table).occupied_slots();
        self.rng.choose(&occupied).copied()
    }

    async fn run(mut self) {
        let id = self.player.id();
        let delay = self.player.context().config.bot_delay();
        log::debug!("[bot {}] starting", id);

        while !self.player.is_terminated() {
            let pressed = self.player.has_room()
                && self
                    .pick()
                    .map_or(false, |slot| self.player.key_pressed(slot));

            if pressed {
                if delay.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.player.halted() => {}
                    }
                }
                continue;
            }

            // The picked slot emptied before the press landed
            if self.player.accepts_input() {
                tokio::task::yield_now().await;
                continue;
            }

            tokio::select! {
                _ = self.player.room() => {}
                _ = self.player.halted() => {}
            }
        }
        log::debug!("[bot {}] terminated", id);
    }
}
