//! FIFO of claims awaiting the dealer.

use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;

use super::claim::Claim;
use crate::core::sync::lock;

/// Multi-producer, single-consumer claim queue.
///
/// Players push from their own tasks; only the dealer pops. `push` holds
/// the queue lock just long enough to append and never waits for the
/// verdict. `pop` reads and removes the head in one critical section.
#[derive(Debug, Default)]
pub struct ClaimQueue {
    claims: Mutex<VecDeque<Claim>>,
    ready: Notify,
}

impl ClaimQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a claim and wake the dealer.
    pub fn push(&self, claim: Claim) {
        let depth = {
            let mut claims = lock(&self.claims);
            claims.push_back(claim);
            claims.len()
        };
        log::debug!("[claims] queued, depth {}", depth);
        self.ready.notify_one();
    }

    /// Remove and return the oldest claim.
    pub fn pop(&self) -> Option<Claim> {
        lock(&self.claims).pop_front()
    }

    /// Drop every pending claim. Returns how many were voided.
    pub fn clear(&self) -> usize {
        let voided = {
            let mut claims = lock(&self.claims);
            let n = claims.len();
            claims.clear();
            n
        };
        if voided > 0 {
            log::debug!("[claims] voided {} pending", voided);
        }
        voided
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.claims).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.claims).is_empty()
    }

    /// Resolves after the next `push`, or immediately if a push happened
    /// since the last wait.
    pub async fn ready(&self) {
        self.ready.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, PlayerId, SlotId};

    fn claim(player: u8) -> Claim {
        Claim {
            player: PlayerId(player),
            cards: [CardId(0), CardId(1), CardId(2)],
            slots: [SlotId(0), SlotId(1), SlotId(2)],
        }
    }

    #[test]
    fn test_fifo() {
        let queue = ClaimQueue::new();
        queue.push(claim(2));
        queue.push(claim(0));
        queue.push(claim(1));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().map(|c| c.player), Some(PlayerId(2)));
        assert_eq!(queue.pop().map(|c| c.player), Some(PlayerId(0)));
        assert_eq!(queue.pop().map(|c| c.player), Some(PlayerId(1)));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_clear() {
        let queue = ClaimQueue::new();
        queue.push(claim(0));
        queue.push(claim(1));

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert_eq!(queue.clear(), 0);
    }

    #[tokio::test]
    async fn test_push_before_wait_is_not_lost() {
        let queue = ClaimQueue::new();
        queue.push(claim(0));

        // The permit stored by push lets this return at once
        queue.ready().await;
        assert!(queue.pop().is_some());
    }
}
