//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rust_set::actors::{Context, Control, Dealer, Player};
use rust_set::core::{CardId, Config, GameRng, PlayerKind, PlayerMap, SlotId, SET_SIZE};
use rust_set::rules::SetRules;
use rust_set::table::TableSnapshot;
use rust_set::ui::{Ui, UiRecorder};

/// A deck of `size` cards where only the listed triples are sets.
#[derive(Clone, Debug)]
pub struct FixedRules {
    size: u16,
    sets: Vec<[u16; SET_SIZE]>,
}

impl FixedRules {
    pub fn new(size: u16, sets: &[[u16; SET_SIZE]]) -> Self {
        let sets = sets
            .iter()
            .map(|set| {
                let mut set = *set;
                set.sort_unstable();
                set
            })
            .collect();
        Self { size, sets }
    }
}

impl SetRules for FixedRules {
    fn deck(&self) -> Vec<CardId> {
        (0..self.size).map(CardId).collect()
    }

    fn is_legal_set(&self, cards: &[CardId; SET_SIZE]) -> bool {
        let mut raw = (*cards).map(CardId::raw);
        raw.sort_unstable();
        self.sets.contains(&raw)
    }
}

/// A dealer and its players, wired but not spawned.
pub struct Rig {
    pub ctx: Context,
    pub players: PlayerMap<Arc<Player>>,
    pub dealer: Dealer,
    pub ui: Arc<UiRecorder>,
}

impl Rig {
    pub fn new(config: Config, rules: impl SetRules + 'static) -> Self {
        let ui = Arc::new(UiRecorder::new());
        let sink: Arc<dyn Ui> = ui.clone();
        let ctx = Context::new(config, sink);
        let players = PlayerMap::new(ctx.config.player_count(), |id| {
            Arc::new(Player::new(id, PlayerKind::Human, ctx.clone()))
        });
        let rules: Arc<dyn SetRules> = Arc::new(rules);
        let deck = rules.deck();
        let dealer = Dealer::new(
            ctx.clone(),
            rules,
            players.clone(),
            Arc::new(Control::new()),
            deck,
            GameRng::new(11),
        );
        Self { ctx, players, dealer, ui }
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.ctx.table.lock().unwrap().snapshot()
    }

    pub fn slot_of(&self, card: u16) -> SlotId {
        self.snapshot().slot_of(CardId(card)).expect("card is on the table")
    }
}

/// Find the slots holding the given cards.
pub fn slots_of(snapshot: &TableSnapshot, cards: [u16; SET_SIZE]) -> [SlotId; SET_SIZE] {
    cards.map(|card| snapshot.slot_of(CardId(card)).expect("card is on the table"))
}

/// Poll `cond` on virtual time until it holds.
pub async fn until(mut cond: impl FnMut() -> bool) {
    for _ in 0..100_000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition never held");
}
