//! Live-game tick simulator.
//!
//! Every tick reads the live games, rolls score/odds/stat deltas for each,
//! writes back only the games that actually changed, and hands each written
//! game to the broadcaster.

mod drift;

pub use drift::drift_game;

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::broadcast::{Broadcaster, GAME_UPDATE};
use crate::store::Storage;

/// Periodic mutator of live game state.
///
/// The simulator is the single logical writer of live games; ledger and
/// query paths only ever read them.
pub struct GameSimulator {
    store: Arc<dyn Storage>,
    broadcaster: Arc<Broadcaster>,
    interval: Duration,
    rng: StdRng,
}

impl GameSimulator {
    pub fn new(store: Arc<dyn Storage>, broadcaster: Arc<Broadcaster>, interval: Duration) -> Self {
        Self::with_rng(store, broadcaster, interval, StdRng::from_entropy())
    }

    /// Use a caller-provided RNG (deterministic tests).
    pub fn with_rng(
        store: Arc<dyn Storage>,
        broadcaster: Arc<Broadcaster>,
        interval: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            broadcaster,
            interval,
            rng,
        }
    }

    /// Run for the life of the process.
    ///
    /// A tick completes before the next fires; intervals missed while a tick
    /// is still in flight are skipped rather than bursted.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval = ?self.interval, "Simulator started");

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    /// Run one simulation pass. Returns the number of games written.
    pub async fn tick(&mut self) -> usize {
        let games = self.store.games().await;
        let mut written = 0;

        for game in games.into_iter().filter(|game| game.status.is_live()) {
            let Some(update) = drift_game(&game, &mut self.rng) else {
                continue;
            };
            match self.store.update_game(&game.id, update).await {
                Some(updated) => {
                    self.broadcaster.publish(GAME_UPDATE, &updated);
                    written += 1;
                }
                // Deleted mid-tick: skip this game, the tick goes on.
                None => warn!(game = %game.id, "Live game vanished mid-tick"),
            }
        }

        debug!(written, "Tick complete");
        written
    }
}
