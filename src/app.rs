//! Application wiring: store, ledger, simulator, and the event feed.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::broadcast::Broadcaster;
use crate::config::Config;
use crate::domain::{User, UserId};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::seed;
use crate::sim::GameSimulator;
use crate::store::{MemoryStore, Storage};
use crate::ws;

/// Username of the account seeded for single-user deployments.
pub const DEMO_USERNAME: &str = "demo";

/// Assembled engine: every component wired to the same store.
pub struct App {
    store: Arc<dyn Storage>,
    ledger: Arc<Ledger>,
    broadcaster: Arc<Broadcaster>,
    tick_interval: Duration,
}

impl App {
    /// Build the engine and seed initial data.
    pub async fn bootstrap(config: &Config) -> Result<Self> {
        let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());

        if config.seed.fixtures {
            let seeded = seed::seed_games(store.as_ref()).await;
            info!(games = seeded, "Fixture games seeded");
        }
        if store.user_by_username(DEMO_USERNAME).await.is_none() {
            let demo = store
                .create_user(User {
                    id: UserId::generate(),
                    username: DEMO_USERNAME.into(),
                    balance: config.seed.demo_balance,
                })
                .await;
            info!(user = %demo.id, balance = %demo.balance, "Demo account created");
        }

        Ok(Self {
            ledger: Arc::new(Ledger::new(Arc::clone(&store))),
            broadcaster: Arc::new(Broadcaster::new()),
            tick_interval: Duration::from_secs(config.simulator.tick_seconds),
            store,
        })
    }

    /// The shared record store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn Storage> {
        &self.store
    }

    /// The wagering ledger, for the request layer to call into.
    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// The event broadcaster feeding connected subscribers.
    #[must_use]
    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// Start the tick simulator on the runtime.
    pub fn spawn_simulator(&self) -> JoinHandle<()> {
        let simulator = GameSimulator::new(
            Arc::clone(&self.store),
            Arc::clone(&self.broadcaster),
            self.tick_interval,
        );
        tokio::spawn(simulator.run())
    }

    /// Bootstrap, start the simulator, and serve the feed until shutdown.
    pub async fn run(config: Config) -> Result<()> {
        let app = Self::bootstrap(&config).await?;
        let _simulator = app.spawn_simulator();
        ws::serve(&config.network.listen_addr, Arc::clone(&app.broadcaster)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_seeds_games_and_demo_account() {
        let config = Config::default();
        let app = App::bootstrap(&config).await.unwrap();

        assert!(!app.store().games().await.is_empty());
        let demo = app.store().user_by_username(DEMO_USERNAME).await.unwrap();
        assert_eq!(demo.balance, config.seed.demo_balance);
    }

    #[tokio::test]
    async fn bootstrap_can_skip_fixtures() {
        let mut config = Config::default();
        config.seed.fixtures = false;
        let app = App::bootstrap(&config).await.unwrap();
        assert!(app.store().games().await.is_empty());
    }
}
