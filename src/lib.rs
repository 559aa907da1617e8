//! Oddsmith - live-odds wagering engine and sportsbook simulator.
//!
//! This crate provides the stateful core of a sportsbook: the odds and
//! payout arithmetic behind every wager, a ledger that keeps balances and
//! wager records consistent while lines move, a tick simulator that drives
//! live game state, and a broadcaster that fans each change out to
//! connected subscribers.
//!
//! # Architecture
//!
//! ```text
//! GameSimulator ──(tick)──► Storage ──(changed games)──► Broadcaster ──► ws feed
//!                              ▲
//!                              │ reads (frozen odds at placement)
//!                           Ledger ◄── place / cash-out requests
//! ```
//!
//! The simulator is the single writer of live games. The ledger reads game
//! state but snapshots odds at placement, so line movement after placement
//! never affects a booked wager. Cash-out offers are recomputed on every
//! read and never stored.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Odds arithmetic, game/wager records, the slip composer
//! - [`error`] - Error types for the crate
//! - [`store`] - Repository trait and the in-memory implementation
//! - [`ledger`] - Balance/bet/parlay operations
//! - [`sim`] - The live-game tick simulator
//! - [`broadcast`] - Event fan-out to subscribers
//! - [`ws`] - WebSocket transport adapter for the feed
//! - [`app`] - Application wiring and bootstrap
//! - [`seed`] - Fixture games and the demo account
//!
//! # Example
//!
//! ```no_run
//! use oddsmith::domain::{combine, payout, AmericanOdds};
//! use rust_decimal_macros::dec;
//!
//! let legs = [
//!     AmericanOdds::new(150).unwrap(),
//!     AmericanOdds::new(-200).unwrap(),
//! ];
//! let parlay = combine(&legs).unwrap();
//! assert_eq!(parlay.value(), 275);
//! assert_eq!(payout(dec!(20), parlay).unwrap(), dec!(75.00));
//! ```

pub mod app;
pub mod broadcast;
pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod seed;
pub mod sim;
pub mod store;
pub mod ws;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
