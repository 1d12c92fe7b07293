//! Turn-based economy simulator.
//!
//! A [`Game`] runs a roster of players through days of rounds. Each eligible
//! player takes one action per round (a dungeon or a contract) and then buys
//! lootboxes while they can afford them. Everything that happens is appended
//! to the [`ActionLog`], and [`GameReport`] summarizes the final state.

pub mod action_log;
pub mod config;
pub mod game;
pub mod report;
pub mod runner;

pub use action_log::{ActionEvent, ActionLog, GearSource, LogEntry, MaterialSource};
pub use config::{
    ConfigError, EconomyConfig, LootboxCost, PlayerProfile, SimConfig, TierSelection,
};
pub use game::Game;
pub use report::{GameReport, PlayerReport, TierReport};
pub use runner::{run_simulation, run_simulation_with_rng, SimOutcome};
