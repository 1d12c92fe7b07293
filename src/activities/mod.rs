//! Things a player spends a turn on.

pub mod contract;
pub mod dungeon;
pub mod lootbox;
pub mod tier_select;

pub use contract::Contract;
pub use dungeon::{Dungeon, DungeonOutcome};
pub use lootbox::Lootbox;
pub use tier_select::TierSelector;
