//! Dungeon Economy - turn-based game economy simulator.
//!
//! Players trade pioneer points for yoku through contracts, spend yoku on
//! dungeon runs for gear and skull tokens, and open lootboxes with skull
//! tokens and materials. Runs are seeded so results can be replayed.

pub mod activities;
pub mod core;
pub mod items;
pub mod player;
pub mod simulator;
