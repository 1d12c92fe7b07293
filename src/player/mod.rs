//! Player state: balances, participation schedule, and recorded history.

pub mod balances;
pub mod history;
#[allow(clippy::module_inception)]
pub mod player;
pub mod schedule;

pub use balances::Balances;
pub use history::{PlayerHistory, Snapshot};
pub use player::Player;
pub use schedule::Schedule;
