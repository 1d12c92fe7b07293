//! Item system: rarities, drop tables, and equipped gear.

pub mod drops;
pub mod gear;
pub mod types;

pub use drops::*;
pub use gear::*;
pub use types::*;
