// Starting balances
pub const STARTING_YOKU: u32 = 3;
pub const STARTING_PIONEER_POINTS: u32 = 6;
pub const STARTING_SKULL_TOKENS: u32 = 0;

// Activity costs and fixed rewards
pub const CONTRACT_PIONEER_COST: u32 = 3;
pub const CONTRACT_YOKU_REWARD: u32 = 1;
pub const DUNGEON_YOKU_COST: u32 = 1;
pub const DUNGEON_SKULL_TOKEN_REWARD: u32 = 1;
pub const DUNGEON_PIONEER_REWARD: u32 = 1;

// Periodic income (every N turns, before anyone acts)
pub const INCOME_INTERVAL_TURNS: u64 = 6;
pub const INCOME_YOKU: u32 = 1;
pub const INCOME_PIONEER_POINTS: u32 = 2;

// Gear
pub const GEAR_CAPACITY: usize = 5;
pub const CLASSIC_MAX_GEAR_BONUS: f64 = 0.20;

// Dungeons
pub const DEFAULT_WIN_CHANCE_CAP: f64 = 0.95;
pub const DEFAULT_DUNGEON_PET_CHANCE: f64 = 0.001;

// Lootboxes
pub const LOOTBOX_PET_CHANCE: f64 = 0.01;
pub const LOOTBOX_TOKEN_COST: u32 = 5;
pub const LOOTBOX_MATERIAL_COST: u32 = 5;
pub const CLASSIC_LOOTBOX_COST: u32 = 1;

// Tier selection weights (tier 1 is never boosted by gear)
pub const TIER_BASE_WEIGHTS: [f64; 3] = [0.6, 0.3, 0.1];
pub const TIER_GEAR_MODIFIERS: [f64; 3] = [0.0, 1.5, 1.0];

// Simulation defaults
pub const DEFAULT_ROUNDS_PER_DAY: u32 = 10;
pub const DEFAULT_SIMULATION_DAYS: u32 = 10;

// Pet names
pub const LOOTBOX_PET_NAME: &str = "Lootbox Pet";
