//! Simulation configuration.
//!
//! [`EconomyConfig`] holds every drop table, rate, and cost. Rule differences
//! between economy revisions are explicit fields here rather than separate
//! code paths; [`EconomyConfig::classic`] reproduces the first revision.

use crate::core::constants::*;
use crate::items::drops::Weights;
use crate::items::gear::{BonusValues, TierValues};
use crate::items::types::{PerTier, Rarity, Tier};
use crate::player::Balances;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rounds per day must be at least 1")]
    ZeroRoundsPerDay,
    #[error("a simulation must run for at least 1 day")]
    ZeroDays,
    #[error("player name must not be empty")]
    EmptyPlayerName,
    #[error("duplicate player name {name:?}")]
    DuplicatePlayer { name: String },
    #[error("activity level for {name:?} must be within [0, 1], got {value}")]
    InvalidActivityLevel { name: String, value: f64 },
    #[error("play frequency for {name:?} must be at least 1 day")]
    ZeroPlayFrequency { name: String },
    #[error("negative weight {weight} for {rarity} in {table}")]
    NegativeWeight {
        table: String,
        rarity: Rarity,
        weight: f64,
    },
    #[error("non-finite weight for {rarity} in {table}")]
    NonFiniteWeight { table: String, rarity: Rarity },
    #[error("{field} must be a probability within [0, 1], got {value}")]
    InvalidProbability { field: String, value: f64 },
    #[error("periodic income interval must be at least 1 turn")]
    ZeroIncomeInterval,
    #[error("lootbox cost must include at least one token or material")]
    FreeLootbox,
}

/// How a player picks which dungeon tier to attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierSelection {
    /// Each tier equally likely.
    Uniform,
    /// Tiers 2 and 3 gain weight with gear bonus; tier 1 stays at its base.
    GearWeighted,
}

/// Base weights and per-tier gear multipliers for [`TierSelection::GearWeighted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    pub base: PerTier<f64>,
    /// Tier 1's modifier is ignored.
    pub gear_modifiers: PerTier<f64>,
}

impl Default for TierWeights {
    fn default() -> Self {
        let [b1, b2, b3] = TIER_BASE_WEIGHTS;
        let [m1, m2, m3] = TIER_GEAR_MODIFIERS;
        Self {
            base: PerTier::new(b1, b2, b3),
            gear_modifiers: PerTier::new(m1, m2, m3),
        }
    }
}

/// Grant paid to every player each time the turn counter hits a multiple of
/// `interval_turns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicIncome {
    pub interval_turns: u64,
    pub yoku: u32,
    pub pioneer_points: u32,
}

impl Default for PeriodicIncome {
    fn default() -> Self {
        Self {
            interval_turns: INCOME_INTERVAL_TURNS,
            yoku: INCOME_YOKU,
            pioneer_points: INCOME_PIONEER_POINTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCosts {
    pub contract_pioneer_points: u32,
    pub contract_yoku_reward: u32,
    pub dungeon_yoku: u32,
    /// Paid on every cleared dungeon
    pub dungeon_skull_token_reward: u32,
    pub dungeon_pioneer_reward: u32,
}

impl Default for ActivityCosts {
    fn default() -> Self {
        Self {
            contract_pioneer_points: CONTRACT_PIONEER_COST,
            contract_yoku_reward: CONTRACT_YOKU_REWARD,
            dungeon_yoku: DUNGEON_YOKU_COST,
            dungeon_skull_token_reward: DUNGEON_SKULL_TOKEN_REWARD,
            dungeon_pioneer_reward: DUNGEON_PIONEER_REWARD,
        }
    }
}

/// Price of one lootbox. The same amounts gate the purchase and are debited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootboxCost {
    pub skull_tokens: u32,
    pub materials: BTreeMap<Rarity, u32>,
}

impl LootboxCost {
    /// Same amount of skull tokens, rare and epic materials.
    pub fn uniform(amount: u32) -> Self {
        Self {
            skull_tokens: amount,
            materials: [(Rarity::Rare, amount), (Rarity::Epic, amount)]
                .into_iter()
                .collect(),
        }
    }
}

impl Default for LootboxCost {
    fn default() -> Self {
        Self {
            skull_tokens: LOOTBOX_TOKEN_COST,
            materials: [
                (Rarity::Rare, LOOTBOX_MATERIAL_COST),
                (Rarity::Epic, LOOTBOX_MATERIAL_COST),
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// Immutable economy rules for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyConfig {
    pub contract_material_weights: Weights,

    pub lootbox_loot_weights: Weights,
    pub lootbox_pet_chance: f64,
    pub lootbox_cost: LootboxCost,

    pub gear_bonus_values: BonusValues,
    pub gear_tier_values: TierValues,
    /// Clamp on the summed gear bonus (None = uncapped)
    pub max_gear_bonus: Option<f64>,

    pub dungeon_win_chances: PerTier<f64>,
    /// Clamp on base + gear bonus (None = uncapped)
    pub win_chance_cap: Option<f64>,
    pub dungeon_loot_weights: PerTier<Weights>,
    pub dungeon_material_weights: PerTier<Weights>,
    pub dungeon_pet_chances: PerTier<f64>,

    pub tier_selection: TierSelection,
    pub tier_weights: TierWeights,

    pub costs: ActivityCosts,
    pub starting_balances: Balances,
    pub income: PeriodicIncome,
    /// Reset every player to `starting_balances` at the start of each day
    pub reset_resources_daily: bool,
}

fn weights(pairs: &[(Rarity, f64)]) -> Weights {
    pairs.iter().copied().collect()
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            contract_material_weights: weights(&[(Rarity::Epic, 0.11), (Rarity::Rare, 0.89)]),
            lootbox_loot_weights: weights(&[
                (Rarity::Legendary, 0.02),
                (Rarity::Epic, 0.09),
                (Rarity::Rare, 0.15),
                (Rarity::Uncommon, 0.74),
                (Rarity::Common, 0.0),
            ]),
            lootbox_pet_chance: LOOTBOX_PET_CHANCE,
            lootbox_cost: LootboxCost::default(),
            gear_bonus_values: [
                (Rarity::Legendary, 0.05),
                (Rarity::Epic, 0.03),
                (Rarity::Rare, 0.02),
                (Rarity::Uncommon, 0.01),
            ]
            .into_iter()
            .collect(),
            gear_tier_values: [
                (Rarity::Uncommon, 1),
                (Rarity::Rare, 2),
                (Rarity::Epic, 3),
                (Rarity::Legendary, 4),
            ]
            .into_iter()
            .collect(),
            max_gear_bonus: None,
            dungeon_win_chances: PerTier::new(0.8, 0.6, 0.3),
            win_chance_cap: Some(DEFAULT_WIN_CHANCE_CAP),
            dungeon_loot_weights: PerTier::new(
                weights(&[(Rarity::Epic, 0.0), (Rarity::Rare, 0.26), (Rarity::Uncommon, 0.74)]),
                weights(&[(Rarity::Epic, 0.2), (Rarity::Rare, 0.5), (Rarity::Uncommon, 0.3)]),
                weights(&[(Rarity::Epic, 0.4), (Rarity::Rare, 0.5), (Rarity::Uncommon, 0.1)]),
            ),
            dungeon_material_weights: PerTier::new(
                weights(&[(Rarity::Epic, 0.1), (Rarity::Rare, 0.9)]),
                weights(&[(Rarity::Epic, 0.2), (Rarity::Rare, 0.8)]),
                weights(&[(Rarity::Epic, 0.4), (Rarity::Rare, 0.6)]),
            ),
            dungeon_pet_chances: PerTier::splat(DEFAULT_DUNGEON_PET_CHANCE),
            tier_selection: TierSelection::GearWeighted,
            tier_weights: TierWeights::default(),
            costs: ActivityCosts::default(),
            starting_balances: Balances::default(),
            income: PeriodicIncome::default(),
            reset_resources_daily: false,
        }
    }
}

impl EconomyConfig {
    /// The first economy revision: daily resets, random tier choice, gear
    /// bonus capped at 20%, lootboxes costing one of each resource.
    pub fn classic() -> Self {
        Self {
            max_gear_bonus: Some(CLASSIC_MAX_GEAR_BONUS),
            lootbox_cost: LootboxCost::uniform(CLASSIC_LOOTBOX_COST),
            tier_selection: TierSelection::Uniform,
            reset_resources_daily: true,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weights("contract materials", &self.contract_material_weights)?;
        check_weights("lootbox loot", &self.lootbox_loot_weights)?;
        for tier in Tier::ALL {
            check_weights(
                &format!("{tier} dungeon loot"),
                self.dungeon_loot_weights.get(tier),
            )?;
            check_weights(
                &format!("{tier} dungeon materials"),
                self.dungeon_material_weights.get(tier),
            )?;
            check_probability(
                &format!("{tier} win chance"),
                *self.dungeon_win_chances.get(tier),
            )?;
            check_probability(
                &format!("{tier} pet chance"),
                *self.dungeon_pet_chances.get(tier),
            )?;
            check_non_negative(
                &format!("{tier} selection weight"),
                *self.tier_weights.base.get(tier),
            )?;
            check_non_negative(
                &format!("{tier} selection gear modifier"),
                *self.tier_weights.gear_modifiers.get(tier),
            )?;
        }
        check_probability("lootbox pet chance", self.lootbox_pet_chance)?;
        if let Some(cap) = self.win_chance_cap {
            check_probability("win chance cap", cap)?;
        }
        if let Some(cap) = self.max_gear_bonus {
            check_non_negative("max gear bonus", cap)?;
        }
        for (rarity, bonus) in &self.gear_bonus_values {
            check_non_negative(&format!("{rarity} gear bonus"), *bonus)?;
        }
        if self.income.interval_turns == 0 {
            return Err(ConfigError::ZeroIncomeInterval);
        }
        if self.lootbox_cost.skull_tokens == 0
            && self.lootbox_cost.materials.values().all(|n| *n == 0)
        {
            return Err(ConfigError::FreeLootbox);
        }
        Ok(())
    }
}

fn check_weights(table: &str, weights: &Weights) -> Result<(), ConfigError> {
    for (&rarity, &weight) in weights {
        if !weight.is_finite() {
            return Err(ConfigError::NonFiniteWeight {
                table: table.to_string(),
                rarity,
            });
        }
        if weight < 0.0 {
            return Err(ConfigError::NegativeWeight {
                table: table.to_string(),
                rarity,
                weight,
            });
        }
    }
    Ok(())
}

fn check_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidProbability {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Who plays, and how often.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Fraction of rounds played on an active day, in [0, 1]
    pub activity_level: f64,
    /// Days between sessions (1 = every day)
    pub play_frequency: u32,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activity_level: 1.0,
            play_frequency: 1,
        }
    }

    pub fn with_activity(mut self, activity_level: f64) -> Self {
        self.activity_level = activity_level;
        self
    }

    pub fn with_frequency(mut self, play_frequency: u32) -> Self {
        self.play_frequency = play_frequency;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyPlayerName);
        }
        if !(0.0..=1.0).contains(&self.activity_level) {
            return Err(ConfigError::InvalidActivityLevel {
                name: self.name.clone(),
                value: self.activity_level,
            });
        }
        if self.play_frequency == 0 {
            return Err(ConfigError::ZeroPlayFrequency {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Validate a roster: every profile valid, names unique.
pub fn validate_roster(players: &[PlayerProfile]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for profile in players {
        profile.validate()?;
        if !seen.insert(profile.name.as_str()) {
            return Err(ConfigError::DuplicatePlayer {
                name: profile.name.clone(),
            });
        }
    }
    Ok(())
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of days to simulate
    pub days: u32,

    pub rounds_per_day: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub players: Vec<PlayerProfile>,

    pub economy: EconomyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_SIMULATION_DAYS,
            rounds_per_day: DEFAULT_ROUNDS_PER_DAY,
            seed: None,
            players: vec![
                PlayerProfile::new("Player 1"),
                PlayerProfile::new("Player 2"),
            ],
            economy: EconomyConfig::default(),
        }
    }
}

impl SimConfig {
    /// `count` always-on players named "Player 1".."Player N".
    pub fn with_players(count: usize) -> Self {
        Self {
            players: (1..=count)
                .map(|i| PlayerProfile::new(format!("Player {i}")))
                .collect(),
            ..Default::default()
        }
    }

    /// Mixed roster for comparing casual and dedicated players over a month.
    pub fn engagement_comparison() -> Self {
        Self {
            days: 30,
            players: vec![
                PlayerProfile::new("Dedicated"),
                PlayerProfile::new("Regular").with_activity(0.5),
                PlayerProfile::new("Weekender")
                    .with_activity(0.5)
                    .with_frequency(3),
                PlayerProfile::new("Casual")
                    .with_activity(0.2)
                    .with_frequency(7),
            ],
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.days == 0 {
            return Err(ConfigError::ZeroDays);
        }
        if self.rounds_per_day == 0 {
            return Err(ConfigError::ZeroRoundsPerDay);
        }
        validate_roster(&self.players)?;
        self.economy.validate()
    }
}
