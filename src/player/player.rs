use super::balances::Balances;
use super::history::{PlayerHistory, Snapshot};
use super::schedule::Schedule;
use crate::items::gear::{GearInventory, GearOutcome};
use crate::items::types::{PerTier, Rarity, Tier};
use crate::simulator::config::{EconomyConfig, PlayerProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A simulated player: balances, stockpiles, gear, counters and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub schedule: Schedule,
    pub balances: Balances,
    pub materials: BTreeMap<Rarity, u32>,
    pub gear: GearInventory,
    /// Pet identifiers in the order received; duplicates allowed
    pub pets: Vec<String>,
    pub dungeon_attempts: PerTier<u32>,
    pub dungeon_completions: PerTier<u32>,
    /// Turns this player was eligible for
    pub turns_played: u32,
    pub history: PlayerHistory,
}

impl Player {
    pub fn new(profile: &PlayerProfile, starting_balances: Balances) -> Self {
        Self {
            name: profile.name.clone(),
            schedule: Schedule::new(profile.activity_level, profile.play_frequency),
            balances: starting_balances,
            materials: Rarity::ALL.iter().map(|r| (*r, 0)).collect(),
            gear: GearInventory::new(),
            pets: Vec::new(),
            dungeon_attempts: PerTier::splat(0),
            dungeon_completions: PerTier::splat(0),
            turns_played: 0,
            history: PlayerHistory::new(),
        }
    }

    pub fn material(&self, rarity: Rarity) -> u32 {
        self.materials.get(&rarity).copied().unwrap_or(0)
    }

    pub fn add_material(&mut self, rarity: Rarity) {
        *self.materials.entry(rarity).or_insert(0) += 1;
    }

    pub fn has_materials(&self, cost: &BTreeMap<Rarity, u32>) -> bool {
        cost.iter().all(|(r, n)| self.material(*r) >= *n)
    }

    /// Panics if any material would go negative.
    pub fn debit_materials(&mut self, cost: &BTreeMap<Rarity, u32>) {
        assert!(
            self.has_materials(cost),
            "{} cannot pay materials {cost:?} from {:?}",
            self.name,
            self.materials
        );
        for (rarity, amount) in cost {
            if let Some(stock) = self.materials.get_mut(rarity) {
                *stock -= amount;
            }
        }
    }

    pub fn add_gear(&mut self, rarity: Rarity, config: &EconomyConfig) -> GearOutcome {
        self.gear.add(rarity, &config.gear_tier_values)
    }

    pub fn gear_bonus(&self, config: &EconomyConfig) -> f64 {
        self.gear.bonus(&config.gear_bonus_values, config.max_gear_bonus)
    }

    pub fn gear_power(&self, config: &EconomyConfig) -> u32 {
        self.gear.power(&config.gear_tier_values)
    }

    pub fn total_attempts(&self) -> u32 {
        self.dungeon_attempts.iter().map(|(_, n)| n).sum()
    }

    pub fn total_completions(&self) -> u32 {
        self.dungeon_completions.iter().map(|(_, n)| n).sum()
    }

    /// Completion percentage for one tier; 0 when never attempted.
    pub fn win_rate(&self, tier: Tier) -> f64 {
        percent(
            *self.dungeon_completions.get(tier),
            *self.dungeon_attempts.get(tier),
        )
    }

    pub fn overall_completion_rate(&self) -> f64 {
        percent(self.total_completions(), self.total_attempts())
    }

    pub fn reset_balances(&mut self, starting_balances: Balances) {
        self.balances = starting_balances;
    }

    /// Append one entry to every time series.
    pub fn record_stats(&mut self, turn: u64, config: &EconomyConfig) {
        let snapshot = Snapshot {
            turn,
            gear_power: self.gear_power(config),
            materials: self.materials.clone(),
            total_completions: self.total_completions(),
            win_rates: PerTier::new(
                self.win_rate(Tier::One),
                self.win_rate(Tier::Two),
                self.win_rate(Tier::Three),
            ),
        };
        self.history.record(snapshot);
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(&PlayerProfile::new("Tester"), Balances::default())
    }

    #[test]
    fn test_new_player_starts_empty() {
        let p = player();
        assert_eq!(p.balances, Balances::new(3, 6, 0));
        assert!(p.gear.is_empty());
        assert!(p.pets.is_empty());
        assert_eq!(p.total_attempts(), 0);
        assert!(Rarity::ALL.iter().all(|r| p.material(*r) == 0));
    }

    #[test]
    fn test_win_rate_is_percent() {
        let mut p = player();
        *p.dungeon_attempts.get_mut(Tier::Two) = 4;
        *p.dungeon_completions.get_mut(Tier::Two) = 1;
        assert!((p.win_rate(Tier::Two) - 25.0).abs() < 1e-9);
        assert_eq!(p.win_rate(Tier::One), 0.0);
        assert!((p.overall_completion_rate() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_material_debit() {
        let mut p = player();
        p.add_material(Rarity::Rare);
        p.add_material(Rarity::Epic);
        p.add_material(Rarity::Epic);
        let cost: BTreeMap<Rarity, u32> =
            [(Rarity::Rare, 1), (Rarity::Epic, 1)].into_iter().collect();
        assert!(p.has_materials(&cost));
        p.debit_materials(&cost);
        assert_eq!(p.material(Rarity::Rare), 0);
        assert_eq!(p.material(Rarity::Epic), 1);
        assert!(!p.has_materials(&cost));
    }

    #[test]
    #[should_panic(expected = "cannot pay materials")]
    fn test_material_overdraw_panics() {
        let mut p = player();
        let cost: BTreeMap<Rarity, u32> = [(Rarity::Epic, 1)].into_iter().collect();
        p.debit_materials(&cost);
    }

    #[test]
    fn test_record_stats_appends_snapshot() {
        let config = EconomyConfig::default();
        let mut p = player();
        p.add_gear(Rarity::Epic, &config);
        p.record_stats(7, &config);
        assert_eq!(p.history.turns, vec![7]);
        assert_eq!(p.history.gear_power, vec![3]);
        assert_eq!(p.history.completions, vec![0]);
    }

    #[test]
    fn test_gear_bonus_uses_config_cap() {
        let mut config = EconomyConfig::default();
        let mut p = player();
        for _ in 0..5 {
            p.add_gear(Rarity::Legendary, &config);
        }
        assert!((p.gear_bonus(&config) - 0.25).abs() < 1e-9);
        config.max_gear_bonus = Some(0.20);
        assert!((p.gear_bonus(&config) - 0.20).abs() < 1e-9);
    }
}
