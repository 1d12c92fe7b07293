use crate::items::types::{PerTier, Rarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded turn for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub turn: u64,
    pub gear_power: u32,
    pub materials: BTreeMap<Rarity, u32>,
    pub total_completions: u32,
    /// Completion percentage per tier (0-100)
    pub win_rates: PerTier<f64>,
}

/// Parallel time series, one entry per recorded turn.
///
/// Every vector (and every per-rarity / per-tier vector) always has the same
/// length as `turns`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub turns: Vec<u64>,
    pub gear_power: Vec<u32>,
    pub materials: BTreeMap<Rarity, Vec<u32>>,
    pub completions: Vec<u32>,
    pub win_rates: PerTier<Vec<f64>>,
}

impl PlayerHistory {
    pub fn new() -> Self {
        Self {
            materials: Rarity::ALL.iter().map(|r| (*r, Vec::new())).collect(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn record(&mut self, snapshot: Snapshot) {
        self.turns.push(snapshot.turn);
        self.gear_power.push(snapshot.gear_power);
        for rarity in Rarity::ALL {
            let count = snapshot.materials.get(&rarity).copied().unwrap_or(0);
            self.materials.entry(rarity).or_default().push(count);
        }
        self.completions.push(snapshot.total_completions);
        for (tier, rate) in snapshot.win_rates.iter() {
            self.win_rates.get_mut(tier).push(*rate);
        }
    }
}
