//! Dungeon tier choice.
//!
//! With gear-weighted selection, tiers 2 and 3 gain `modifier * gear_bonus`
//! on top of their base weight while tier 1 stays put, so better-geared
//! players drift toward harder dungeons.

use crate::items::types::Tier;
use crate::simulator::config::{EconomyConfig, TierSelection};
use rand::seq::SliceRandom;
use rand::Rng;

pub struct TierSelector<'a> {
    config: &'a EconomyConfig,
}

impl<'a> TierSelector<'a> {
    pub fn new(config: &'a EconomyConfig) -> Self {
        Self { config }
    }

    /// Normalized weights in tier order. All-zero weights put everything on
    /// tier 1.
    pub fn weights(&self, gear_bonus: f64) -> [f64; 3] {
        let tw = &self.config.tier_weights;
        let raw = Tier::ALL.map(|tier| {
            let base = *tw.base.get(tier);
            let weight = match tier {
                Tier::One => base,
                _ => base + tw.gear_modifiers.get(tier) * gear_bonus,
            };
            weight.max(0.0)
        });

        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return [1.0, 0.0, 0.0];
        }
        raw.map(|w| w / total)
    }

    /// Map a uniform draw to a tier, walking tier 1 → 3; tier 1 on exhaustion.
    pub fn resolve(&self, gear_bonus: f64, draw: f64) -> Tier {
        let weights = self.weights(gear_bonus);
        let mut cumulative = 0.0;
        for (tier, weight) in Tier::ALL.iter().zip(weights) {
            cumulative += weight;
            if draw < cumulative {
                return *tier;
            }
        }
        Tier::One
    }

    pub fn select(&self, gear_bonus: f64, rng: &mut impl Rng) -> Tier {
        match self.config.tier_selection {
            TierSelection::Uniform => *Tier::ALL.choose(rng).unwrap_or(&Tier::One),
            TierSelection::GearWeighted => self.resolve(gear_bonus, rng.gen::<f64>()),
        }
    }
}
