use super::types::Rarity;
use crate::core::constants::GEAR_CAPACITY;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric value per rarity used to compare gear. Missing rarities count as 0.
pub type TierValues = BTreeMap<Rarity, u32>;

/// Bonus to dungeon win chance per equipped piece.
pub type BonusValues = BTreeMap<Rarity, f64>;

/// What happened to a piece of gear offered to the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GearOutcome {
    /// A free slot was available.
    Equipped,
    /// The inventory was full and the weakest piece was evicted.
    Replaced { evicted: Rarity },
    /// The inventory was full and nothing equipped was weaker.
    Discarded,
}

/// Equipped gear, at most [`GEAR_CAPACITY`] pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearInventory {
    slots: Vec<Rarity>,
}

impl GearInventory {
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(GEAR_CAPACITY),
        }
    }

    pub fn equipped(&self) -> &[Rarity] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= GEAR_CAPACITY
    }

    /// Offer a piece of gear.
    ///
    /// Below capacity the piece is always equipped. At capacity it replaces
    /// the first-found lowest-valued piece if strictly better, otherwise it is
    /// discarded and nothing changes.
    pub fn add(&mut self, rarity: Rarity, values: &TierValues) -> GearOutcome {
        let outcome = if !self.is_full() {
            self.slots.push(rarity);
            GearOutcome::Equipped
        } else {
            let value_of = |r: &Rarity| values.get(r).copied().unwrap_or(0);
            // min_by_key keeps the first of equal minimums
            let weakest = self
                .slots
                .iter()
                .enumerate()
                .min_by_key(|(_, r)| value_of(r))
                .map(|(idx, r)| (idx, *r));

            match weakest {
                Some((idx, evicted)) if value_of(&rarity) > value_of(&evicted) => {
                    self.slots.remove(idx);
                    self.slots.push(rarity);
                    GearOutcome::Replaced { evicted }
                }
                _ => GearOutcome::Discarded,
            }
        };

        assert!(
            self.slots.len() <= GEAR_CAPACITY,
            "gear inventory holds {} pieces, capacity is {}",
            self.slots.len(),
            GEAR_CAPACITY
        );
        outcome
    }

    /// Sum of per-piece bonuses, clamped to `cap` when one is configured.
    pub fn bonus(&self, bonuses: &BonusValues, cap: Option<f64>) -> f64 {
        let total: f64 = self
            .slots
            .iter()
            .map(|r| bonuses.get(r).copied().unwrap_or(0.0))
            .sum();
        match cap {
            Some(max) => total.min(max),
            None => total,
        }
    }

    /// Sum of tier values of everything equipped.
    pub fn power(&self, values: &TierValues) -> u32 {
        self.slots
            .iter()
            .map(|r| values.get(r).copied().unwrap_or(0))
            .sum()
    }
}

impl Default for GearInventory {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_rarity() -> impl Strategy<Value = Rarity> {
        prop_oneof![
            Just(Rarity::Common),
            Just(Rarity::Uncommon),
            Just(Rarity::Rare),
            Just(Rarity::Epic),
            Just(Rarity::Legendary),
        ]
    }

    fn values() -> TierValues {
        Rarity::ALL.iter().map(|r| (*r, *r as u32)).collect()
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(drops in proptest::collection::vec(arb_rarity(), 0..64)) {
            let mut gear = GearInventory::new();
            for r in drops {
                gear.add(r, &values());
                prop_assert!(gear.len() <= GEAR_CAPACITY);
            }
        }

        #[test]
        fn prop_power_never_decreases(drops in proptest::collection::vec(arb_rarity(), 0..64)) {
            let mut gear = GearInventory::new();
            let mut last = 0;
            for r in drops {
                gear.add(r, &values());
                let power = gear.power(&values());
                prop_assert!(power >= last, "power dropped from {} to {}", last, power);
                last = power;
            }
        }
    }
}
