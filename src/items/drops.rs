//! Weighted rarity resolution.
//!
//! Every drop in the economy goes through [`DropTable`]: a set of rarity
//! weights walked highest rarity first, with a per-call-site fallback when a
//! draw runs off the end of the table.

use super::types::Rarity;
use rand::Rng;
use std::collections::BTreeMap;

/// Raw rarity weights as they appear in configuration. Not necessarily
/// normalized.
pub type Weights = BTreeMap<Rarity, f64>;

/// Fallback for material rolls that exhaust the table.
pub const MATERIAL_FALLBACK: Rarity = Rarity::Rare;

/// Fallback for loot rolls that exhaust the table.
pub const LOOT_FALLBACK: Rarity = Rarity::Uncommon;

/// Normalized, ordered weights plus the rarity returned on exhaustion.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    entries: Vec<(Rarity, f64)>,
    fallback: Rarity,
}

impl DropTable {
    /// Build a table from raw weights, walking rarities highest first.
    ///
    /// Weights are normalized to sum to 1. A table whose weights sum to zero
    /// becomes uniform over its rarities.
    pub fn from_weights(weights: &Weights, fallback: Rarity) -> Self {
        let ordered = Rarity::DESCENDING
            .iter()
            .filter_map(|r| weights.get(r).map(|w| (*r, *w)))
            .collect();
        Self::with_order(ordered, fallback)
    }

    /// Build a table that is walked in exactly the given order.
    fn with_order(ordered: Vec<(Rarity, f64)>, fallback: Rarity) -> Self {
        Self {
            entries: normalize(ordered),
            fallback,
        }
    }

    pub fn material(weights: &Weights) -> Self {
        Self::from_weights(weights, MATERIAL_FALLBACK)
    }

    pub fn loot(weights: &Weights) -> Self {
        Self::from_weights(weights, LOOT_FALLBACK)
    }

    pub fn entries(&self) -> &[(Rarity, f64)] {
        &self.entries
    }

    pub fn fallback(&self) -> Rarity {
        self.fallback
    }

    /// Resolve a uniform draw in [0, 1) to a rarity.
    ///
    /// Returns the first rarity whose cumulative weight exceeds `draw`, or the
    /// fallback if floating-point slack leaves the draw past the end.
    pub fn resolve(&self, draw: f64) -> Rarity {
        let mut cumulative = 0.0;
        for &(rarity, weight) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return rarity;
            }
        }
        self.fallback
    }

    pub fn roll(&self, rng: &mut impl Rng) -> Rarity {
        self.resolve(rng.gen::<f64>())
    }
}

fn normalize(entries: Vec<(Rarity, f64)>) -> Vec<(Rarity, f64)> {
    if entries.is_empty() {
        return entries;
    }
    let total: f64 = entries.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        let uniform = 1.0 / entries.len() as f64;
        return entries.into_iter().map(|(r, _)| (r, uniform)).collect();
    }
    entries.into_iter().map(|(r, w)| (r, w / total)).collect()
}

/// Single yes/no roll, used for pet drops.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn weights(pairs: &[(Rarity, f64)]) -> Weights {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_walks_highest_rarity_first() {
        let table = DropTable::material(&weights(&[(Rarity::Rare, 0.89), (Rarity::Epic, 0.11)]));
        let order: Vec<Rarity> = table.entries().iter().map(|(r, _)| *r).collect();
        assert_eq!(order, vec![Rarity::Epic, Rarity::Rare]);
    }

    #[test]
    fn test_draw_zero_returns_first_entry() {
        let table = DropTable::material(&weights(&[(Rarity::Rare, 0.89), (Rarity::Epic, 0.11)]));
        assert_eq!(table.resolve(0.0), Rarity::Epic);
    }

    #[test]
    fn test_draw_near_one_returns_last_entry() {
        let table = DropTable::loot(&weights(&[
            (Rarity::Epic, 0.2),
            (Rarity::Rare, 0.5),
            (Rarity::Uncommon, 0.3),
        ]));
        assert_eq!(table.resolve(0.999_999), Rarity::Uncommon);
    }

    #[test]
    fn test_cumulative_boundaries() {
        let table = DropTable::loot(&weights(&[
            (Rarity::Epic, 0.2),
            (Rarity::Rare, 0.5),
            (Rarity::Uncommon, 0.3),
        ]));
        assert_eq!(table.resolve(0.19), Rarity::Epic);
        assert_eq!(table.resolve(0.21), Rarity::Rare);
        assert_eq!(table.resolve(0.69), Rarity::Rare);
        assert_eq!(table.resolve(0.71), Rarity::Uncommon);
    }

    #[test]
    fn test_unnormalized_weights_are_scaled() {
        let table = DropTable::loot(&weights(&[(Rarity::Epic, 2.0), (Rarity::Rare, 6.0)]));
        let (_, epic) = table.entries()[0];
        let (_, rare) = table.entries()[1];
        assert!((epic - 0.25).abs() < 1e-12);
        assert!((rare - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_sum_becomes_uniform() {
        let table = DropTable::loot(&weights(&[
            (Rarity::Epic, 0.0),
            (Rarity::Rare, 0.0),
            (Rarity::Uncommon, 0.0),
            (Rarity::Common, 0.0),
        ]));
        for (_, w) in table.entries() {
            assert!((w - 0.25).abs() < 1e-12);
        }
        assert_eq!(table.resolve(0.3), Rarity::Rare);
    }

    #[test]
    fn test_draw_past_end_uses_fallback() {
        let loot = DropTable::loot(&weights(&[(Rarity::Epic, 1.0)]));
        assert_eq!(loot.resolve(1.0), LOOT_FALLBACK);
        let material = DropTable::material(&weights(&[(Rarity::Epic, 1.0)]));
        assert_eq!(material.resolve(1.5), MATERIAL_FALLBACK);
    }

    #[test]
    fn test_empty_table_always_falls_back() {
        let table = DropTable::loot(&Weights::new());
        assert!(table.entries().is_empty());
        assert_eq!(table.resolve(0.0), Rarity::Uncommon);
    }

    #[test]
    fn test_explicit_order_is_respected() {
        let table = DropTable::with_order(
            vec![(Rarity::Rare, 0.5), (Rarity::Epic, 0.5)],
            MATERIAL_FALLBACK,
        );
        assert_eq!(table.resolve(0.0), Rarity::Rare);
        assert_eq!(table.resolve(0.75), Rarity::Epic);
    }

    #[test]
    fn test_roll_distribution_tracks_weights() {
        let table = DropTable::material(&weights(&[(Rarity::Epic, 0.1), (Rarity::Rare, 0.9)]));
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let epics = (0..10_000)
            .filter(|_| table.roll(&mut rng) == Rarity::Epic)
            .count();
        assert!(epics > 800 && epics < 1200, "Expected ~10% epic, got {epics}");
    }

    #[test]
    fn test_roll_chance_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!((0..100).all(|_| !roll_chance(0.0, &mut rng)));
        assert!((0..100).all(|_| roll_chance(1.0, &mut rng)));
    }
}
