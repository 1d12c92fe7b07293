use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Every rarity, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Every rarity, highest first. This is the order drop tables are walked in.
    pub const DESCENDING: [Rarity; 5] = [
        Rarity::Legendary,
        Rarity::Epic,
        Rarity::Rare,
        Rarity::Uncommon,
        Rarity::Common,
    ];

    /// Returns the lowercase label used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dungeon difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// 1-based difficulty number.
    pub fn number(&self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.number())
    }
}

/// One value per dungeon tier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub tier1: T,
    pub tier2: T,
    pub tier3: T,
}

impl<T> PerTier<T> {
    pub fn new(tier1: T, tier2: T, tier3: T) -> Self {
        Self {
            tier1,
            tier2,
            tier3,
        }
    }

    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::One => &self.tier1,
            Tier::Two => &self.tier2,
            Tier::Three => &self.tier3,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut T {
        match tier {
            Tier::One => &mut self.tier1,
            Tier::Two => &mut self.tier2,
            Tier::Three => &mut self.tier3,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        [
            (Tier::One, &self.tier1),
            (Tier::Two, &self.tier2),
            (Tier::Three, &self.tier3),
        ]
        .into_iter()
    }
}

impl<T: Clone> PerTier<T> {
    pub fn splat(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value)
    }
}
