use crate::core::constants::{STARTING_PIONEER_POINTS, STARTING_SKULL_TOKENS, STARTING_YOKU};
use serde::{Deserialize, Serialize};

/// The three currencies a player holds.
///
/// Balances are unsigned; every debit must be preceded by [`Balances::covers`]
/// and a debit that would go negative is a bug, not a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Fast currency, spent on dungeon attempts.
    pub yoku: u32,
    /// Slow currency, spent on contracts.
    pub pioneer_points: u32,
    /// Pity currency, earned from dungeon wins and spent on lootboxes.
    pub skull_tokens: u32,
}

impl Balances {
    pub const ZERO: Balances = Balances {
        yoku: 0,
        pioneer_points: 0,
        skull_tokens: 0,
    };

    pub fn new(yoku: u32, pioneer_points: u32, skull_tokens: u32) -> Self {
        Self {
            yoku,
            pioneer_points,
            skull_tokens,
        }
    }

    pub fn covers(&self, cost: &Balances) -> bool {
        self.yoku >= cost.yoku
            && self.pioneer_points >= cost.pioneer_points
            && self.skull_tokens >= cost.skull_tokens
    }

    /// Panics if `cost` is not covered.
    pub fn debit(&mut self, cost: &Balances) {
        assert!(
            self.covers(cost),
            "debit of {cost:?} would overdraw balances {self:?}"
        );
        self.yoku -= cost.yoku;
        self.pioneer_points -= cost.pioneer_points;
        self.skull_tokens -= cost.skull_tokens;
    }

    pub fn credit(&mut self, amount: &Balances) {
        self.yoku += amount.yoku;
        self.pioneer_points += amount.pioneer_points;
        self.skull_tokens += amount.skull_tokens;
    }
}

impl Default for Balances {
    fn default() -> Self {
        Self {
            yoku: STARTING_YOKU,
            pioneer_points: STARTING_PIONEER_POINTS,
            skull_tokens: STARTING_SKULL_TOKENS,
        }
    }
}
