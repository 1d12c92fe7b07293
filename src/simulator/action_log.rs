//! Ordered record of everything that happened during a run.
//!
//! Activities append [`ActionEvent`]s; the log stamps each with the current
//! day, round and turn. Consumers read and filter it but never mutate it.

use crate::items::gear::GearOutcome;
use crate::items::types::{Rarity, Tier};
use serde::Serialize;
use std::fmt;

/// Where a material came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaterialSource {
    Contract,
    Dungeon(Tier),
}

/// Where a piece of gear came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GearSource {
    Dungeon(Tier),
    Lootbox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ActionEvent {
    // ── Scheduling ─────────────────────────────────────────────
    DayStarted {
        day: u32,
    },
    ResourcesReset {
        player: String,
    },
    PeriodicIncome {
        player: String,
        yoku: u32,
        pioneer_points: u32,
    },
    /// Eligible, but could afford neither a dungeon nor a contract.
    NoActionAvailable {
        player: String,
    },

    // ── Contracts ──────────────────────────────────────────────
    ContractCompleted {
        player: String,
        yoku_earned: u32,
    },
    ContractSkipped {
        player: String,
        pioneer_points: u32,
    },

    // ── Dungeons ───────────────────────────────────────────────
    DungeonSkipped {
        player: String,
        yoku: u32,
    },
    DungeonAttempted {
        player: String,
        tier: Tier,
        base_chance: f64,
        gear_bonus: f64,
        win_chance: f64,
        success: bool,
    },
    DungeonRewards {
        player: String,
        skull_tokens: u32,
        pioneer_points: u32,
    },

    // ── Rewards ────────────────────────────────────────────────
    MaterialReceived {
        player: String,
        rarity: Rarity,
        source: MaterialSource,
    },
    GearReceived {
        player: String,
        rarity: Rarity,
        source: GearSource,
        outcome: GearOutcome,
    },
    PetReceived {
        player: String,
        pet: String,
    },

    // ── Lootboxes ──────────────────────────────────────────────
    LootboxPurchased {
        player: String,
    },
    LootboxSkipped {
        player: String,
    },
}

impl ActionEvent {
    /// Name of the player the event concerns, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            ActionEvent::DayStarted { .. } => None,
            ActionEvent::ResourcesReset { player }
            | ActionEvent::PeriodicIncome { player, .. }
            | ActionEvent::NoActionAvailable { player }
            | ActionEvent::ContractCompleted { player, .. }
            | ActionEvent::ContractSkipped { player, .. }
            | ActionEvent::DungeonSkipped { player, .. }
            | ActionEvent::DungeonAttempted { player, .. }
            | ActionEvent::DungeonRewards { player, .. }
            | ActionEvent::MaterialReceived { player, .. }
            | ActionEvent::GearReceived { player, .. }
            | ActionEvent::PetReceived { player, .. }
            | ActionEvent::LootboxPurchased { player }
            | ActionEvent::LootboxSkipped { player } => Some(player),
        }
    }
}

impl fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionEvent::DayStarted { day } => write!(f, "Starting Day {day}"),
            ActionEvent::ResourcesReset { player } => {
                write!(f, "{player}'s daily resources were reset")
            }
            ActionEvent::PeriodicIncome {
                player,
                yoku,
                pioneer_points,
            } => write!(
                f,
                "{player} received {yoku} yoku and {pioneer_points} pioneer points"
            ),
            ActionEvent::NoActionAvailable { player } => {
                write!(f, "{player} has no actions to take this turn")
            }
            ActionEvent::ContractCompleted {
                player,
                yoku_earned,
            } => write!(f, "{player} completed a contract and earned {yoku_earned} yoku"),
            ActionEvent::ContractSkipped {
                player,
                pioneer_points,
            } => write!(
                f,
                "{player} does not have enough pioneer points to complete a contract ({pioneer_points} held)"
            ),
            ActionEvent::DungeonSkipped { player, yoku } => write!(
                f,
                "{player} does not have enough yoku to enter the dungeon ({yoku} held)"
            ),
            ActionEvent::DungeonAttempted {
                player,
                tier,
                base_chance,
                gear_bonus,
                win_chance,
                success,
            } => {
                let verdict = if *success {
                    "successfully completed"
                } else {
                    "failed to complete"
                };
                write!(
                    f,
                    "{player} {verdict} {tier} dungeon (chance {:.2}%: base {:.2}%, gear bonus {:.2}%)",
                    win_chance * 100.0,
                    base_chance * 100.0,
                    gear_bonus * 100.0
                )
            }
            ActionEvent::DungeonRewards {
                player,
                skull_tokens,
                pioneer_points,
            } => write!(
                f,
                "{player} received {skull_tokens} skull token(s) and {pioneer_points} pioneer point(s)"
            ),
            ActionEvent::MaterialReceived {
                player,
                rarity,
                source,
            } => {
                let from = match source {
                    MaterialSource::Contract => "the contract".to_string(),
                    MaterialSource::Dungeon(tier) => format!("the {tier} dungeon"),
                };
                write!(f, "{player} received {rarity} material from {from}")
            }
            ActionEvent::GearReceived {
                player,
                rarity,
                source,
                outcome,
            } => {
                let from = match source {
                    GearSource::Dungeon(tier) => format!("{tier} dungeon"),
                    GearSource::Lootbox => "lootbox".to_string(),
                };
                match outcome {
                    GearOutcome::Equipped => {
                        write!(f, "{player} equipped {rarity} gear from {from}")
                    }
                    GearOutcome::Replaced { evicted } => write!(
                        f,
                        "{player} replaced {evicted} gear with {rarity} gear from {from}"
                    ),
                    GearOutcome::Discarded => write!(
                        f,
                        "{player}'s gear slots are full; {rarity} gear from {from} was discarded"
                    ),
                }
            }
            ActionEvent::PetReceived { player, pet } => {
                write!(f, "{player} received a pet: {pet}")
            }
            ActionEvent::LootboxPurchased { player } => write!(f, "{player} purchased a lootbox"),
            ActionEvent::LootboxSkipped { player } => write!(
                f,
                "{player} does not have enough resources to purchase a lootbox"
            ),
        }
    }
}

/// An event stamped with when it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub day: u32,
    pub round: u32,
    pub turn: u64,
    pub event: ActionEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Day {}, Round {}] {}", self.day, self.round, self.event)
    }
}

/// Append-only action log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
    #[serde(skip)]
    day: u32,
    #[serde(skip)]
    round: u32,
    #[serde(skip)]
    turn: u64,
}

impl ActionLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            day: 1,
            round: 1,
            turn: 0,
        }
    }

    /// Set the stamp applied to subsequent entries.
    pub fn set_clock(&mut self, day: u32, round: u32, turn: u64) {
        self.day = day;
        self.round = round;
        self.turn = turn;
    }

    pub fn push(&mut self, event: ActionEvent) {
        let entry = LogEntry {
            day: self.day,
            round: self.round,
            turn: self.turn,
            event,
        };
        tracing::trace!(day = entry.day, round = entry.round, "{}", entry.event);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Human-readable lines, in order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|e| e.to_string())
    }

    pub fn for_player<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.event.player() == Some(name))
    }

    /// Entries whose rendered line contains `needle` (case-insensitive).
    pub fn matching(&self, needle: &str) -> Vec<&LogEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.to_string().to_lowercase().contains(&needle))
            .collect()
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}
