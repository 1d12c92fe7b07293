//! End-of-run report.

use super::action_log::ActionEvent;
use super::game::Game;
use crate::core::constants::GEAR_CAPACITY;
use crate::items::types::{Rarity, Tier};
use crate::player::{Balances, Player};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierReport {
    pub tier: u8,
    pub attempts: u32,
    pub completions: u32,
    pub completion_rate: f64,
}

/// Final state of one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    pub name: String,
    pub turns_played: u32,
    pub balances: Balances,
    pub gear: Vec<Rarity>,
    pub gear_power: u32,
    pub gear_bonus: f64,
    pub materials: BTreeMap<Rarity, u32>,
    pub pets: Vec<String>,
    pub lootboxes_opened: usize,
    pub tiers: Vec<TierReport>,
    pub overall_completion_rate: f64,
}

impl PlayerReport {
    fn from_player(player: &Player, game: &Game) -> Self {
        let config = game.config();
        let lootboxes_opened = game
            .log()
            .for_player(&player.name)
            .filter(|e| matches!(e.event, ActionEvent::LootboxPurchased { .. }))
            .count();

        Self {
            name: player.name.clone(),
            turns_played: player.turns_played,
            balances: player.balances,
            gear: player.gear.equipped().to_vec(),
            gear_power: player.gear_power(config),
            gear_bonus: player.gear_bonus(config),
            materials: player.materials.clone(),
            pets: player.pets.clone(),
            lootboxes_opened,
            tiers: Tier::ALL
                .iter()
                .map(|tier| TierReport {
                    tier: tier.number(),
                    attempts: *player.dungeon_attempts.get(*tier),
                    completions: *player.dungeon_completions.get(*tier),
                    completion_rate: player.win_rate(*tier),
                })
                .collect(),
            overall_completion_rate: player.overall_completion_rate(),
        }
    }
}

/// Aggregated results of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub days_played: u32,
    pub rounds_per_day: u32,
    pub total_turns: u64,
    pub log_entries: usize,
    pub avg_gear_power: f64,
    pub avg_completion_rate: f64,
    pub total_pets: usize,
    pub players: Vec<PlayerReport>,
}

impl GameReport {
    pub fn from_game(game: &Game) -> Self {
        let players: Vec<PlayerReport> = game
            .players()
            .iter()
            .map(|p| PlayerReport::from_player(p, game))
            .collect();
        let n = players.len().max(1) as f64;

        Self {
            days_played: game.current_day().saturating_sub(1),
            rounds_per_day: game.rounds_per_day(),
            total_turns: game.total_turns(),
            log_entries: game.log().len(),
            avg_gear_power: players.iter().map(|p| p.gear_power as f64).sum::<f64>() / n,
            avg_completion_rate: players
                .iter()
                .map(|p| p.overall_completion_rate)
                .sum::<f64>()
                / n,
            total_pets: players.iter().map(|p| p.pets.len()).sum(),
            players,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    ECONOMY SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Days: {}, Rounds/Day: {}, Turns: {}, Log Entries: {}\n\n",
            self.days_played, self.rounds_per_day, self.total_turns, self.log_entries
        ));

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Gear Power:        {:.1}\n",
            self.avg_gear_power
        ));
        report.push_str(&format!(
            "  Avg Completion Rate:   {:.2}%\n",
            self.avg_completion_rate
        ));
        report.push_str(&format!("  Pets Collected:        {}\n\n", self.total_pets));

        for player in &self.players {
            report.push_str(&format!(
                "── {} ──────────────────────────────────────────\n",
                player.name
            ));
            report.push_str(&format!("  Turns Played:  {}\n", player.turns_played));
            report.push_str(&format!(
                "  Balances:      {} yoku, {} pioneer points, {} skull tokens\n",
                player.balances.yoku, player.balances.pioneer_points, player.balances.skull_tokens
            ));

            let gear = if player.gear.is_empty() {
                "None".to_string()
            } else {
                player
                    .gear
                    .iter()
                    .map(|r| r.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            report.push_str(&format!(
                "  Gear ({}/{}):    {} (power {}, bonus {:.2}%)\n",
                player.gear.len(),
                GEAR_CAPACITY,
                gear,
                player.gear_power,
                player.gear_bonus * 100.0
            ));

            report.push_str("  Materials:\n");
            for (rarity, count) in player.materials.iter().filter(|(_, c)| **c > 0) {
                report.push_str(&format!("    {:<10} {}\n", rarity.name(), count));
            }

            let pets = if player.pets.is_empty() {
                "None".to_string()
            } else {
                player.pets.join(", ")
            };
            report.push_str(&format!("  Pets:          {}\n", pets));
            report.push_str(&format!("  Lootboxes:     {}\n", player.lootboxes_opened));

            report.push_str("  Tier   Attempts   Completions   Rate\n");
            for tier in &player.tiers {
                report.push_str(&format!(
                    "  {:4}   {:8}   {:11}   {:.2}%\n",
                    tier.tier, tier.attempts, tier.completions, tier.completion_rate
                ));
            }
            report.push_str(&format!(
                "  Overall Completion Rate: {:.2}%\n\n",
                player.overall_completion_rate
            ));
        }

        report.push_str("═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::{EconomyConfig, PlayerProfile};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn finished_game() -> Game {
        let mut game = Game::new(
            &[PlayerProfile::new("Ann"), PlayerProfile::new("Bob")],
            EconomyConfig::default(),
            10,
        )
        .unwrap();
        game.run(3, &mut ChaCha8Rng::seed_from_u64(42));
        game
    }

    #[test]
    fn test_report_matches_game_state() {
        let game = finished_game();
        let report = GameReport::from_game(&game);

        assert_eq!(report.days_played, 3);
        assert_eq!(report.total_turns, 30);
        assert_eq!(report.players.len(), 2);

        let ann = &report.players[0];
        let player = game.player("Ann").unwrap();
        assert_eq!(ann.gear, player.gear.equipped());
        assert_eq!(ann.turns_played, 30);
        let attempts: u32 = ann.tiers.iter().map(|t| t.attempts).sum();
        assert_eq!(attempts, player.total_attempts());
    }

    #[test]
    fn test_text_report_names_players() {
        let text = GameReport::from_game(&finished_game()).to_text();
        assert!(text.contains("ECONOMY SIMULATION REPORT"));
        assert!(text.contains("── Ann"));
        assert!(text.contains("── Bob"));
        assert!(text.contains("Overall Completion Rate"));
    }

    #[test]
    fn test_json_report_parses() {
        let json = GameReport::from_game(&finished_game()).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_turns"], 30);
        assert_eq!(value["players"][0]["name"], "Ann");
        assert!(value["players"][0]["materials"]["rare"].is_number());
    }
}
