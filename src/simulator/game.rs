//! Round and day scheduler.
//!
//! A run is a sequence of days, each split into `rounds_per_day` rounds. Each
//! round bumps the shared turn counter, pays periodic income when due, then
//! gives every eligible player exactly one action in roster order.

use super::action_log::{ActionEvent, ActionLog};
use super::config::{validate_roster, ConfigError, EconomyConfig, PlayerProfile, SimConfig};
use crate::activities::{Contract, Dungeon, Lootbox, TierSelector};
use crate::player::{Balances, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Dungeon,
    Contract,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    config: Arc<EconomyConfig>,
    players: Vec<Player>,
    rounds_per_day: u32,
    current_day: u32,
    current_round: u32,
    total_turns: u64,
    log: ActionLog,
}

impl Game {
    pub fn new(
        profiles: &[PlayerProfile],
        config: impl Into<Arc<EconomyConfig>>,
        rounds_per_day: u32,
    ) -> Result<Self, ConfigError> {
        let config = config.into();
        if rounds_per_day == 0 {
            return Err(ConfigError::ZeroRoundsPerDay);
        }
        validate_roster(profiles)?;
        config.validate()?;

        let players = profiles
            .iter()
            .map(|p| Player::new(p, config.starting_balances))
            .collect();

        Ok(Self {
            config,
            players,
            rounds_per_day,
            current_day: 1,
            current_round: 1,
            total_turns: 0,
            log: ActionLog::new(),
        })
    }

    pub fn from_sim_config(sim: &SimConfig) -> Result<Self, ConfigError> {
        Self::new(&sim.players, sim.economy.clone(), sim.rounds_per_day)
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn rounds_per_day(&self) -> u32 {
        self.rounds_per_day
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_turns(&self) -> u64 {
        self.total_turns
    }

    /// Play `days` full days starting from the current day.
    pub fn run(&mut self, days: u32, rng: &mut impl Rng) {
        if days == 0 {
            return;
        }
        let last_day = self.current_day + days - 1;
        tracing::info!(
            players = self.players.len(),
            days,
            rounds_per_day = self.rounds_per_day,
            "simulation started"
        );

        while self.current_day <= last_day {
            self.start_day();
            while self.current_round <= self.rounds_per_day {
                self.play_round(rng);
            }
            self.current_day += 1;
            self.current_round = 1;
        }

        tracing::info!(
            turns = self.total_turns,
            log_entries = self.log.len(),
            "simulation finished"
        );
    }

    /// Open the current day: decide who plays today and apply the daily
    /// reset when that rule is on.
    pub fn start_day(&mut self) {
        let day = self.current_day;
        self.current_round = 1;
        self.log.set_clock(day, 1, self.total_turns);
        self.log.push(ActionEvent::DayStarted { day });
        tracing::debug!(day, "day started");

        let reset = self.config.reset_resources_daily && day > 1;
        for player in &mut self.players {
            player.schedule.start_day(day);
            if reset {
                player.reset_balances(self.config.starting_balances);
                self.log.push(ActionEvent::ResourcesReset {
                    player: player.name.clone(),
                });
            }
        }
    }

    pub fn play_round(&mut self, rng: &mut impl Rng) {
        self.total_turns += 1;
        self.log
            .set_clock(self.current_day, self.current_round, self.total_turns);

        if self.total_turns % self.config.income.interval_turns == 0 {
            self.grant_periodic_income();
        }

        for player in &mut self.players {
            if !player.schedule.is_eligible() {
                continue;
            }
            Self::play_turn(&self.config, player, &mut self.log, rng);
            player.turns_played += 1;
            player.record_stats(self.total_turns, &self.config);
        }

        self.current_round += 1;
    }

    fn grant_periodic_income(&mut self) {
        let income = self.config.income;
        tracing::debug!(turn = self.total_turns, "periodic income");
        for player in &mut self.players {
            player
                .balances
                .credit(&Balances::new(income.yoku, income.pioneer_points, 0));
            self.log.push(ActionEvent::PeriodicIncome {
                player: player.name.clone(),
                yoku: income.yoku,
                pioneer_points: income.pioneer_points,
            });
        }
    }

    /// One action picked uniformly from what the player can afford, then as
    /// many lootboxes as they can pay for.
    fn play_turn(
        config: &EconomyConfig,
        player: &mut Player,
        log: &mut ActionLog,
        rng: &mut impl Rng,
    ) {
        let contract = Contract::new(config);
        let dungeon_cost = Balances::new(config.costs.dungeon_yoku, 0, 0);

        let mut choices = Vec::with_capacity(2);
        if player.balances.covers(&dungeon_cost) {
            choices.push(Action::Dungeon);
        }
        if contract.can_afford(player) {
            choices.push(Action::Contract);
        }

        match choices.choose(rng).copied() {
            None => {
                log.push(ActionEvent::NoActionAvailable {
                    player: player.name.clone(),
                });
                return;
            }
            Some(Action::Dungeon) => {
                let tier = TierSelector::new(config).select(player.gear_bonus(config), rng);
                Dungeon::new(tier, config).attempt(player, rng, log);
            }
            Some(Action::Contract) => {
                contract.complete(player, rng, log);
            }
        }

        Lootbox::new(config).purchase_while_affordable(player, rng, log);
    }
}
