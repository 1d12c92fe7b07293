//! Participation policy: which days and which rounds a player shows up for.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    activity_level: f64,
    play_frequency: u32,
    last_play_day: Option<u32>,
    round_counter: u64,
    active_today: bool,
}

impl Schedule {
    pub fn new(activity_level: f64, play_frequency: u32) -> Self {
        Self {
            activity_level,
            play_frequency: play_frequency.max(1),
            last_play_day: None,
            round_counter: 0,
            active_today: false,
        }
    }

    pub fn activity_level(&self) -> f64 {
        self.activity_level
    }

    pub fn play_frequency(&self) -> u32 {
        self.play_frequency
    }

    pub fn last_play_day(&self) -> Option<u32> {
        self.last_play_day
    }

    pub fn active_today(&self) -> bool {
        self.active_today
    }

    /// True on day 1, then whenever at least `play_frequency` days have passed
    /// since the last day played. Marks the day as played when true.
    pub fn should_play_today(&mut self, day: u32) -> bool {
        let due = day <= 1
            || match self.last_play_day {
                Some(last) => day.saturating_sub(last) >= self.play_frequency,
                None => true,
            };
        if due {
            self.last_play_day = Some(day);
        }
        due
    }

    /// Decide once per day whether the player shows up at all.
    pub fn start_day(&mut self, day: u32) {
        self.active_today = self.should_play_today(day);
    }

    /// Rounds between plays on an active day: `floor(1 / activity_level)`.
    /// `None` when the player never plays a round.
    pub fn round_interval(&self) -> Option<u64> {
        if self.activity_level >= 1.0 {
            Some(1)
        } else if self.activity_level <= 0.0 {
            None
        } else {
            Some(((1.0 / self.activity_level).floor() as u64).max(1))
        }
    }

    /// Advance the round counter; true every `round_interval` calls,
    /// starting with the first.
    pub fn should_play_round(&mut self) -> bool {
        match self.round_interval() {
            None => false,
            Some(1) => true,
            Some(interval) => {
                let due = self.round_counter % interval == 0;
                self.round_counter += 1;
                due
            }
        }
    }

    /// Both gates: active today, and this round is one of theirs.
    pub fn is_eligible(&mut self) -> bool {
        self.active_today && self.should_play_round()
    }
}
