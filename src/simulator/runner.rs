//! Simulation entry point.

use super::config::{ConfigError, SimConfig};
use super::game::Game;
use super::report::GameReport;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A finished run: the final game state and its report.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub game: Game,
    pub report: GameReport,
}

/// Validate `config`, play every day and build the report.
///
/// With a seed the run is fully reproducible; without one the RNG is seeded
/// from entropy.
pub fn run_simulation(config: &SimConfig) -> Result<SimOutcome, ConfigError> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    run_simulation_with_rng(config, &mut rng)
}

/// Same as [`run_simulation`] but draws from a caller-supplied RNG and
/// ignores `config.seed`.
pub fn run_simulation_with_rng(
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<SimOutcome, ConfigError> {
    config.validate()?;

    let mut game = Game::from_sim_config(config)?;
    game.run(config.days, rng);
    let report = GameReport::from_game(&game);

    Ok(SimOutcome { game, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::PlayerProfile;

    fn seeded(seed: u64) -> SimConfig {
        SimConfig {
            days: 3,
            rounds_per_day: 5,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let a = run_simulation(&seeded(7)).unwrap();
        let b = run_simulation(&seeded(7)).unwrap();
        assert_eq!(a.game, b.game);
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            days: 0,
            ..seeded(1)
        };
        assert_eq!(run_simulation(&config).unwrap_err(), ConfigError::ZeroDays);

        let config = SimConfig {
            players: vec![PlayerProfile::new("A"), PlayerProfile::new("A")],
            ..seeded(1)
        };
        assert!(matches!(
            run_simulation(&config),
            Err(ConfigError::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn test_outcome_covers_all_days() {
        let outcome = run_simulation(&seeded(3)).unwrap();
        assert_eq!(outcome.report.days_played, 3);
        assert_eq!(outcome.game.total_turns(), 15);
    }

    #[test]
    fn test_external_rng_ignores_seed() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let a = run_simulation_with_rng(&seeded(1), &mut rng).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let b = run_simulation_with_rng(&seeded(2), &mut rng).unwrap();
        assert_eq!(a.game.log(), b.game.log());
    }
}
