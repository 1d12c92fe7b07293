use crate::items::drops::DropTable;
use crate::player::{Balances, Player};
use crate::simulator::action_log::{ActionEvent, ActionLog, MaterialSource};
use crate::simulator::config::EconomyConfig;
use rand::Rng;

/// Trade pioneer points for yoku and one material.
pub struct Contract<'a> {
    config: &'a EconomyConfig,
    materials: DropTable,
}

impl<'a> Contract<'a> {
    pub fn new(config: &'a EconomyConfig) -> Self {
        Self {
            config,
            materials: DropTable::material(&config.contract_material_weights),
        }
    }

    pub fn cost(&self) -> Balances {
        Balances::new(0, self.config.costs.contract_pioneer_points, 0)
    }

    pub fn can_afford(&self, player: &Player) -> bool {
        player.balances.covers(&self.cost())
    }

    /// Complete one contract. Returns false (and leaves the player untouched)
    /// when they lack pioneer points.
    pub fn complete(&self, player: &mut Player, rng: &mut impl Rng, log: &mut ActionLog) -> bool {
        if !self.can_afford(player) {
            log.push(ActionEvent::ContractSkipped {
                player: player.name.clone(),
                pioneer_points: player.balances.pioneer_points,
            });
            return false;
        }

        let reward = self.config.costs.contract_yoku_reward;
        player.balances.debit(&self.cost());
        player.balances.credit(&Balances::new(reward, 0, 0));
        log.push(ActionEvent::ContractCompleted {
            player: player.name.clone(),
            yoku_earned: reward,
        });

        let rarity = self.materials.roll(rng);
        player.add_material(rarity);
        log.push(ActionEvent::MaterialReceived {
            player: player.name.clone(),
            rarity,
            source: MaterialSource::Contract,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::Rarity;
    use crate::simulator::config::PlayerProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player_with(pioneer_points: u32) -> Player {
        Player::new(
            &PlayerProfile::new("Tester"),
            Balances::new(0, pioneer_points, 0),
        )
    }

    #[test]
    fn test_exact_cost_spends_to_zero() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = ActionLog::new();
        let mut player = player_with(3);

        assert!(Contract::new(&config).complete(&mut player, &mut rng, &mut log));
        assert_eq!(player.balances.pioneer_points, 0);
        assert_eq!(player.balances.yoku, 1);
        let gained: u32 = player.materials.values().sum();
        assert_eq!(gained, 1);
        assert!(player.material(Rarity::Rare) + player.material(Rarity::Epic) == 1);
    }

    #[test]
    fn test_insufficient_points_is_noop() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = ActionLog::new();
        let mut player = player_with(2);
        let before = player.clone();

        assert!(!Contract::new(&config).complete(&mut player, &mut rng, &mut log));
        assert_eq!(player, before);
        assert!(matches!(
            log.entries()[0].event,
            ActionEvent::ContractSkipped {
                pioneer_points: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_contract_only_drops_configured_materials() {
        let config = EconomyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut log = ActionLog::new();
        let mut player = player_with(300);
        let contract = Contract::new(&config);
        for _ in 0..100 {
            contract.complete(&mut player, &mut rng, &mut log);
        }
        assert_eq!(player.material(Rarity::Rare) + player.material(Rarity::Epic), 100);
        assert_eq!(player.balances.yoku, 100);
    }
}
