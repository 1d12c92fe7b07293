use crate::items::drops::{roll_chance, DropTable};
use crate::items::types::Tier;
use crate::player::{Balances, Player};
use crate::simulator::action_log::{ActionEvent, ActionLog, GearSource, MaterialSource};
use crate::simulator::config::EconomyConfig;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DungeonOutcome {
    /// Not enough yoku; nothing changed.
    Skipped,
    Failed,
    Cleared,
}

/// One dungeon tier's rules, built per attempt.
pub struct Dungeon<'a> {
    tier: Tier,
    config: &'a EconomyConfig,
    loot: DropTable,
    materials: DropTable,
}

impl<'a> Dungeon<'a> {
    pub fn new(tier: Tier, config: &'a EconomyConfig) -> Self {
        Self {
            tier,
            config,
            loot: DropTable::loot(config.dungeon_loot_weights.get(tier)),
            materials: DropTable::material(config.dungeon_material_weights.get(tier)),
        }
    }

    pub fn base_chance(&self) -> f64 {
        *self.config.dungeon_win_chances.get(self.tier)
    }

    /// Base chance plus gear bonus, clamped to the configured cap.
    pub fn win_chance(&self, gear_bonus: f64) -> f64 {
        let chance = self.base_chance() + gear_bonus;
        match self.config.win_chance_cap {
            Some(cap) => chance.min(cap),
            None => chance,
        }
    }

    pub fn cost(&self) -> Balances {
        Balances::new(self.config.costs.dungeon_yoku, 0, 0)
    }

    pub fn can_afford(&self, player: &Player) -> bool {
        player.balances.covers(&self.cost())
    }

    pub fn pet_name(&self) -> String {
        format!("Pet Tier {}", self.tier.number())
    }

    /// Spend the entry cost and roll for the clear. The attempt counter moves
    /// even on failure; rewards only come with a clear.
    pub fn attempt(
        &self,
        player: &mut Player,
        rng: &mut impl Rng,
        log: &mut ActionLog,
    ) -> DungeonOutcome {
        if !self.can_afford(player) {
            log.push(ActionEvent::DungeonSkipped {
                player: player.name.clone(),
                yoku: player.balances.yoku,
            });
            return DungeonOutcome::Skipped;
        }

        player.balances.debit(&self.cost());
        *player.dungeon_attempts.get_mut(self.tier) += 1;

        let gear_bonus = player.gear_bonus(self.config);
        let win_chance = self.win_chance(gear_bonus);
        let success = rng.gen::<f64>() < win_chance;
        log.push(ActionEvent::DungeonAttempted {
            player: player.name.clone(),
            tier: self.tier,
            base_chance: self.base_chance(),
            gear_bonus,
            win_chance,
            success,
        });

        if !success {
            return DungeonOutcome::Failed;
        }

        *player.dungeon_completions.get_mut(self.tier) += 1;
        self.grant_rewards(player, rng, log);
        DungeonOutcome::Cleared
    }

    fn grant_rewards(&self, player: &mut Player, rng: &mut impl Rng, log: &mut ActionLog) {
        let loot = self.loot.roll(rng);
        let outcome = player.add_gear(loot, self.config);
        log.push(ActionEvent::GearReceived {
            player: player.name.clone(),
            rarity: loot,
            source: GearSource::Dungeon(self.tier),
            outcome,
        });

        let material = self.materials.roll(rng);
        player.add_material(material);
        log.push(ActionEvent::MaterialReceived {
            player: player.name.clone(),
            rarity: material,
            source: MaterialSource::Dungeon(self.tier),
        });

        if roll_chance(*self.config.dungeon_pet_chances.get(self.tier), rng) {
            let pet = self.pet_name();
            player.pets.push(pet.clone());
            log.push(ActionEvent::PetReceived {
                player: player.name.clone(),
                pet,
            });
        }

        let costs = &self.config.costs;
        player.balances.credit(&Balances::new(
            0,
            costs.dungeon_pioneer_reward,
            costs.dungeon_skull_token_reward,
        ));
        log.push(ActionEvent::DungeonRewards {
            player: player.name.clone(),
            skull_tokens: costs.dungeon_skull_token_reward,
            pioneer_points: costs.dungeon_pioneer_reward,
        });
    }
}
