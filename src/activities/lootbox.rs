use crate::core::constants::LOOTBOX_PET_NAME;
use crate::items::drops::{roll_chance, DropTable};
use crate::player::{Balances, Player};
use crate::simulator::action_log::{ActionEvent, ActionLog, GearSource};
use crate::simulator::config::EconomyConfig;
use rand::Rng;

/// Pity lootbox bought with skull tokens and materials.
pub struct Lootbox<'a> {
    config: &'a EconomyConfig,
    loot: DropTable,
}

impl<'a> Lootbox<'a> {
    pub fn new(config: &'a EconomyConfig) -> Self {
        Self {
            config,
            loot: DropTable::loot(&config.lootbox_loot_weights),
        }
    }

    fn token_cost(&self) -> Balances {
        Balances::new(0, 0, self.config.lootbox_cost.skull_tokens)
    }

    /// The purchase gate. Uses the same amounts that [`Lootbox::purchase`] debits.
    pub fn can_afford(&self, player: &Player) -> bool {
        player.balances.covers(&self.token_cost())
            && player.has_materials(&self.config.lootbox_cost.materials)
    }

    /// Pay for and open one lootbox. Returns false without touching the
    /// player when they cannot pay.
    pub fn purchase(&self, player: &mut Player, rng: &mut impl Rng, log: &mut ActionLog) -> bool {
        if !self.can_afford(player) {
            log.push(ActionEvent::LootboxSkipped {
                player: player.name.clone(),
            });
            return false;
        }

        player.balances.debit(&self.token_cost());
        player.debit_materials(&self.config.lootbox_cost.materials);
        log.push(ActionEvent::LootboxPurchased {
            player: player.name.clone(),
        });
        self.open(player, rng, log);
        true
    }

    /// Roll the contents. Payment is the caller's job.
    pub fn open(&self, player: &mut Player, rng: &mut impl Rng, log: &mut ActionLog) {
        let rarity = self.loot.roll(rng);
        let outcome = player.add_gear(rarity, self.config);
        log.push(ActionEvent::GearReceived {
            player: player.name.clone(),
            rarity,
            source: GearSource::Lootbox,
            outcome,
        });

        if roll_chance(self.config.lootbox_pet_chance, rng) {
            player.pets.push(LOOTBOX_PET_NAME.to_string());
            log.push(ActionEvent::PetReceived {
                player: player.name.clone(),
                pet: LOOTBOX_PET_NAME.to_string(),
            });
        }
    }

    fn is_free(&self) -> bool {
        let cost = &self.config.lootbox_cost;
        cost.skull_tokens == 0 && cost.materials.values().all(|n| *n == 0)
    }

    /// Keep buying while the player can pay. Returns how many were opened.
    pub fn purchase_while_affordable(
        &self,
        player: &mut Player,
        rng: &mut impl Rng,
        log: &mut ActionLog,
    ) -> u32 {
        let mut opened = 0;
        while self.can_afford(player) {
            self.purchase(player, rng, log);
            opened += 1;
            if self.is_free() {
                break;
            }
        }
        opened
    }
}
