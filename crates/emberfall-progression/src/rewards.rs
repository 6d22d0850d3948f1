//! Reward offers made while a level-up or milestone bonus is pending.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use emberfall_core::content::Catalog;
use emberfall_core::player::Player;
use emberfall_core::state::Reward;

use crate::inventory::{grant_artifact, grant_skill, grant_weapon};
use crate::upgrade::{MAX_UPGRADE_LEVEL, UpgradeOutcome, upgrade_weapon};

/// Options shown per pending reward.
pub const OFFER_COUNT: usize = 3;
/// Stat points granted by the stat-point reward.
pub const REWARD_STAT_POINTS: u32 = 3;

/// Roll up to [`OFFER_COUNT`] distinct-kind rewards the player can use.
pub fn roll_offers(player: &Player, catalog: &Catalog, rng: &mut impl Rng) -> Vec<Reward> {
    let mut pool = vec![Reward::StatPoints(REWARD_STAT_POINTS)];

    let skills: Vec<&str> = catalog
        .skills()
        .filter(|s| !player.available_skills.contains(&s.id))
        .map(|s| s.id.as_str())
        .collect();
    if let Some(id) = skills.choose(rng) {
        pool.push(Reward::Skill((*id).to_string()));
    }

    let weapons: Vec<&str> = catalog
        .weapons()
        .filter(|w| !w.is_evolved && !catalog.is_fusion_result(&w.id))
        .filter(|w| w.id != player.weapon.id && catalog.can_obtain(&w.id, player.class))
        .map(|w| w.id.as_str())
        .collect();
    if let Some(id) = weapons.choose(rng) {
        pool.push(Reward::Weapon((*id).to_string()));
    }

    let artifacts: Vec<&str> = catalog
        .artifacts()
        .filter(|a| !player.artifacts.contains(&a.id))
        .map(|a| a.id.as_str())
        .collect();
    if let Some(id) = artifacts.choose(rng) {
        pool.push(Reward::Artifact((*id).to_string()));
    }

    if player.weapon.upgrade_level < MAX_UPGRADE_LEVEL
        && catalog.weapon(&player.weapon.id).is_some()
    {
        pool.push(Reward::UpgradeWeapon);
    }
    if player.health < player.max_health {
        pool.push(Reward::FullHeal);
    }

    pool.shuffle(rng);
    pool.truncate(OFFER_COUNT);
    pool
}

/// Apply one reward. Returns false when it had no effect.
pub fn apply_reward(player: &mut Player, reward: &Reward, catalog: &Catalog) -> bool {
    match reward {
        Reward::StatPoints(n) => {
            player.stat_points += n;
            true
        },
        Reward::Skill(id) => grant_skill(player, id, catalog),
        Reward::Weapon(id) => grant_weapon(player, id, catalog),
        Reward::Artifact(id) => grant_artifact(player, id, catalog),
        Reward::UpgradeWeapon => match upgrade_weapon(&player.weapon, catalog) {
            UpgradeOutcome::Upgraded(w) => {
                player.weapon = w;
                true
            },
            UpgradeOutcome::NoOp(_) => false,
        },
        Reward::FullHeal => {
            player.health = player.max_health;
            true
        },
    }
}
