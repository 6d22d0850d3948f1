//! Weapon fusion.
//!
//! Recipes are looked up by unordered id pair. The result carries
//! `floor(0.7 * floor((level_a + level_b) / 2))` upgrade levels and is
//! rescaled from its catalog definition with the normal upgrade curve.

use emberfall_core::content::Catalog;
use emberfall_core::player::Player;
use emberfall_core::weapon::{Weapon, WeaponKey};

use crate::inventory::take_from_inventory;
use crate::upgrade::scale_weapon;

#[derive(Debug, Clone, PartialEq)]
pub enum FusionOutcome {
    Fused(Weapon),
    Rejected(FusionRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionRejection {
    IdenticalIds,
    /// Two evolved weapons with no recipe naming that exact pair.
    BothEvolved,
    NoRecipe,
    UnknownResult,
    /// The player does not hold one of the operands.
    NotOwned,
    /// The result is reserved for another class.
    ClassRestricted,
}

/// Upgrade level carried into a fusion result.
pub fn carried_level(level_a: u32, level_b: u32) -> u32 {
    let avg = (level_a + level_b) / 2;
    avg * 7 / 10
}

/// Fuse two weapon instances. Ignores ownership and class restrictions.
pub fn fuse(a: &Weapon, b: &Weapon, catalog: &Catalog) -> FusionOutcome {
    if a.id == b.id {
        return FusionOutcome::Rejected(FusionRejection::IdenticalIds);
    }
    let Some(recipe) = catalog.fusion_recipe(&a.id, &b.id) else {
        let rejection = if a.is_evolved && b.is_evolved {
            FusionRejection::BothEvolved
        } else {
            FusionRejection::NoRecipe
        };
        return FusionOutcome::Rejected(rejection);
    };
    let Some(base) = catalog.weapon(&recipe.result) else {
        return FusionOutcome::Rejected(FusionRejection::UnknownResult);
    };
    let level = carried_level(a.upgrade_level, b.upgrade_level);
    FusionOutcome::Fused(scale_weapon(base, level))
}

/// Fuse two weapons the player holds, consuming one copy of each.
///
/// If one operand is the equipped weapon the result takes its place and
/// the other operand leaves the inventory. If neither is equipped, both
/// leave the inventory, the current weapon moves to the inventory and the
/// result is equipped.
pub fn fuse_owned(
    player: &mut Player,
    key_a: &WeaponKey,
    key_b: &WeaponKey,
    catalog: &Catalog,
) -> FusionOutcome {
    if key_a.id == key_b.id {
        return FusionOutcome::Rejected(FusionRejection::IdenticalIds);
    }
    let find = |key: &WeaponKey| -> Option<Weapon> {
        if player.weapon.matches(key) {
            Some(player.weapon.clone())
        } else {
            player.inventory.iter().find(|w| w.matches(key)).cloned()
        }
    };
    let (Some(a), Some(b)) = (find(key_a), find(key_b)) else {
        return FusionOutcome::Rejected(FusionRejection::NotOwned);
    };

    let result = match fuse(&a, &b, catalog) {
        FusionOutcome::Fused(w) => w,
        rejected @ FusionOutcome::Rejected(_) => return rejected,
    };
    if !catalog.can_obtain(&result.id, player.class) {
        return FusionOutcome::Rejected(FusionRejection::ClassRestricted);
    }

    let a_equipped = player.weapon.matches(key_a);
    let b_equipped = player.weapon.matches(key_b);
    match (a_equipped, b_equipped) {
        (true, _) => {
            take_from_inventory(&mut player.inventory, key_b);
            player.weapon = result.clone();
        },
        (false, true) => {
            take_from_inventory(&mut player.inventory, key_a);
            player.weapon = result.clone();
        },
        (false, false) => {
            take_from_inventory(&mut player.inventory, key_a);
            take_from_inventory(&mut player.inventory, key_b);
            let previous = std::mem::replace(&mut player.weapon, result.clone());
            player.inventory.push(previous);
        },
    }
    player.attack_cooldown = 0;
    tracing::debug!(
        a = %key_a,
        b = %key_b,
        result = %result.key(),
        "weapons fused"
    );
    FusionOutcome::Fused(result)
}
