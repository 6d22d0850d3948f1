//! Loadout bookkeeping by composite weapon key, plus skill and artifact
//! slots.

use emberfall_core::content::{Catalog, SkillKind};
use emberfall_core::player::{ARTIFACT_SLOTS, Player, SKILL_SLOTS};
use emberfall_core::weapon::{Weapon, WeaponKey};

use crate::stats::refresh_max_health;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipOutcome {
    Equipped,
    NoOp(EquipRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipRejection {
    NotOwned,
    UnknownId,
    BadSlot,
    /// Passive skills apply while owned and never occupy a slot.
    PassiveSkill,
    AlreadyEquipped,
}

/// Remove the first inventory weapon matching `key`.
pub fn take_from_inventory(inventory: &mut Vec<Weapon>, key: &WeaponKey) -> Option<Weapon> {
    let idx = inventory.iter().position(|w| w.matches(key))?;
    Some(inventory.remove(idx))
}

pub fn owns_weapon(player: &Player, key: &WeaponKey) -> bool {
    player.weapon.matches(key) || player.inventory.iter().any(|w| w.matches(key))
}

/// Swap the equipped weapon for an inventory weapon; the previous weapon
/// goes back to the inventory.
pub fn equip_weapon(player: &mut Player, key: &WeaponKey) -> EquipOutcome {
    if player.weapon.matches(key) {
        return EquipOutcome::NoOp(EquipRejection::AlreadyEquipped);
    }
    let Some(weapon) = take_from_inventory(&mut player.inventory, key) else {
        return EquipOutcome::NoOp(EquipRejection::NotOwned);
    };
    let previous = std::mem::replace(&mut player.weapon, weapon);
    player.inventory.push(previous);
    player.attack_cooldown = 0;
    EquipOutcome::Equipped
}

/// Put an owned active skill into `slot`, clearing any other slot that held
/// it.
pub fn equip_skill(
    player: &mut Player,
    skill_id: &str,
    slot: usize,
    catalog: &Catalog,
) -> EquipOutcome {
    if slot >= SKILL_SLOTS {
        return EquipOutcome::NoOp(EquipRejection::BadSlot);
    }
    let Some(skill) = catalog.skill(skill_id) else {
        return EquipOutcome::NoOp(EquipRejection::UnknownId);
    };
    if !player.available_skills.contains(skill_id) {
        return EquipOutcome::NoOp(EquipRejection::NotOwned);
    }
    if skill.is_passive() {
        return EquipOutcome::NoOp(EquipRejection::PassiveSkill);
    }
    for s in player.equipped_skills.iter_mut() {
        if s.as_deref() == Some(skill_id) {
            *s = None;
        }
    }
    player.equipped_skills[slot] = Some(skill_id.to_string());
    player.skill_cooldowns[slot] = 0;
    EquipOutcome::Equipped
}

pub fn unequip_skill(player: &mut Player, slot: usize) -> EquipOutcome {
    match player.equipped_skills.get_mut(slot) {
        Some(s) => {
            *s = None;
            EquipOutcome::Equipped
        },
        None => EquipOutcome::NoOp(EquipRejection::BadSlot),
    }
}

/// Equip an owned artifact into `slot`. Any other slot holding the same
/// artifact is cleared first; max health is recomputed keeping the
/// current health ratio.
pub fn equip_artifact(
    player: &mut Player,
    artifact_id: &str,
    slot: usize,
    catalog: &Catalog,
) -> EquipOutcome {
    if slot >= ARTIFACT_SLOTS {
        return EquipOutcome::NoOp(EquipRejection::BadSlot);
    }
    if catalog.artifact(artifact_id).is_none() {
        return EquipOutcome::NoOp(EquipRejection::UnknownId);
    }
    if !player.artifacts.iter().any(|a| a == artifact_id) {
        return EquipOutcome::NoOp(EquipRejection::NotOwned);
    }
    for s in player.equipped_artifacts.iter_mut() {
        if s.as_deref() == Some(artifact_id) {
            *s = None;
        }
    }
    player.equipped_artifacts[slot] = Some(artifact_id.to_string());
    refresh_max_health(player, catalog);
    EquipOutcome::Equipped
}

pub fn unequip_artifact(player: &mut Player, slot: usize, catalog: &Catalog) -> EquipOutcome {
    match player.equipped_artifacts.get_mut(slot) {
        Some(s) => {
            *s = None;
            refresh_max_health(player, catalog);
            EquipOutcome::Equipped
        },
        None => EquipOutcome::NoOp(EquipRejection::BadSlot),
    }
}

/// Add a skill to the owned set. Active skills go into the first free slot;
/// passive skills take effect immediately. Returns false for unknown or
/// already owned skills.
pub fn grant_skill(player: &mut Player, skill_id: &str, catalog: &Catalog) -> bool {
    let Some(skill) = catalog.skill(skill_id) else {
        return false;
    };
    if !player.available_skills.insert(skill_id.to_string()) {
        return false;
    }
    match skill.kind {
        SkillKind::Passive { .. } => refresh_max_health(player, catalog),
        SkillKind::Active { .. } => {
            if let Some(free) = player.equipped_skills.iter().position(Option::is_none) {
                player.equipped_skills[free] = Some(skill_id.to_string());
            }
        },
    }
    true
}

/// Add an artifact; it is equipped into the first free slot if any.
pub fn grant_artifact(player: &mut Player, artifact_id: &str, catalog: &Catalog) -> bool {
    if catalog.artifact(artifact_id).is_none() {
        return false;
    }
    player.artifacts.push(artifact_id.to_string());
    let already_equipped = player
        .equipped_artifacts
        .iter()
        .any(|s| s.as_deref() == Some(artifact_id));
    if !already_equipped
        && let Some(free) = player.equipped_artifacts.iter().position(Option::is_none)
    {
        equip_artifact(player, artifact_id, free, catalog);
    }
    true
}

/// Add a catalog weapon (level 0) to the inventory, honouring class
/// restrictions.
pub fn grant_weapon(player: &mut Player, weapon_id: &str, catalog: &Catalog) -> bool {
    if !catalog.can_obtain(weapon_id, player.class) {
        return false;
    }
    match catalog.weapon(weapon_id) {
        Some(w) => {
            player.inventory.push(w.clone());
            true
        },
        None => false,
    }
}
