//! Weapon upgrade curve and evolution.

use emberfall_core::content::Catalog;
use emberfall_core::weapon::Weapon;

/// Highest reachable upgrade level.
pub const MAX_UPGRADE_LEVEL: u32 = 10;
/// Upgrade level at which an evolution becomes available.
pub const EVOLUTION_LEVEL: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeOutcome {
    Upgraded(Weapon),
    NoOp(UpgradeRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeRejection {
    MaxLevel,
    UnknownWeapon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvolveOutcome {
    Evolved(Weapon),
    NoOp(EvolveRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveRejection {
    AlreadyEvolved,
    BelowThreshold { level: u32 },
    NoEvolution,
    UnknownWeapon,
}

/// Scale a level-0 weapon to `level`.
///
/// damage and elemental damage: `x * (1 + 0.1 * level)`, floored.
/// attack speed: `x * 0.95^level`, floored, at least 1.
/// range: `x * (1 + 0.05 * level)`, floored.
pub fn scale_weapon(base: &Weapon, level: u32) -> Weapon {
    let grow = |x: u32, per_twenty: u32| {
        (u64::from(x) * u64::from(20 + per_twenty * level) / 20) as u32
    };
    let cooldown =
        (f64::from(base.attack_speed) * 0.95f64.powi(level as i32) + 1e-9).floor() as u32;
    Weapon {
        damage: grow(base.damage, 2),
        elemental_damage: base.elemental_damage.map(|e| grow(e, 2)),
        attack_speed: cooldown.max(1),
        range: grow(base.range, 1),
        upgrade_level: level,
        ..base.clone()
    }
}

/// Raise `weapon` one level, rescaling from its catalog definition. The id
/// never changes.
pub fn upgrade_weapon(weapon: &Weapon, catalog: &Catalog) -> UpgradeOutcome {
    if weapon.upgrade_level >= MAX_UPGRADE_LEVEL {
        return UpgradeOutcome::NoOp(UpgradeRejection::MaxLevel);
    }
    let Some(base) = catalog.weapon(&weapon.id) else {
        return UpgradeOutcome::NoOp(UpgradeRejection::UnknownWeapon);
    };
    UpgradeOutcome::Upgraded(scale_weapon(base, weapon.upgrade_level + 1))
}

/// Replace `weapon` with its evolved form when it has reached
/// [`EVOLUTION_LEVEL`]. The evolved weapon starts again at level 0.
pub fn evolve_weapon(weapon: &Weapon, catalog: &Catalog) -> EvolveOutcome {
    if weapon.is_evolved {
        return EvolveOutcome::NoOp(EvolveRejection::AlreadyEvolved);
    }
    let Some(target) = catalog.evolution(&weapon.id) else {
        return EvolveOutcome::NoOp(EvolveRejection::NoEvolution);
    };
    if weapon.upgrade_level < EVOLUTION_LEVEL {
        return EvolveOutcome::NoOp(EvolveRejection::BelowThreshold {
            level: weapon.upgrade_level,
        });
    }
    match catalog.weapon(target) {
        Some(evolved) => EvolveOutcome::Evolved(Weapon {
            upgrade_level: 0,
            is_evolved: true,
            ..evolved.clone()
        }),
        None => EvolveOutcome::NoOp(EvolveRejection::UnknownWeapon),
    }
}
