//! Damage math. All constants are fixed policy.

use emberfall_core::content::BonusBundle;
use emberfall_core::player::Player;
use emberfall_core::weapon::Weapon;

pub const CRIT_MULTIPLIER: u32 = 2;
/// Base damage multiplier of holy weapons on hit.
pub const HOLY_MULTIPLIER: f64 = 1.5;
/// Outgoing damage multiplier while fury is active.
pub const FURY_MULTIPLIER: f64 = 1.5;
/// Damage added per strength point.
pub const STRENGTH_DAMAGE: u32 = 2;
/// Fraction of incoming damage removed per defense point.
pub const DEFENSE_REDUCTION: f64 = 0.02;
/// Counter reflects this multiple of the damage taken.
pub const COUNTER_MULTIPLIER: u32 = 2;

/// Special behaviour of a weapon, selected by its special descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponPolicy {
    #[default]
    Standard,
    /// A second strike per attack.
    DualWield,
    /// Each projectile carries a random element.
    Chaos,
    /// Half the base damage moves into the elemental pool.
    Hybrid,
    /// ×1.5 base damage on hit.
    Holy,
    /// Debuffs it applies extend every current debuff.
    Dark,
}

impl WeaponPolicy {
    pub fn from_special(special: Option<&str>) -> Self {
        match special {
            Some("dual_wield") => WeaponPolicy::DualWield,
            Some("chaos") => WeaponPolicy::Chaos,
            Some("hybrid") => WeaponPolicy::Hybrid,
            Some("holy") => WeaponPolicy::Holy,
            Some("dark") => WeaponPolicy::Dark,
            _ => WeaponPolicy::Standard,
        }
    }

    pub fn of(weapon: &Weapon) -> Self {
        Self::from_special(weapon.special.as_deref())
    }
}

/// Base damage of one strike before crits and on-hit multipliers:
/// `(weapon + 2 * strength) * (1 + damage_bonus / 100)`, ×1.5 under fury.
pub fn outgoing_damage(player: &Player, weapon: &Weapon, bonuses: &BonusBundle) -> u32 {
    let raw = f64::from(weapon.damage + STRENGTH_DAMAGE * player.stats.strength);
    let mut dmg = raw * (1.0 + f64::from(bonuses.damage_bonus) / 100.0);
    if player.has_effect("fury") {
        dmg *= FURY_MULTIPLIER;
    }
    dmg.max(0.0).floor() as u32
}

/// Critical chance as a probability in `[0, 1]`.
pub fn crit_chance(player: &Player, bonuses: &BonusBundle) -> f64 {
    ((f64::from(player.stats.critical_chance) + f64::from(bonuses.crit_chance_bonus)) / 100.0)
        .clamp(0.0, 1.0)
}

/// Damage a projectile deals on hit.
pub fn hit_damage(base: u32, policy: WeaponPolicy, crit: bool) -> u32 {
    let mut dmg = base;
    if policy == WeaponPolicy::Holy {
        dmg = (f64::from(dmg) * HOLY_MULTIPLIER).floor() as u32;
    }
    if crit {
        dmg *= CRIT_MULTIPLIER;
    }
    dmg
}

/// Incoming damage after defense, class passive and bonus reduction:
/// `raw * (1 - 0.02 * defense) * (1 - class) * (1 - defense_bonus / 100)`,
/// floored, at least 1 for a non-zero hit.
pub fn mitigate(raw: u32, defense: u32, class_reduction: f32, defense_bonus: f32) -> u32 {
    if raw == 0 {
        return 0;
    }
    let stat = (1.0 - f64::from(defense) * DEFENSE_REDUCTION).max(0.0);
    let class = (1.0 - f64::from(class_reduction)).clamp(0.0, 1.0);
    let bonus = (1.0 - f64::from(defense_bonus) / 100.0).clamp(0.0, 1.0);
    let dmg = (f64::from(raw) * stat * class * bonus).floor() as u32;
    if stat * class * bonus <= 0.0 { 0 } else { dmg.max(1) }
}

/// Any active invulnerability source.
pub fn is_invulnerable(player: &Player) -> bool {
    player.is_dodging
        || ["shield", "dash", "stealth", "mana_shield"]
            .iter()
            .any(|tag| player.has_effect(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_core::player::PlayerClass;
    use emberfall_core::test_helpers::{make_player, make_weapon};

    #[test]
    fn policy_from_special() {
        assert_eq!(WeaponPolicy::of(&make_weapon("twin_daggers", 0)), WeaponPolicy::DualWield);
        assert_eq!(WeaponPolicy::of(&make_weapon("chaos_orb", 0)), WeaponPolicy::Chaos);
        assert_eq!(WeaponPolicy::of(&make_weapon("spellblade", 0)), WeaponPolicy::Hybrid);
        assert_eq!(WeaponPolicy::of(&make_weapon("holy_sword", 0)), WeaponPolicy::Holy);
        assert_eq!(WeaponPolicy::of(&make_weapon("void_staff", 0)), WeaponPolicy::Dark);
        assert_eq!(WeaponPolicy::of(&make_weapon("iron_sword", 0)), WeaponPolicy::Standard);
        // Homing is a projectile trait, not a damage policy
        assert_eq!(WeaponPolicy::of(&make_weapon("storm_bow", 0)), WeaponPolicy::Standard);
    }

    #[test]
    fn outgoing_adds_strength_and_bonus() {
        let mut p = make_player(PlayerClass::Warrior);
        p.stats.strength = 5;
        let w = make_weapon("iron_sword", 0);
        assert_eq!(outgoing_damage(&p, &w, &BonusBundle::default()), 30);
        let bonus = BonusBundle {
            damage_bonus: 50.0,
            ..Default::default()
        };
        assert_eq!(outgoing_damage(&p, &w, &bonus), 45);
        p.active_effects.insert("fury".to_string());
        assert_eq!(outgoing_damage(&p, &w, &BonusBundle::default()), 45);
    }

    #[test]
    fn holy_and_crit_stack() {
        assert_eq!(hit_damage(21, WeaponPolicy::Holy, false), 31);
        assert_eq!(hit_damage(21, WeaponPolicy::Holy, true), 62);
        assert_eq!(hit_damage(21, WeaponPolicy::Standard, true), 42);
    }

    #[test]
    fn mitigation_stacks_multiplicatively() {
        // 20 * 0.92 * 0.85 = 15.64
        assert_eq!(mitigate(20, 4, 0.15, 0.0), 15);
        // 100 * 0.9 * 1.0 * 0.8 = 72
        assert_eq!(mitigate(100, 5, 0.0, 20.0), 72);
        assert_eq!(mitigate(1, 10, 0.1, 10.0), 1);
        assert_eq!(mitigate(50, 60, 0.0, 0.0), 0);
        assert_eq!(mitigate(0, 0, 0.0, 0.0), 0);
    }

    #[test]
    fn invulnerability_sources() {
        let mut p = make_player(PlayerClass::Mage);
        assert!(!is_invulnerable(&p));
        p.is_dodging = true;
        assert!(is_invulnerable(&p));
        p.is_dodging = false;
        for tag in ["shield", "dash", "stealth", "mana_shield"] {
            p.active_effects.clear();
            p.active_effects.insert(tag.to_string());
            assert!(is_invulnerable(&p), "{tag}");
        }
        p.active_effects.clear();
        p.active_effects.insert("counter".to_string());
        assert!(!is_invulnerable(&p));
    }

    #[test]
    fn crit_chance_is_clamped() {
        let mut p = make_player(PlayerClass::Rogue);
        p.stats.critical_chance = 90;
        let bonus = BonusBundle {
            crit_chance_bonus: 30.0,
            ..Default::default()
        };
        assert_eq!(crit_chance(&p, &bonus), 1.0);
    }
}
