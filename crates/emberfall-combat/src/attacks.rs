//! Player attacks and active skills, triggered by discrete key presses.

use rand::Rng;
use rand::seq::IndexedRandom;

use emberfall_core::content::{Catalog, SkillKind};
use emberfall_core::events::GameEvent;
use emberfall_core::input::TickInput;
use emberfall_core::player::{Facing, Player, SKILL_SLOTS};
use emberfall_core::projectile::Projectile;
use emberfall_core::weapon::{Element, ProjectileShape, Weapon};
use emberfall_progression::stats::total_bonuses;

use crate::damage::{WeaponPolicy, outgoing_damage};
use crate::physics::DASH_SPEED;

/// Ticks a melee slash stays active.
pub const SLASH_LIFETIME: u32 = 6;
/// Extra ticks on the dual-wield follow-up slash.
const SECOND_STRIKE_DELAY: u32 = 4;
const SLASH_DRIFT: f32 = 2.0;
/// Angle between projectiles of a multi-shot volley.
const VOLLEY_SPREAD: f32 = 0.12;

fn shape_size(shape: ProjectileShape) -> (f32, f32) {
    match shape {
        ProjectileShape::Arrow => (20.0, 6.0),
        ProjectileShape::Orb => (14.0, 14.0),
        ProjectileShape::Bolt => (18.0, 8.0),
        ProjectileShape::Shard => (12.0, 12.0),
        ProjectileShape::Slash => (24.0, 24.0),
    }
}

struct Strike {
    damage: u32,
    element: Option<Element>,
    elemental_damage: Option<u32>,
}

/// Split the base damage according to the weapon policy.
fn strike_for(weapon: &Weapon, policy: WeaponPolicy, base: u32, rng: &mut impl Rng) -> Strike {
    match policy {
        WeaponPolicy::Hybrid => {
            let physical = base / 2;
            Strike {
                damage: physical,
                element: weapon.element,
                elemental_damage: Some(weapon.elemental_damage.unwrap_or(0) + (base - physical)),
            }
        },
        WeaponPolicy::Chaos => Strike {
            damage: base,
            element: Element::ALL.choose(rng).copied().or(weapon.element),
            elemental_damage: weapon.elemental_damage,
        },
        _ => Strike {
            damage: base,
            element: weapon.element,
            elemental_damage: weapon.elemental_damage,
        },
    }
}

fn slash(
    player: &Player,
    weapon: &Weapon,
    strike: Strike,
    lifetime: u32,
    now_ms: f64,
) -> Projectile {
    let reach = weapon.range as f32;
    let x = match player.facing {
        Facing::Right => player.x + player.width,
        Facing::Left => player.x - reach,
    };
    Projectile {
        x,
        y: player.y,
        vx: player.facing.sign() * SLASH_DRIFT,
        vy: 0.0,
        width: reach,
        height: player.height,
        damage: strike.damage,
        from_player: true,
        element: strike.element,
        elemental_damage: strike.elemental_damage,
        piercing: false,
        tracking: false,
        lifetime: Some(lifetime),
        created_at_ms: now_ms,
        shape: ProjectileShape::Slash,
        weapon_id: Some(weapon.id.clone()),
        struck: false,
    }
}

/// Spawn the projectiles for one attack if the attack key was pressed and
/// the weapon is off cooldown. Returns the spawned projectiles.
pub fn player_attack(
    player: &mut Player,
    input: &TickInput,
    catalog: &Catalog,
    now_ms: f64,
    rng: &mut impl Rng,
) -> Vec<Projectile> {
    if !input.attack || player.attack_cooldown > 0 {
        return Vec::new();
    }
    let weapon = player.weapon.clone();
    let policy = WeaponPolicy::of(&weapon);
    let bonuses = total_bonuses(player, catalog);
    let base = outgoing_damage(player, &weapon, &bonuses);
    player.attack_cooldown = weapon.attack_speed.max(1);
    player.is_attacking = true;

    let strikes = if policy == WeaponPolicy::DualWield { 2 } else { 1 };
    let mut spawned = Vec::new();
    for strike_idx in 0..strikes {
        match &weapon.projectile {
            None => {
                let strike = strike_for(&weapon, policy, base, rng);
                let lifetime = SLASH_LIFETIME + strike_idx * SECOND_STRIKE_DELAY;
                spawned.push(slash(player, &weapon, strike, lifetime, now_ms));
            },
            Some(spec) => {
                let (w, h) = shape_size(spec.shape);
                let (cx, cy) = player.center();
                let heading = match player.facing {
                    Facing::Right => 0.0f32,
                    Facing::Left => std::f32::consts::PI,
                };
                let half = (spec.count.max(1) as f32 - 1.0) / 2.0;
                for i in 0..spec.count.max(1) {
                    let strike = strike_for(&weapon, policy, base, rng);
                    let angle = heading + (i as f32 - half) * VOLLEY_SPREAD;
                    spawned.push(Projectile {
                        x: cx - w / 2.0,
                        y: cy - h / 2.0,
                        vx: angle.cos() * spec.speed,
                        vy: angle.sin() * spec.speed,
                        width: w,
                        height: h,
                        damage: strike.damage,
                        from_player: true,
                        element: strike.element,
                        elemental_damage: strike.elemental_damage,
                        piercing: spec.piercing,
                        tracking: weapon.has_special("homing"),
                        lifetime: Some(spec.lifetime),
                        created_at_ms: now_ms,
                        shape: spec.shape,
                        weapon_id: Some(weapon.id.clone()),
                        struck: false,
                    });
                }
            },
        }
    }
    spawned
}

/// Activate every pressed skill slot holding an active skill that is off
/// cooldown.
pub fn activate_skills(
    player: &mut Player,
    input: &TickInput,
    catalog: &Catalog,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for slot in 0..SKILL_SLOTS {
        if !input.skills[slot] || player.skill_cooldowns[slot] > 0 {
            continue;
        }
        let Some(id) = player.equipped_skills[slot].clone() else {
            continue;
        };
        let Some(SkillKind::Active {
            effect,
            cooldown,
            duration_ms,
        }) = catalog.skill(&id).map(|s| &s.kind)
        else {
            continue;
        };
        player.active_effects.insert(effect.clone());
        player.skill_cooldowns[slot] = *cooldown;
        if effect == "dash" {
            player.vx = player.facing.sign() * DASH_SPEED;
        }
        tracing::debug!(skill = %id, effect = %effect, "skill activated");
        events.push(GameEvent::SkillActivated {
            skill_id: id,
            effect: effect.clone(),
            duration_ms: *duration_ms,
        });
    }
    events
}
