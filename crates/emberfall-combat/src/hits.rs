//! Projectile collision resolution against the boss and the player.

use rand::Rng;

use emberfall_core::arena::aabb_overlap;
use emberfall_core::boss::Boss;
use emberfall_core::content::Catalog;
use emberfall_core::damage_text::{DamageTarget, DamageText};
use emberfall_core::events::GameEvent;
use emberfall_core::player::Player;
use emberfall_core::projectile::Projectile;
use emberfall_progression::stats::total_bonuses;

use crate::damage::{
    COUNTER_MULTIPLIER, WeaponPolicy, crit_chance, hit_damage, is_invulnerable, mitigate,
};
use crate::debuffs::{DEBUFF_CHANCE, apply_debuff, debuff_for};
use crate::labels::push_label;

fn touches(p: &Projectile, x: f32, y: f32, w: f32, h: f32) -> bool {
    aabb_overlap(p.x, p.y, p.width, p.height, x, y, w, h)
}

fn policy_for(projectile: &Projectile, catalog: &Catalog) -> WeaponPolicy {
    projectile
        .weapon_id
        .as_deref()
        .and_then(|id| catalog.weapon(id))
        .map(WeaponPolicy::of)
        .unwrap_or_default()
}

/// Resolve player projectiles overlapping the boss. Non-piercing
/// projectiles are consumed; piercing ones hit once and fly on.
pub fn resolve_player_hits(
    boss: &mut Boss,
    player: &Player,
    projectiles: &mut Vec<Projectile>,
    texts: &mut Vec<DamageText>,
    catalog: &Catalog,
    cap: usize,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let bonuses = total_bonuses(player, catalog);
    let chance = crit_chance(player, &bonuses);
    let (label_x, label_y) = (boss.x + boss.width / 2.0, boss.y);

    projectiles.retain_mut(|p| {
        if !p.from_player || p.struck || !touches(p, boss.x, boss.y, boss.width, boss.height) {
            return true;
        }
        let policy = policy_for(p, catalog);
        let crit = rng.random_bool(chance);
        let physical = hit_damage(p.damage, policy, crit);
        boss.health = (boss.health - physical as f32).max(0.0);
        push_label(
            texts,
            DamageText::new(label_x, label_y, physical, DamageTarget::Boss).with_crit(crit),
            cap,
        );
        events.push(GameEvent::BossDamaged {
            amount: physical,
            crit,
            element: None,
        });

        if let Some(element) = p.element
            && let Some(elemental) = p.elemental_damage
            && elemental > 0
        {
            boss.health = (boss.health - elemental as f32).max(0.0);
            push_label(
                texts,
                DamageText::new(label_x, label_y - 18.0, elemental, DamageTarget::Boss)
                    .with_element(element),
                cap,
            );
            events.push(GameEvent::BossDamaged {
                amount: elemental,
                crit: false,
                element: Some(element),
            });
            if rng.random_bool(DEBUFF_CHANCE) {
                apply_debuff(
                    boss,
                    debuff_for(element, elemental),
                    policy == WeaponPolicy::Dark,
                );
                events.push(GameEvent::DebuffApplied { element });
            }
        }

        if p.piercing {
            p.struck = true;
            true
        } else {
            false
        }
    });
    events
}

/// Resolve boss projectiles overlapping the player. Skipped entirely while
/// the player is invulnerable.
pub fn resolve_boss_hits(
    player: &mut Player,
    mut boss: Option<&mut Boss>,
    projectiles: &mut Vec<Projectile>,
    texts: &mut Vec<DamageText>,
    catalog: &Catalog,
    cap: usize,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if is_invulnerable(player) {
        return events;
    }
    let class_reduction = catalog
        .class(player.class)
        .map_or(0.0, |c| c.damage_reduction);
    let defense_bonus = total_bonuses(player, catalog).defense_bonus;
    let counter = player.has_effect("counter");

    projectiles.retain(|p| {
        if p.from_player || !touches(p, player.x, player.y, player.width, player.height) {
            return true;
        }
        let taken = mitigate(p.damage, player.stats.defense, class_reduction, defense_bonus);
        player.take_damage(taken as f32);
        push_label(
            texts,
            DamageText::new(player.x + player.width / 2.0, player.y, taken, DamageTarget::Player),
            cap,
        );
        events.push(GameEvent::PlayerDamaged { amount: taken });

        if counter
            && taken > 0
            && let Some(b) = boss.as_deref_mut()
        {
            let reflected = taken * COUNTER_MULTIPLIER;
            b.health = (b.health - reflected as f32).max(0.0);
            push_label(
                texts,
                DamageText::new(b.x + b.width / 2.0, b.y, reflected, DamageTarget::Boss),
                cap,
            );
            events.push(GameEvent::DamageReflected { amount: reflected });
        }
        false
    });
    events
}
