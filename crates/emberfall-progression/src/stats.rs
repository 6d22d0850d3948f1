//! Stat allocation, bonus aggregation and derived max health.

use emberfall_core::content::{BonusBundle, Catalog, SkillKind};
use emberfall_core::player::{Player, StatKind, base_max_health};

/// Result of spending a stat point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AllocateOutcome {
    Allocated { kind: StatKind, value: u32 },
    NoPoints,
}

/// Summed bonuses of every owned passive skill.
pub fn passive_bonuses(player: &Player, catalog: &Catalog) -> BonusBundle {
    player
        .available_skills
        .iter()
        .filter_map(|id| catalog.skill(id))
        .filter_map(|skill| match &skill.kind {
            SkillKind::Passive { bonus } => Some(*bonus),
            SkillKind::Active { .. } => None,
        })
        .fold(BonusBundle::default(), |acc, b| acc + b)
}

/// Summed bonuses of every equipped artifact.
pub fn artifact_bonuses(player: &Player, catalog: &Catalog) -> BonusBundle {
    player
        .equipped_artifacts
        .iter()
        .flatten()
        .filter_map(|id| catalog.artifact(id))
        .fold(BonusBundle::default(), |acc, a| acc + a.bonus)
}

pub fn total_bonuses(player: &Player, catalog: &Catalog) -> BonusBundle {
    passive_bonuses(player, catalog) + artifact_bonuses(player, catalog)
}

/// Total regeneration percent of the equipped artifacts.
pub fn artifact_regen_percent(player: &Player, catalog: &Catalog) -> f32 {
    player
        .equipped_artifacts
        .iter()
        .flatten()
        .filter_map(|id| catalog.artifact(id))
        .filter_map(|a| a.regen_percent)
        .sum()
}

/// `floor(base(vitality) * (1 + health_bonus / 100))`.
pub fn derived_max_health(player: &Player, catalog: &Catalog) -> f32 {
    let bonus = total_bonuses(player, catalog).health_bonus;
    (base_max_health(player.stats.vitality) * (1.0 + bonus / 100.0)).floor()
}

/// Recompute `max_health` and scale current health to keep its ratio.
pub fn refresh_max_health(player: &mut Player, catalog: &Catalog) {
    let new_max = derived_max_health(player, catalog);
    let ratio = if player.max_health > 0.0 {
        (player.health / player.max_health).clamp(0.0, 1.0)
    } else {
        1.0
    };
    player.max_health = new_max;
    player.health = (ratio * new_max).floor().min(new_max);
}

/// Spend one stat point on `kind`. Vitality raises max health and current
/// health by the same delta.
pub fn allocate_stat(player: &mut Player, kind: StatKind, catalog: &Catalog) -> AllocateOutcome {
    if player.stat_points == 0 {
        return AllocateOutcome::NoPoints;
    }
    player.stat_points -= 1;
    *player.stats.get_mut(kind) += 1;

    if kind == StatKind::Vitality {
        let new_max = derived_max_health(player, catalog);
        let delta = (new_max - player.max_health).max(0.0);
        player.max_health = new_max;
        player.health = (player.health + delta).min(new_max);
    }

    AllocateOutcome::Allocated {
        kind,
        value: player.stats.get(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_core::player::PlayerClass;
    use emberfall_core::test_helpers::make_player;

    #[test]
    fn allocate_without_points_is_noop() {
        let catalog = Catalog::builtin();
        let mut p = make_player(PlayerClass::Warrior);
        let before = p.clone();
        assert_eq!(
            allocate_stat(&mut p, StatKind::Strength, &catalog),
            AllocateOutcome::NoPoints
        );
        assert_eq!(p, before);
    }

    #[test]
    fn allocate_increments_one_stat() {
        let catalog = Catalog::builtin();
        let mut p = make_player(PlayerClass::Warrior);
        p.stat_points = 2;
        let str_before = p.stats.strength;
        allocate_stat(&mut p, StatKind::Strength, &catalog);
        assert_eq!(p.stats.strength, str_before + 1);
        assert_eq!(p.stat_points, 1);
    }

    #[test]
    fn vitality_raises_max_and_current_by_ten() {
        let catalog = Catalog::builtin();
        let mut p = make_player(PlayerClass::Warrior);
        p.stat_points = 1;
        p.health = 40.0;
        let max_before = p.max_health;
        allocate_stat(&mut p, StatKind::Vitality, &catalog);
        assert_eq!(p.max_health, max_before + 10.0);
        assert_eq!(p.health, 50.0);
    }

    #[test]
    fn passives_sum_only_passive_skills() {
        let catalog = Catalog::builtin();
        let mut p = make_player(PlayerClass::Warrior);
        p.available_skills.insert("toughness".to_string());
        p.available_skills.insert("giant_blood".to_string());
        p.available_skills.insert("iron_skin".to_string());
        let b = passive_bonuses(&p, &catalog);
        assert_eq!(b.health_bonus, 30.0);
        assert_eq!(b.damage_bonus, 0.0);
    }

    #[test]
    fn refresh_preserves_health_ratio() {
        let catalog = Catalog::builtin();
        let mut p = make_player(PlayerClass::Warrior);
        // 110 max at vitality 6
        p.health = 55.0;
        p.available_skills.insert("giant_blood".to_string());
        refresh_max_health(&mut p, &catalog);
        assert_eq!(p.max_health, 132.0);
        assert_eq!(p.health, 66.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn refresh_never_exceeds_max(
                health_frac in 0.0f32..=1.0,
                vitality in 0u32..50,
                artifacts in proptest::collection::vec(0usize..8, 0..3),
            ) {
                let catalog = Catalog::builtin();
                let ids: Vec<String> = catalog.artifacts().map(|a| a.id.clone()).collect();
                let mut p = make_player(PlayerClass::Mage);
                p.stats.vitality = vitality;
                p.max_health = base_max_health(vitality);
                p.health = (p.max_health * health_frac).floor();
                for (slot, idx) in artifacts.iter().enumerate() {
                    p.equipped_artifacts[slot] = Some(ids[*idx % ids.len()].clone());
                }
                let ratio = p.health / p.max_health;
                refresh_max_health(&mut p, &catalog);
                prop_assert!(p.health <= p.max_health);
                prop_assert!(p.health >= 0.0);
                // Floor rounding loses at most one point
                prop_assert!((ratio * p.max_health - p.health) < 1.0 + 1e-3);
            }
        }
    }
}
