//! Elemental debuffs on the boss.

use emberfall_core::boss::{Boss, Debuff};
use emberfall_core::weapon::Element;

/// Chance per elemental hit to apply or refresh a debuff.
pub const DEBUFF_CHANCE: f64 = 0.3;
/// Ticks between periodic damage applications.
pub const DEBUFF_TICK_INTERVAL: u32 = 60;
pub const ICE_SLOW: f32 = 0.5;
/// Dark amplifier: current debuff durations are multiplied by 3/2.
const AMPLIFY_NUM: i32 = 3;
const AMPLIFY_DEN: i32 = 2;
/// Amplified durations never exceed this multiple of the element's base.
pub const MAX_AMPLIFIED_MULTIPLE: i32 = 3;

/// Ticks a fresh debuff of `element` lasts.
pub fn base_duration(element: Element) -> i32 {
    match element {
        Element::Fire => 300,
        Element::Poison => 480,
        Element::Ice => 180,
        Element::Lightning => 120,
        Element::Dark => 240,
    }
}

/// The debuff an elemental hit of `elemental_damage` inflicts.
pub fn debuff_for(element: Element, elemental_damage: u32) -> Debuff {
    let base = Debuff {
        element,
        duration: base_duration(element),
        elapsed: 0,
        tick_damage: None,
        slow: None,
        stun: false,
    };
    match element {
        Element::Fire => Debuff {
            tick_damage: Some(elemental_damage / 10),
            ..base
        },
        Element::Poison => Debuff {
            tick_damage: Some(elemental_damage / 10),
            ..base
        },
        Element::Ice => Debuff {
            slow: Some(ICE_SLOW),
            ..base
        },
        Element::Lightning => Debuff {
            stun: true,
            ..base
        },
        Element::Dark => Debuff {
            tick_damage: Some(elemental_damage / 12),
            ..base
        },
    }
}

/// Apply `debuff`, replacing any debuff of the same element. With
/// `amplify`, every debuff already on the boss first has its remaining
/// duration extended by half, capped at [`MAX_AMPLIFIED_MULTIPLE`] times
/// its base duration.
pub fn apply_debuff(boss: &mut Boss, debuff: Debuff, amplify: bool) {
    if amplify {
        for d in boss.debuffs.iter_mut() {
            let cap = base_duration(d.element) * MAX_AMPLIFIED_MULTIPLE;
            let amplified = d.duration.saturating_mul(AMPLIFY_NUM) / AMPLIFY_DEN;
            d.duration = amplified.min(cap.max(d.duration));
        }
    }
    boss.debuffs.retain(|d| d.element != debuff.element);
    boss.debuffs.push(debuff);
}

/// Age every debuff one tick and apply due periodic damage. Returns the
/// damage dealt per element this tick.
pub fn tick_debuffs(boss: &mut Boss) -> Vec<(Element, u32)> {
    let mut dealt = Vec::new();
    for d in boss.debuffs.iter_mut() {
        d.duration -= 1;
        d.elapsed += 1;
        if let Some(dmg) = d.tick_damage
            && dmg > 0
            && d.elapsed % DEBUFF_TICK_INTERVAL == 0
        {
            dealt.push((d.element, dmg));
        }
    }
    boss.debuffs.retain(|d| !d.is_expired());
    let total: u32 = dealt.iter().map(|(_, dmg)| dmg).sum();
    boss.health = (boss.health - total as f32).max(0.0);
    dealt
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_core::test_helpers::make_boss;

    #[test]
    fn fire_debuff_ticks_every_sixty() {
        let d = debuff_for(Element::Fire, 100);
        assert_eq!(d.tick_damage, Some(10));
        assert_eq!(d.duration, 300);

        let mut boss = make_boss(1);
        apply_debuff(&mut boss, d, false);
        let mut total = 0;
        for tick in 1..=300 {
            let dealt = tick_debuffs(&mut boss);
            if tick % 60 == 0 {
                assert_eq!(dealt, vec![(Element::Fire, 10)], "tick {tick}");
            } else {
                assert!(dealt.is_empty());
            }
            total += dealt.iter().map(|(_, d)| d).sum::<u32>();
        }
        assert_eq!(total, 50);
        assert!(boss.debuffs.is_empty());
        assert_eq!(boss.health, 950.0);
    }

    #[test]
    fn lightning_stuns_briefly() {
        let d = debuff_for(Element::Lightning, 100);
        assert!(d.stun);
        assert_eq!(d.duration, 120);
        assert_eq!(d.tick_damage, None);
    }

    #[test]
    fn dark_tick_damage_uses_twelfths() {
        assert_eq!(debuff_for(Element::Dark, 30).tick_damage, Some(2));
        assert_eq!(debuff_for(Element::Ice, 30).slow, Some(ICE_SLOW));
    }

    #[test]
    fn same_element_refreshes() {
        let mut boss = make_boss(1);
        apply_debuff(&mut boss, debuff_for(Element::Fire, 50), false);
        for _ in 0..100 {
            tick_debuffs(&mut boss);
        }
        apply_debuff(&mut boss, debuff_for(Element::Fire, 50), false);
        assert_eq!(boss.debuffs.len(), 1);
        assert_eq!(boss.debuffs[0].duration, 300);
        assert_eq!(boss.debuffs[0].elapsed, 0);
    }

    #[test]
    fn dark_amplifies_existing_debuffs() {
        let mut boss = make_boss(1);
        apply_debuff(&mut boss, debuff_for(Element::Ice, 10), false);
        apply_debuff(&mut boss, debuff_for(Element::Dark, 60), true);
        assert_eq!(boss.debuff(Element::Ice).unwrap().duration, 270);
        assert_eq!(boss.debuff(Element::Dark).unwrap().duration, 240);
    }

    #[test]
    fn repeated_dark_procs_stay_bounded() {
        let mut boss = make_boss(1);
        apply_debuff(&mut boss, debuff_for(Element::Lightning, 100), false);
        let cap = base_duration(Element::Lightning) * MAX_AMPLIFIED_MULTIPLE;
        for _ in 0..60 {
            for _ in 0..30 {
                tick_debuffs(&mut boss);
            }
            if boss.debuff(Element::Lightning).is_none() {
                apply_debuff(&mut boss, debuff_for(Element::Lightning, 100), false);
            }
            apply_debuff(&mut boss, debuff_for(Element::Dark, 60), true);
            let stun = boss.debuff(Element::Lightning).map(|d| d.duration);
            assert!(stun.is_some_and(|d| d > 0 && d <= cap), "stun {stun:?}");
        }
        assert_eq!(
            boss.debuff(Element::Lightning).map(|d| d.duration),
            Some(cap)
        );
    }

    #[test]
    fn zero_tick_damage_is_silent() {
        let mut boss = make_boss(1);
        apply_debuff(&mut boss, debuff_for(Element::Poison, 5), false);
        for _ in 0..120 {
            assert!(tick_debuffs(&mut boss).is_empty());
        }
    }
}
