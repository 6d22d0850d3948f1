use serde::{Deserialize, Serialize};

use crate::weapon::Element;

pub const BOSS_WIDTH: f32 = 96.0;
pub const BOSS_HEIGHT: f32 = 112.0;

/// Timed negative status applied to the boss by elemental hits.
///
/// Created or refreshed on an elemental hit, decremented every tick and
/// dropped once `duration` reaches zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debuff {
    pub element: Element,
    /// Remaining ticks.
    pub duration: i32,
    /// Ticks since the debuff was (re)applied; drives the 60-tick damage pulse.
    pub elapsed: u32,
    #[serde(default)]
    pub tick_damage: Option<u32>,
    /// Movement/attack speed multiplier penalty, e.g. 0.5 halves speed.
    #[serde(default)]
    pub slow: Option<f32>,
    #[serde(default)]
    pub stun: bool,
}

impl Debuff {
    pub fn is_expired(&self) -> bool {
        self.duration <= 0
    }
}

/// The wave boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    /// Damage carried by each boss projectile.
    pub damage: u32,
    pub speed: f32,
    /// Ticks between volleys.
    pub attack_interval: u32,
    pub attack_timer: u32,
    /// Rotates through the boss's volley patterns.
    pub pattern_index: u32,
    pub wave: u32,
    pub debuffs: Vec<Debuff>,
}

impl Boss {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_stunned(&self) -> bool {
        self.debuffs.iter().any(|d| d.stun && !d.is_expired())
    }

    /// Combined speed multiplier from all active slow debuffs.
    pub fn slow_multiplier(&self) -> f32 {
        self.debuffs
            .iter()
            .filter(|d| !d.is_expired())
            .filter_map(|d| d.slow)
            .fold(1.0, |acc, s| acc * (1.0 - s).clamp(0.0, 1.0))
    }

    pub fn debuff(&self, element: Element) -> Option<&Debuff> {
        self.debuffs.iter().find(|d| d.element == element)
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_boss;

    #[test]
    fn stun_detection() {
        let mut boss = make_boss(1);
        assert!(!boss.is_stunned());
        boss.debuffs.push(Debuff {
            element: Element::Lightning,
            duration: 120,
            elapsed: 0,
            tick_damage: None,
            slow: None,
            stun: true,
        });
        assert!(boss.is_stunned());
    }

    #[test]
    fn slows_multiply() {
        let mut boss = make_boss(1);
        assert_eq!(boss.slow_multiplier(), 1.0);
        boss.debuffs.push(Debuff {
            element: Element::Ice,
            duration: 10,
            elapsed: 0,
            tick_damage: None,
            slow: Some(0.5),
            stun: false,
        });
        assert!((boss.slow_multiplier() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn expired_debuffs_do_not_stun() {
        let mut boss = make_boss(1);
        boss.debuffs.push(Debuff {
            element: Element::Lightning,
            duration: 0,
            elapsed: 0,
            tick_damage: None,
            slow: None,
            stun: true,
        });
        assert!(!boss.is_stunned());
    }
}
