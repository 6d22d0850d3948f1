use serde::{Deserialize, Serialize};

use crate::weapon::{Element, ProjectileShape};

/// A moving hitbox owned by either the player or the boss.
///
/// Removed on wall contact (unless piercing), lifetime expiry, or after
/// hitting a valid target (unless piercing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub damage: u32,
    pub from_player: bool,
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub elemental_damage: Option<u32>,
    #[serde(default)]
    pub piercing: bool,
    #[serde(default)]
    pub tracking: bool,
    /// Lifetime in ticks; `None` lives until it hits something.
    #[serde(default)]
    pub lifetime: Option<u32>,
    /// Simulation clock (ms) at spawn.
    pub created_at_ms: f64,
    pub shape: ProjectileShape,
    #[serde(default)]
    pub weapon_id: Option<String>,
    /// Set once a piercing projectile has damaged the boss.
    #[serde(default)]
    pub struck: bool,
}

impl Projectile {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Whole ticks elapsed since spawn at the given tick length.
    pub fn elapsed_ticks(&self, now_ms: f64, tick_ms: f64) -> u64 {
        if tick_ms <= 0.0 || now_ms <= self.created_at_ms {
            return 0;
        }
        ((now_ms - self.created_at_ms) / tick_ms).floor() as u64
    }

    pub fn is_expired(&self, now_ms: f64, tick_ms: f64) -> bool {
        self.lifetime
            .is_some_and(|life| self.elapsed_ticks(now_ms, tick_ms) > u64::from(life))
    }
}
