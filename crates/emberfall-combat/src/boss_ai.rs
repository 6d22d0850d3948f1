//! Boss spawning and behaviour.

use std::f32::consts::TAU;

use rand::{Rng, RngCore};

use emberfall_core::arena::Arena;
use emberfall_core::boss::{BOSS_HEIGHT, BOSS_WIDTH, Boss};
use emberfall_core::content::Difficulty;
use emberfall_core::player::Player;
use emberfall_core::projectile::Projectile;
use emberfall_core::weapon::ProjectileShape;

use crate::arena_gen::boss_spawn;

pub const BOSS_BASE_HEALTH: u64 = 500;
/// Boss projectile lifetime in ticks.
pub const BOSS_SHOT_LIFETIME: u32 = 240;
pub const BOSS_SHOT_SIZE: f32 = 14.0;
/// Horizontal distance at which the boss stops chasing.
const CHASE_DEADZONE: f32 = 40.0;
/// Angle between neighbouring projectiles of a spread volley.
const SPREAD_STEP: f32 = 0.25;

/// Moves the boss and decides what it fires. Treated by the pipeline as a
/// black box: it receives the boss, reads the player and arena, and returns
/// any new projectiles.
pub trait BossBehavior: Send + Sync {
    fn update(
        &self,
        boss: &mut Boss,
        player: &Player,
        arena: &Arena,
        now_ms: f64,
        rng: &mut dyn RngCore,
    ) -> Vec<Projectile>;
}

/// Volley shapes the shipped boss cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Volley {
    Aimed,
    Spread(u32),
    Ring(u32),
}

/// Which volley the boss of `wave` fires for its `pattern_index`-th attack.
pub fn volley_for(wave: u32, pattern_index: u32) -> Volley {
    let spread = Volley::Spread((3 + wave / 10).min(7));
    let ring = Volley::Ring((8 + wave / 10).min(16));
    match wave {
        0..3 => Volley::Aimed,
        3..6 => [Volley::Aimed, spread][(pattern_index % 2) as usize],
        _ => [Volley::Aimed, spread, ring][(pattern_index % 3) as usize],
    }
}

/// Chases the player horizontally and fires wave-dependent volleys.
#[derive(Debug, Clone, Default)]
pub struct WaveBoss;

impl WaveBoss {
    fn shot(boss: &Boss, angle: f32, speed: f32, now_ms: f64) -> Projectile {
        let (cx, cy) = boss.center();
        Projectile {
            x: cx - BOSS_SHOT_SIZE / 2.0,
            y: cy - BOSS_SHOT_SIZE / 2.0,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            width: BOSS_SHOT_SIZE,
            height: BOSS_SHOT_SIZE,
            damage: boss.damage,
            from_player: false,
            element: None,
            elemental_damage: None,
            piercing: false,
            tracking: false,
            lifetime: Some(BOSS_SHOT_LIFETIME),
            created_at_ms: now_ms,
            shape: ProjectileShape::Shard,
            weapon_id: None,
            struck: false,
        }
    }
}

pub fn boss_shot_speed(wave: u32) -> f32 {
    (4.5 + wave as f32 * 0.05).min(8.0)
}

impl BossBehavior for WaveBoss {
    fn update(
        &self,
        boss: &mut Boss,
        player: &Player,
        arena: &Arena,
        now_ms: f64,
        rng: &mut dyn RngCore,
    ) -> Vec<Projectile> {
        if boss.is_stunned() {
            boss.vx = 0.0;
            return Vec::new();
        }

        let (bx, by) = boss.center();
        let (px, py) = player.center();
        let dx = px - bx;
        boss.vx = if dx.abs() < CHASE_DEADZONE {
            0.0
        } else {
            dx.signum() * boss.speed * boss.slow_multiplier()
        };
        boss.x = (boss.x + boss.vx).clamp(0.0, (arena.width - boss.width).max(0.0));

        boss.attack_timer += 1;
        if boss.attack_timer < boss.attack_interval {
            return Vec::new();
        }
        boss.attack_timer = 0;
        let volley = volley_for(boss.wave, boss.pattern_index);
        boss.pattern_index = boss.pattern_index.wrapping_add(1);

        let aim = (py - by).atan2(dx);
        let speed = boss_shot_speed(boss.wave);
        match volley {
            Volley::Aimed => vec![Self::shot(boss, aim, speed, now_ms)],
            Volley::Spread(n) => {
                let half = (n as f32 - 1.0) / 2.0;
                (0..n)
                    .map(|i| Self::shot(boss, aim + (i as f32 - half) * SPREAD_STEP, speed, now_ms))
                    .collect()
            },
            Volley::Ring(n) => {
                let step = TAU / n as f32;
                let offset = rng.random_range(0.0..step);
                (0..n)
                    .map(|i| Self::shot(boss, offset + i as f32 * step, speed * 0.8, now_ms))
                    .collect()
            },
        }
    }
}

/// Boss for `wave`, scaled by wave and difficulty.
///
/// health: `500 * (1 + 0.25 * (wave - 1)) * difficulty`
/// damage: `(10 + 2 * wave) * difficulty`
pub fn spawn_boss(wave: u32, difficulty: Difficulty, arena: &Arena) -> Boss {
    // (1 + 0.25 * (wave - 1)) == (3 + wave) / 4
    let quarters = 3 + u64::from(wave.max(1));
    let health_percent = u64::from(difficulty.boss_health_percent());
    let health = (BOSS_BASE_HEALTH * quarters * health_percent / 400) as f32;
    let damage_percent = u64::from(difficulty.boss_damage_percent());
    let damage = ((10 + 2 * u64::from(wave)) * damage_percent / 100) as u32;
    let (x, y) = boss_spawn(arena, BOSS_WIDTH, BOSS_HEIGHT);
    Boss {
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        width: BOSS_WIDTH,
        height: BOSS_HEIGHT,
        health,
        max_health: health,
        damage,
        speed: (1.5 + wave as f32 * 0.05).min(4.0),
        attack_interval: 120u32.saturating_sub(2 * wave).max(40),
        attack_timer: 0,
        pattern_index: 0,
        wave,
        debuffs: Vec::new(),
    }
}
