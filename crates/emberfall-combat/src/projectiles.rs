use emberfall_core::arena::{Arena, aabb_overlap};
use emberfall_core::projectile::Projectile;

/// Per-tick blend toward the homing direction.
pub const HOMING_BLEND: f32 = 0.1;
/// Speed multiplier on boss projectiles while the player's slow effect is
/// active.
pub const SLOW_FIELD_MULTIPLIER: f32 = 0.5;
/// Projectiles this far outside the arena are dropped.
const OUT_OF_BOUNDS_MARGIN: f32 = 200.0;

/// Move every projectile by its velocity. Boss projectiles move at
/// [`SLOW_FIELD_MULTIPLIER`] speed when `slow_field` is set.
pub fn move_projectiles(projectiles: &mut [Projectile], slow_field: bool) {
    for p in projectiles.iter_mut() {
        let scale = if slow_field && !p.from_player {
            SLOW_FIELD_MULTIPLIER
        } else {
            1.0
        };
        p.x += p.vx * scale;
        p.y += p.vy * scale;
    }
}

/// Steer tracking player projectiles toward `target` by exponential
/// smoothing of the velocity. Speed is preserved.
pub fn home_projectiles(projectiles: &mut [Projectile], target: (f32, f32)) {
    for p in projectiles.iter_mut().filter(|p| p.tracking && p.from_player) {
        let (cx, cy) = p.center();
        let (dx, dy) = (target.0 - cx, target.1 - cy);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < f32::EPSILON {
            continue;
        }
        let speed = p.speed();
        let (want_x, want_y) = (dx / dist * speed, dy / dist * speed);
        p.vx += (want_x - p.vx) * HOMING_BLEND;
        p.vy += (want_y - p.vy) * HOMING_BLEND;
    }
}

/// Drop projectiles whose lifetime has elapsed.
pub fn expire_projectiles(projectiles: &mut Vec<Projectile>, now_ms: f64, tick_ms: f64) {
    projectiles.retain(|p| !p.is_expired(now_ms, tick_ms));
}

/// Drop non-piercing projectiles touching a wall, and anything far out of
/// bounds.
pub fn cull_projectiles(projectiles: &mut Vec<Projectile>, arena: &Arena) {
    projectiles.retain(|p| {
        let out = p.x + p.width < -OUT_OF_BOUNDS_MARGIN
            || p.x > arena.width + OUT_OF_BOUNDS_MARGIN
            || p.y + p.height < -OUT_OF_BOUNDS_MARGIN
            || p.y > arena.height + OUT_OF_BOUNDS_MARGIN;
        if out {
            return false;
        }
        if p.piercing {
            return true;
        }
        !arena.walls().any(|w| {
            aabb_overlap(p.x, p.y, p.width, p.height, w.x, w.y, w.width, w.height)
        })
    });
}
