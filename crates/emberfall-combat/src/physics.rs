//! Player movement: gravity, acceleration, jump, dodge and platform
//! collision. Arena coordinates grow rightward and downward; velocities are
//! in pixels per tick.

use emberfall_core::arena::{Arena, Platform, aabb_overlap};
use emberfall_core::input::{MoveKey, TickInput};
use emberfall_core::player::{Facing, Player};

/// Downward acceleration per tick.
pub const GRAVITY: f32 = 0.6;
pub const MAX_FALL_SPEED: f32 = 14.0;
/// Vertical velocity applied on jump (negative is up).
pub const JUMP_VELOCITY: f32 = -13.0;
pub const BASE_MOVE_SPEED: f32 = 4.5;
/// Extra top speed per agility point.
pub const AGILITY_SPEED: f32 = 0.08;
/// Fraction of the gap to target speed closed each tick.
pub const MOVE_ACCEL: f32 = 0.35;
/// Invulnerable ticks per dodge.
pub const DODGE_TICKS: u32 = 20;
pub const DODGE_COOLDOWN: u32 = 60;
pub const DODGE_SPEED: f32 = 11.0;
/// Burst speed when the dash effect starts.
pub const DASH_SPEED: f32 = 16.0;
/// Platforms whose bottom edge is within this distance of the arena floor
/// count as ground and cannot be dropped through.
const GROUND_TOLERANCE: f32 = 1.0;

pub fn top_speed(player: &Player) -> f32 {
    let speed = BASE_MOVE_SPEED + player.stats.agility as f32 * AGILITY_SPEED;
    if player.has_effect("dash") {
        speed * 1.8
    } else {
        speed
    }
}

fn is_ground(platform: &Platform, arena: &Arena) -> bool {
    platform.bottom() >= arena.height - GROUND_TOLERANCE
}

/// Count down attack, dodge and skill cooldowns by one tick.
pub fn tick_cooldowns(player: &mut Player) {
    player.attack_cooldown = player.attack_cooldown.saturating_sub(1);
    player.dodge_cooldown = player.dodge_cooldown.saturating_sub(1);
    for cd in player.skill_cooldowns.iter_mut() {
        *cd = cd.saturating_sub(1);
    }
    if player.attack_cooldown == 0 {
        player.is_attacking = false;
    }
}

/// Advance the player one tick from held keys and jump/dodge presses.
pub fn step_player(player: &mut Player, input: &TickInput, arena: &Arena) {
    let dir = input.move_dir();
    if dir < 0.0 {
        player.facing = Facing::Left;
    } else if dir > 0.0 {
        player.facing = Facing::Right;
    }

    // Dodge overrides steering for its duration
    if input.dodge && player.dodge_cooldown == 0 && !player.is_dodging {
        player.is_dodging = true;
        player.dodge_timer = DODGE_TICKS;
        player.dodge_cooldown = DODGE_COOLDOWN;
        player.vx = player.facing.sign() * DODGE_SPEED;
    }
    if player.is_dodging {
        player.dodge_timer = player.dodge_timer.saturating_sub(1);
        if player.dodge_timer == 0 {
            player.is_dodging = false;
        }
    } else {
        let target = dir * top_speed(player);
        player.vx += (target - player.vx) * MOVE_ACCEL;
        if player.vx.abs() < 0.01 {
            player.vx = 0.0;
        }
    }

    if input.jump && player.grounded {
        player.vy = JUMP_VELOCITY;
        player.grounded = false;
        player.is_jumping = true;
    }

    player.vy = (player.vy + GRAVITY).min(MAX_FALL_SPEED);

    let prev_bottom = player.y + player.height;
    player.x += player.vx;
    player.y += player.vy;

    resolve_platforms(player, arena, prev_bottom, input.held.contains(&MoveKey::Down));

    player.x = player.x.clamp(0.0, (arena.width - player.width).max(0.0));
}

fn resolve_platforms(player: &mut Player, arena: &Arena, prev_bottom: f32, drop_through: bool) {
    player.grounded = false;

    for p in arena.platforms.iter().filter(|p| p.is_wall) {
        if !aabb_overlap(
            player.x,
            player.y,
            player.width,
            player.height,
            p.x,
            p.y,
            p.width,
            p.height,
        ) {
            continue;
        }
        let push_left = player.x + player.width - p.x;
        let push_right = p.right() - player.x;
        if push_left < push_right {
            player.x = p.x - player.width;
        } else {
            player.x = p.right();
        }
        player.vx = 0.0;
    }

    // One-way platforms: land only when falling onto the top edge
    if player.vy < 0.0 {
        return;
    }
    let bottom = player.y + player.height;
    for p in arena.platforms.iter().filter(|p| !p.is_wall) {
        if drop_through && !is_ground(p, arena) {
            continue;
        }
        let spans = player.x + player.width > p.x && player.x < p.right();
        if spans && prev_bottom <= p.y + 0.01 && bottom >= p.y {
            player.y = p.y - player.height;
            player.vy = 0.0;
            player.grounded = true;
            player.is_jumping = false;
            break;
        }
    }
}

/// Spot on top of the non-wall platform nearest (horizontally) to `x`,
/// preferring lower platforms on ties.
pub fn landing_spot(arena: &Arena, x: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    let best = arena
        .platforms
        .iter()
        .filter(|p| !p.is_wall)
        .min_by(|a, b| {
            a.horizontal_distance(x)
                .total_cmp(&b.horizontal_distance(x))
                .then(b.y.total_cmp(&a.y))
        })?;
    let px = (x - width / 2.0).clamp(best.x, (best.right() - width).max(best.x));
    Some((px, best.y - height))
}
