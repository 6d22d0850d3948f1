use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use emberfall_core::arena::{ARENA_HEIGHT, ARENA_WIDTH, Arena, Platform};

const FLOOR_HEIGHT: f32 = 60.0;
const WALL_THICKNESS: f32 = 20.0;
const PLATFORM_THICKNESS: f32 = 16.0;
/// Waves from which the floor may have a pit.
const PIT_WAVE: u32 = 3;

fn arena_seed(seed: u64, wave: u32) -> u64 {
    seed ^ u64::from(wave).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Generate the arena for `wave`. Identical `(seed, wave)` always gives the
/// same layout.
pub fn generate_arena(seed: u64, wave: u32) -> Arena {
    let mut rng = StdRng::seed_from_u64(arena_seed(seed, wave));
    let floor_y = ARENA_HEIGHT - FLOOR_HEIGHT;
    let mut platforms = Vec::new();

    // Floor, split by a pit on later waves
    if wave >= PIT_WAVE && rng.random_bool(0.5) {
        let pit_width = rng.random_range(90.0..160.0);
        let pit_x = rng.random_range(380.0..ARENA_WIDTH - 380.0 - pit_width);
        platforms.push(Platform::new(0.0, floor_y, pit_x, FLOOR_HEIGHT));
        platforms.push(Platform::new(
            pit_x + pit_width,
            floor_y,
            ARENA_WIDTH - pit_x - pit_width,
            FLOOR_HEIGHT,
        ));
    } else {
        platforms.push(Platform::new(0.0, floor_y, ARENA_WIDTH, FLOOR_HEIGHT));
    }

    // Floating platforms in loose tiers
    let count = rng.random_range(3..=5);
    let lane = ARENA_WIDTH / count as f32;
    for i in 0..count {
        let width = rng.random_range(140.0..240.0);
        let x = (i as f32 * lane + rng.random_range(0.0..(lane - width).max(1.0)))
            .clamp(WALL_THICKNESS, ARENA_WIDTH - WALL_THICKNESS - width);
        let tier = rng.random_range(0..3);
        let y = floor_y - 130.0 - tier as f32 * 110.0;
        platforms.push(Platform::new(x, y, width, PLATFORM_THICKNESS));
    }

    platforms.push(Platform::wall(-WALL_THICKNESS, 0.0, WALL_THICKNESS, ARENA_HEIGHT));
    platforms.push(Platform::wall(ARENA_WIDTH, 0.0, WALL_THICKNESS, ARENA_HEIGHT));

    Arena {
        width: ARENA_WIDTH,
        height: ARENA_HEIGHT,
        platforms,
    }
}

/// Player start position: standing on the floor segment left of center.
pub fn player_spawn(arena: &Arena, width: f32, height: f32) -> (f32, f32) {
    let target_x = arena.width * 0.2;
    crate::physics::landing_spot(arena, target_x, width, height)
        .unwrap_or((arena.width / 2.0 - width / 2.0, 0.0))
}

/// Boss start position: hovering right of center.
pub fn boss_spawn(arena: &Arena, width: f32, height: f32) -> (f32, f32) {
    (arena.width * 0.75 - width / 2.0, arena.height * 0.45 - height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_and_wave_is_deterministic() {
        assert_eq!(generate_arena(7, 4), generate_arena(7, 4));
    }

    #[test]
    fn waves_differ() {
        let layouts: Vec<_> = (1..6).map(|w| generate_arena(7, w)).collect();
        assert!(layouts.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn has_walls_and_floor() {
        for wave in 1..30 {
            let arena = generate_arena(99, wave);
            assert_eq!(arena.walls().count(), 2);
            let floor_width: f32 = arena
                .platforms
                .iter()
                .filter(|p| !p.is_wall && p.bottom() >= arena.height - 1.0)
                .map(|p| p.width)
                .sum();
            assert!(floor_width > arena.width * 0.8, "wave {wave}");
        }
    }

    #[test]
    fn early_waves_have_no_pit() {
        for seed in 0..20 {
            let arena = generate_arena(seed, 1);
            let floors = arena
                .platforms
                .iter()
                .filter(|p| !p.is_wall && p.bottom() >= arena.height - 1.0)
                .count();
            assert_eq!(floors, 1);
        }
    }

    #[test]
    fn spawn_stands_on_floor() {
        let arena = generate_arena(3, 1);
        let (x, y) = player_spawn(&arena, 32.0, 48.0);
        assert!(x >= 0.0);
        assert_eq!(y + 48.0, arena.height - FLOOR_HEIGHT);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn platforms_stay_inside_arena(seed in any::<u64>(), wave in 1u32..60) {
                let arena = generate_arena(seed, wave);
                for p in arena.platforms.iter().filter(|p| !p.is_wall) {
                    prop_assert!(p.x >= 0.0);
                    prop_assert!(p.right() <= arena.width + 1e-3);
                    prop_assert!(p.y > 0.0 && p.bottom() <= arena.height + 1e-3);
                }
            }
        }
    }
}
