use serde::{Deserialize, Serialize};

/// Default arena size in pixels.
pub const ARENA_WIDTH: f32 = 1280.0;
pub const ARENA_HEIGHT: f32 = 720.0;
/// Distance below the arena bottom at which the player counts as fallen off.
pub const FALL_MARGIN: f32 = 100.0;

/// A solid rectangle. Walls additionally stop non-piercing projectiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub is_wall: bool,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_wall: false,
        }
    }

    pub fn wall(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            is_wall: true,
            ..Self::new(x, y, width, height)
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal distance from `x` to the nearest point of this platform.
    pub fn horizontal_distance(&self, x: f32) -> f32 {
        if x < self.x {
            self.x - x
        } else if x > self.right() {
            x - self.right()
        } else {
            0.0
        }
    }
}

/// The playfield for one wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<Platform>,
}

impl Arena {
    pub fn empty() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            platforms: Vec::new(),
        }
    }

    /// Y beyond which the player has fallen off the map.
    pub fn fall_bound(&self) -> f32 {
        self.height + FALL_MARGIN
    }

    pub fn walls(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.is_wall)
    }
}

/// Axis-aligned overlap test shared by every collision stage.
#[allow(clippy::too_many_arguments)]
pub fn aabb_overlap(
    ax: f32,
    ay: f32,
    aw: f32,
    ah: f32,
    bx: f32,
    by: f32,
    bw: f32,
    bh: f32,
) -> bool {
    ax < bx + bw && ax + aw > bx && ay < by + bh && ay + ah > by
}
