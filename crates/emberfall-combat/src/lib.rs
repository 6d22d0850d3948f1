//! Combat resolution: one fixed tick at a time.

pub mod arena_gen;
pub mod attacks;
pub mod boss_ai;
pub mod damage;
pub mod debuffs;
pub mod hits;
pub mod labels;
pub mod physics;
pub mod pipeline;
pub mod projectiles;
pub mod regen;
pub mod transitions;

pub use boss_ai::{BossBehavior, WaveBoss, spawn_boss};
pub use damage::WeaponPolicy;
pub use pipeline::{TickContext, TickOutcome, tick};
pub use transitions::{RewardChoice, begin_wave, choose_reward};
