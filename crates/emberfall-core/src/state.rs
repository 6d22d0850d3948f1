use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::boss::Boss;
use crate::content::Difficulty;
use crate::damage_text::DamageText;
use crate::player::Player;
use crate::projectile::Projectile;

/// Top-level run status. `is_paused` on [`GameState`] is only meaningful
/// while `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Menu,
    Playing,
    Choosing,
    Defeat,
    Victory,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Defeat | GameStatus::Victory)
    }
}

/// One option offered while choosing a reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Reward {
    StatPoints(u32),
    Skill(String),
    Weapon(String),
    Artifact(String),
    /// One upgrade level on the equipped weapon.
    UpgradeWeapon,
    FullHeal,
}

/// The authoritative game state. Owned by the orchestrator; every other
/// component takes it by value and hands back the next version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub is_paused: bool,
    pub difficulty: Difficulty,
    pub wave: u32,
    pub max_wave: u32,
    pub score: u64,
    pub high_score: u64,
    pub player: Player,
    /// `None` between a boss defeat and the next wave starting.
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub damage_texts: Vec<DamageText>,
    pub arena: Arena,
    /// Logic ticks executed this run.
    pub tick: u64,
    /// Simulation clock in milliseconds, advanced one tick-length per tick.
    pub time_ms: f64,
    pub pending_level_ups: u32,
    pub pending_bonus_rewards: u32,
    pub reward_options: Vec<Reward>,
    /// A delayed wave advance has been scheduled and not yet applied.
    pub awaiting_next_wave: bool,
    pub final_play_time_ms: Option<f64>,
    pub seed: u64,
}

impl GameState {
    pub fn new(player: Player, difficulty: Difficulty, max_wave: u32, seed: u64) -> Self {
        Self {
            status: GameStatus::Menu,
            is_paused: false,
            difficulty,
            wave: 1,
            max_wave,
            score: 0,
            high_score: 0,
            player,
            boss: None,
            projectiles: Vec::new(),
            damage_texts: Vec::new(),
            arena: Arena::empty(),
            tick: 0,
            time_ms: 0.0,
            pending_level_ups: 0,
            pending_bonus_rewards: 0,
            reward_options: Vec::new(),
            awaiting_next_wave: false,
            final_play_time_ms: None,
            seed,
        }
    }

    /// Ticks only run while playing and unpaused.
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing && !self.is_paused
    }

    pub fn pending_rewards(&self) -> u32 {
        self.pending_level_ups + self.pending_bonus_rewards
    }
}
