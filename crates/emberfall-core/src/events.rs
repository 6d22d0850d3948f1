use serde::{Deserialize, Serialize};

use crate::weapon::Element;

/// Things that happened during a tick. The orchestrator reacts to these
/// (scheduling delayed transitions, persisting progress, statistics); a
/// renderer or audio layer may also consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BossDamaged {
        amount: u32,
        crit: bool,
        element: Option<Element>,
    },
    DebuffApplied {
        element: Element,
    },
    PlayerDamaged {
        amount: u32,
    },
    DamageReflected {
        amount: u32,
    },
    SkillActivated {
        skill_id: String,
        effect: String,
        duration_ms: u32,
    },
    BossDefeated {
        wave: u32,
        experience: u32,
        score: u64,
    },
    LevelUp {
        level: u32,
    },
    /// Rewards are pending; the run switched to choosing.
    RewardsPending {
        count: u32,
    },
    /// No rewards pending; the next wave should start after a delay.
    WaveAdvanceScheduled {
        wave: u32,
    },
    WaveStarted {
        wave: u32,
    },
    FellOffMap {
        damage: u32,
    },
    Victory {
        score: u64,
        play_time_ms: f64,
    },
    Defeat {
        wave: u32,
        score: u64,
        play_time_ms: f64,
    },
}
