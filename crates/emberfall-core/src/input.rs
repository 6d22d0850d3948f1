use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::player::SKILL_SLOTS;

/// Continuously held movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKey {
    Left,
    Right,
    Down,
}

/// Discrete key-down events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Jump,
    Dodge,
    Attack,
    Skill(u8),
    Pause,
}

/// Input consumed by a single logic tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub held: BTreeSet<MoveKey>,
    pub jump: bool,
    pub dodge: bool,
    pub attack: bool,
    pub skills: [bool; SKILL_SLOTS],
}

impl TickInput {
    pub fn holding(keys: impl IntoIterator<Item = MoveKey>) -> Self {
        Self {
            held: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Horizontal intent in `-1.0..=1.0`.
    pub fn move_dir(&self) -> f32 {
        let left = self.held.contains(&MoveKey::Left);
        let right = self.held.contains(&MoveKey::Right);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Record a discrete action. `Pause` is handled by the orchestrator and
    /// ignored here.
    pub fn press(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump = true,
            Action::Dodge => self.dodge = true,
            Action::Attack => self.attack = true,
            Action::Skill(slot) => {
                if let Some(s) = self.skills.get_mut(usize::from(slot)) {
                    *s = true;
                }
            },
            Action::Pause => {},
        }
    }

    /// Same held keys with every discrete flag cleared. Used for the
    /// second and later ticks of a frame.
    pub fn held_only(&self) -> Self {
        Self {
            held: self.held.clone(),
            ..Default::default()
        }
    }
}
