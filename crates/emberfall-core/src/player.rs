use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::weapon::Weapon;

/// Number of equippable skill slots.
pub const SKILL_SLOTS: usize = 3;
/// Number of equippable artifact slots.
pub const ARTIFACT_SLOTS: usize = 3;
/// Max health before vitality and bonuses.
pub const BASE_HEALTH: f32 = 50.0;
/// Max health granted per vitality point.
pub const HEALTH_PER_VITALITY: f32 = 10.0;
/// Player AABB size in arena pixels.
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerClass {
    Warrior,
    Mage,
    Archer,
    Rogue,
    Paladin,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 5] = [
        PlayerClass::Warrior,
        PlayerClass::Mage,
        PlayerClass::Archer,
        PlayerClass::Rogue,
        PlayerClass::Paladin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerClass::Warrior => "warrior",
            PlayerClass::Mage => "mage",
            PlayerClass::Archer => "archer",
            PlayerClass::Rogue => "rogue",
            PlayerClass::Paladin => "paladin",
        }
    }
}

/// Allocatable stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: u32,
    pub vitality: u32,
    pub agility: u32,
    pub defense: u32,
    /// Critical hit chance in whole percent.
    pub critical_chance: u32,
}

/// One of the five allocatable stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Strength,
    Vitality,
    Agility,
    Defense,
    CriticalChance,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Vitality => self.vitality,
            StatKind::Agility => self.agility,
            StatKind::Defense => self.defense,
            StatKind::CriticalChance => self.critical_chance,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Vitality => &mut self.vitality,
            StatKind::Agility => &mut self.agility,
            StatKind::Defense => &mut self.defense,
            StatKind::CriticalChance => &mut self.critical_chance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player record. Health is always within `[0, max_health]`;
/// `max_health` is derived from vitality and bonus percentages and must be
/// recomputed whenever one of those inputs changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub max_health: f32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub stats: Stats,
    pub stat_points: u32,
    pub class: PlayerClass,
    pub weapon: Weapon,
    pub inventory: Vec<Weapon>,
    pub equipped_skills: [Option<String>; SKILL_SLOTS],
    pub available_skills: BTreeSet<String>,
    pub artifacts: Vec<String>,
    pub equipped_artifacts: [Option<String>; ARTIFACT_SLOTS],
    pub active_effects: BTreeSet<String>,
    pub attack_cooldown: u32,
    pub dodge_cooldown: u32,
    /// Remaining invulnerable dodge ticks.
    pub dodge_timer: u32,
    pub skill_cooldowns: [u32; SKILL_SLOTS],
    pub facing: Facing,
    pub grounded: bool,
    pub is_jumping: bool,
    pub is_dodging: bool,
    pub is_attacking: bool,
    /// Counts ticks toward the next artifact regeneration pulse.
    pub regen_counter: u32,
}

impl Player {
    pub fn new(class: PlayerClass, stats: Stats, weapon: Weapon, x: f32, y: f32) -> Self {
        let max_health = base_max_health(stats.vitality);
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            health: max_health,
            max_health,
            level: 1,
            experience: 0,
            experience_to_next_level: experience_for_level(1),
            stats,
            stat_points: 0,
            class,
            weapon,
            inventory: Vec::new(),
            equipped_skills: Default::default(),
            available_skills: BTreeSet::new(),
            artifacts: Vec::new(),
            equipped_artifacts: Default::default(),
            active_effects: BTreeSet::new(),
            attack_cooldown: 0,
            dodge_cooldown: 0,
            dodge_timer: 0,
            skill_cooldowns: [0; SKILL_SLOTS],
            facing: Facing::Right,
            grounded: false,
            is_jumping: false,
            is_dodging: false,
            is_attacking: false,
            regen_counter: 0,
        }
    }

    pub fn has_effect(&self, tag: &str) -> bool {
        self.active_effects.contains(tag)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Heal by `amount`, never exceeding `max_health`.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Subtract `amount`, never going below zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// Max health from vitality alone.
pub fn base_max_health(vitality: u32) -> f32 {
    BASE_HEALTH + vitality as f32 * HEALTH_PER_VITALITY
}

/// Experience needed to go from `level` to `level + 1`.
pub fn experience_for_level(level: u32) -> u32 {
    100 + level.saturating_sub(1) * 50
}
