//! Persistence boundary.
//!
//! The engine talks to storage only through [`ProgressStore`]. Loads never
//! fail: malformed or missing data yields `None` (or default statistics) so
//! the caller starts fresh.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::player::{ARTIFACT_SLOTS, Player, PlayerClass, SKILL_SLOTS, Stats};
use crate::state::GameState;
use crate::weapon::Weapon;

const PROGRESS_FILE: &str = "progress.json";
const STATS_FILE: &str = "stats.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode save data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Saved run progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub score: u64,
    pub wave: u32,
    pub high_score: u64,
    pub class: PlayerClass,
    pub health: f32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub stats: Stats,
    pub stat_points: u32,
    pub equipped_skills: [Option<String>; SKILL_SLOTS],
    pub available_skills: BTreeSet<String>,
    pub weapon: Weapon,
    pub inventory: Vec<Weapon>,
    pub artifacts: Vec<String>,
    pub equipped_artifacts: [Option<String>; ARTIFACT_SLOTS],
}

impl ProgressSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        Self {
            score: state.score,
            wave: state.wave,
            high_score: state.high_score.max(state.score),
            class: p.class,
            health: p.health,
            level: p.level,
            experience: p.experience,
            experience_to_next_level: p.experience_to_next_level,
            stats: p.stats,
            stat_points: p.stat_points,
            equipped_skills: p.equipped_skills.clone(),
            available_skills: p.available_skills.clone(),
            weapon: p.weapon.clone(),
            inventory: p.inventory.clone(),
            artifacts: p.artifacts.clone(),
            equipped_artifacts: p.equipped_artifacts.clone(),
        }
    }

    /// Copy saved progression onto a freshly built player. `max_health`
    /// must be recomputed by the caller afterwards; health is clamped then.
    pub fn restore_player(&self, player: &mut Player) {
        player.class = self.class;
        player.health = self.health;
        player.level = self.level;
        player.experience = self.experience;
        player.experience_to_next_level = self.experience_to_next_level;
        player.stats = self.stats;
        player.stat_points = self.stat_points;
        player.equipped_skills = self.equipped_skills.clone();
        player.available_skills = self.available_skills.clone();
        player.weapon = self.weapon.clone();
        player.inventory = self.inventory.clone();
        player.artifacts = self.artifacts.clone();
        player.equipped_artifacts = self.equipped_artifacts.clone();
    }
}

/// Lifetime statistics, stored separately from run progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsAggregate {
    pub games_played: u32,
    pub total_play_time_ms: f64,
    pub highest_wave: u32,
    pub highest_score: u64,
    pub deaths: u32,
    pub class_usage: BTreeMap<String, u32>,
    pub weapon_usage: BTreeMap<String, u32>,
}

impl StatsAggregate {
    pub fn record_run_start(&mut self, class: PlayerClass, weapon_id: &str) {
        self.games_played += 1;
        *self.class_usage.entry(class.as_str().to_string()).or_insert(0) += 1;
        self.record_weapon(weapon_id);
    }

    pub fn record_weapon(&mut self, weapon_id: &str) {
        *self.weapon_usage.entry(weapon_id.to_string()).or_insert(0) += 1;
    }

    pub fn record_progress(&mut self, wave: u32, score: u64) {
        self.highest_wave = self.highest_wave.max(wave);
        self.highest_score = self.highest_score.max(score);
    }

    pub fn record_run_end(&mut self, wave: u32, score: u64, play_time_ms: f64, died: bool) {
        self.record_progress(wave, score);
        self.total_play_time_ms += play_time_ms.max(0.0);
        if died {
            self.deaths += 1;
        }
    }
}

/// Injected persistence for progression and statistics.
pub trait ProgressStore {
    fn load_progress(&self) -> Option<ProgressSnapshot>;
    fn save_progress(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError>;
    fn clear_progress(&mut self) -> Result<(), StoreError>;
    fn load_stats(&self) -> StatsAggregate;
    fn save_stats(&mut self, stats: &StatsAggregate) -> Result<(), StoreError>;
}

fn parse_or_warn<T: serde::de::DeserializeOwned>(what: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "Malformed {what} data, starting fresh");
            None
        },
    }
}

/// In-memory store holding raw JSON, for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    progress: Option<String>,
    stats: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw (possibly malformed) progress JSON.
    pub fn with_raw_progress(mut self, raw: impl Into<String>) -> Self {
        self.progress = Some(raw.into());
        self
    }

    pub fn with_raw_stats(mut self, raw: impl Into<String>) -> Self {
        self.stats = Some(raw.into());
        self
    }

    pub fn has_progress(&self) -> bool {
        self.progress.is_some()
    }
}

impl ProgressStore for MemoryStore {
    fn load_progress(&self) -> Option<ProgressSnapshot> {
        self.progress
            .as_deref()
            .and_then(|raw| parse_or_warn("progress", raw))
    }

    fn save_progress(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        self.progress = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }

    fn clear_progress(&mut self) -> Result<(), StoreError> {
        self.progress = None;
        Ok(())
    }

    fn load_stats(&self) -> StatsAggregate {
        self.stats
            .as_deref()
            .and_then(|raw| parse_or_warn("statistics", raw))
            .unwrap_or_default()
    }

    fn save_stats(&mut self, stats: &StatsAggregate) -> Result<(), StoreError> {
        self.stats = Some(serde_json::to_string(stats)?);
        Ok(())
    }
}

/// JSON files in a directory: `progress.json` and `stats.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.join(file)).ok()
    }

    fn write(&self, file: &str, contents: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(file), contents)?;
        Ok(())
    }
}

impl ProgressStore for JsonFileStore {
    fn load_progress(&self) -> Option<ProgressSnapshot> {
        self.read(PROGRESS_FILE)
            .and_then(|raw| parse_or_warn("progress", &raw))
    }

    fn save_progress(&mut self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        self.write(PROGRESS_FILE, &json)
    }

    fn clear_progress(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.dir.join(PROGRESS_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn load_stats(&self) -> StatsAggregate {
        self.read(STATS_FILE)
            .and_then(|raw| parse_or_warn("statistics", &raw))
            .unwrap_or_default()
    }

    fn save_stats(&mut self, stats: &StatsAggregate) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(stats)?;
        self.write(STATS_FILE, &json)
    }
}
