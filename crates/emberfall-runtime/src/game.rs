//! The game loop orchestrator.
//!
//! [`Game`] owns the single authoritative [`GameState`]. Every committed
//! change goes through it: ticks from the combat pipeline, delayed tasks,
//! reward choices and loadout changes. Persistence happens here and only
//! here.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use emberfall_combat::boss_ai::{BossBehavior, WaveBoss};
use emberfall_combat::pipeline::{TickContext, tick};
use emberfall_combat::transitions::{RewardChoice, begin_wave, choose_reward};
use emberfall_core::config::EngineConfig;
use emberfall_core::content::{Catalog, Difficulty};
use emberfall_core::events::GameEvent;
use emberfall_core::frame::FrameStabilizer;
use emberfall_core::input::{Action, TickInput};
use emberfall_core::player::{Player, PlayerClass, StatKind};
use emberfall_core::state::{GameState, GameStatus};
use emberfall_core::store::{ProgressSnapshot, ProgressStore, StatsAggregate};
use emberfall_core::weapon::WeaponKey;
use emberfall_progression::fusion::{FusionOutcome, fuse_owned};
use emberfall_progression::inventory::{
    EquipOutcome, equip_artifact, equip_skill, equip_weapon, unequip_artifact, unequip_skill,
};
use emberfall_progression::loadout::{new_player, restore_player};
use emberfall_progression::stats::{AllocateOutcome, allocate_stat};
use emberfall_progression::upgrade::{EvolveOutcome, UpgradeOutcome, evolve_weapon, upgrade_weapon};

use crate::scheduler::{Scheduler, TaskKind};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("class {0:?} is missing from the content catalog")]
    UnknownClass(PlayerClass),
    #[error("no saved run to continue")]
    NoSavedRun,
    #[error("cannot {action} while {status:?}")]
    WrongStatus {
        action: &'static str,
        status: GameStatus,
    },
}

/// Everything a state blob carries: the authoritative state plus the
/// delayed tasks that will still act on it.
#[derive(Serialize)]
struct StateBlobRef<'a> {
    state: &'a GameState,
    scheduler: &'a Scheduler,
    effect_epochs: &'a BTreeMap<String, u64>,
}

#[derive(Deserialize)]
struct StateBlob {
    state: GameState,
    scheduler: Scheduler,
    effect_epochs: BTreeMap<String, u64>,
}

/// What one displayed frame did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub ticks: u32,
    pub events: Vec<GameEvent>,
}

pub struct Game {
    config: EngineConfig,
    catalog: Catalog,
    behavior: Box<dyn BossBehavior>,
    store: Box<dyn ProgressStore>,
    stabilizer: FrameStabilizer,
    scheduler: Scheduler,
    state: GameState,
    stats: StatsAggregate,
    saved: Option<ProgressSnapshot>,
    /// Latest activation per effect tag; stale expiries carry an older one.
    effect_epochs: BTreeMap<String, u64>,
    rng: StdRng,
}

impl Game {
    /// Load persisted progress and statistics and sit in the menu.
    pub fn new(
        config: EngineConfig,
        catalog: Catalog,
        store: Box<dyn ProgressStore>,
    ) -> Result<Self, GameError> {
        let mut rng = match config.run.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let stats = store.load_stats();
        let saved = store.load_progress();
        let player = new_player(&catalog, PlayerClass::Warrior, 0.0, 0.0)
            .ok_or(GameError::UnknownClass(PlayerClass::Warrior))?;
        let mut state =
            GameState::new(player, Difficulty::Normal, config.run.max_wave, rng.random());
        state.high_score = saved
            .as_ref()
            .map_or(0, |s| s.high_score)
            .max(stats.highest_score);
        tracing::info!(
            saved_run = saved.is_some(),
            high_score = state.high_score,
            games_played = stats.games_played,
            "game ready"
        );
        Ok(Self {
            stabilizer: FrameStabilizer::from_config(&config.timing),
            config,
            catalog,
            behavior: Box::new(WaveBoss),
            store,
            scheduler: Scheduler::new(),
            state,
            stats,
            saved,
            effect_epochs: BTreeMap::new(),
            rng,
        })
    }

    /// Replace the boss policy.
    pub fn with_behavior(mut self, behavior: Box<dyn BossBehavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &StatsAggregate {
        &self.stats
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stabilizer(&self) -> &FrameStabilizer {
        &self.stabilizer
    }

    pub fn store(&self) -> &dyn ProgressStore {
        self.store.as_ref()
    }

    pub fn saved_run(&self) -> Option<&ProgressSnapshot> {
        self.saved.as_ref()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    fn tick_ms(&self) -> f64 {
        self.stabilizer.tick_ms()
    }

    fn reset_run_bookkeeping(&mut self) {
        self.scheduler.clear();
        self.effect_epochs.clear();
        self.stabilizer.reset();
    }

    // --- run lifecycle ---

    /// Start a fresh run (menu or terminal status only).
    pub fn start_run(
        &mut self,
        class: PlayerClass,
        difficulty: Difficulty,
    ) -> Result<GameEvent, GameError> {
        if !matches!(self.state.status, GameStatus::Menu) && !self.state.status.is_terminal() {
            return Err(GameError::WrongStatus {
                action: "start a run",
                status: self.state.status,
            });
        }
        let player =
            new_player(&self.catalog, class, 0.0, 0.0).ok_or(GameError::UnknownClass(class))?;
        let high_score = self.state.high_score.max(self.stats.highest_score);
        self.state =
            GameState::new(player, difficulty, self.config.run.max_wave, self.rng.random());
        self.state.high_score = high_score;
        self.reset_run_bookkeeping();

        self.stats.record_run_start(class, &self.state.player.weapon.id);
        self.persist_stats();
        tracing::info!(class = class.as_str(), ?difficulty, seed = self.state.seed, "run started");
        let event = begin_wave(&mut self.state);
        self.persist_progress();
        Ok(event)
    }

    /// Resume the saved run from its wave.
    pub fn continue_run(&mut self, difficulty: Difficulty) -> Result<GameEvent, GameError> {
        if self.state.status != GameStatus::Menu {
            return Err(GameError::WrongStatus {
                action: "continue a run",
                status: self.state.status,
            });
        }
        let saved = self.saved.clone().ok_or(GameError::NoSavedRun)?;
        let player = restore_player(&self.catalog, &saved, 0.0, 0.0)
            .ok_or(GameError::UnknownClass(saved.class))?;
        let high_score = saved.high_score.max(self.stats.highest_score);
        self.state =
            GameState::new(player, difficulty, self.config.run.max_wave, self.rng.random());
        self.state.wave = saved.wave.max(1);
        self.state.score = saved.score;
        self.state.high_score = high_score;
        self.reset_run_bookkeeping();
        tracing::info!(wave = self.state.wave, score = self.state.score, "run continued");
        let event = begin_wave(&mut self.state);
        self.persist_progress();
        Ok(event)
    }

    /// Start over with the same class and difficulty after the run ended.
    pub fn restart(&mut self) -> Result<GameEvent, GameError> {
        if !self.state.status.is_terminal() {
            return Err(GameError::WrongStatus {
                action: "restart",
                status: self.state.status,
            });
        }
        self.start_run(self.state.player.class, self.state.difficulty)
    }

    /// Back to the menu. A live run stays saved and can be continued.
    pub fn return_to_menu(&mut self) {
        if self.has_active_run() {
            self.persist_progress();
        }
        self.state.status = GameStatus::Menu;
        self.state.is_paused = false;
        self.reset_run_bookkeeping();
    }

    fn has_active_run(&self) -> bool {
        matches!(self.state.status, GameStatus::Playing | GameStatus::Choosing)
    }

    // --- frame driving ---

    pub fn set_visible(&mut self, visible: bool) {
        self.stabilizer.set_visible(visible);
    }

    /// Toggle pause. Only meaningful while playing.
    pub fn toggle_pause(&mut self) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }
        self.state.is_paused = !self.state.is_paused;
        if !self.state.is_paused {
            self.stabilizer.reset();
        }
        tracing::debug!(paused = self.state.is_paused, "pause toggled");
        true
    }

    /// Record a discrete key press for the next frame. Pause is handled
    /// immediately.
    pub fn press(&mut self, input: &mut TickInput, action: Action) {
        match action {
            Action::Pause => {
                self.toggle_pause();
            },
            other => input.press(other),
        }
    }

    /// Drive one displayed frame. `elapsed` is wall-clock seconds since the
    /// previous frame. Discrete presses in `input` apply to the first tick
    /// only; held keys apply to every tick.
    pub fn frame(&mut self, elapsed: f64, input: &TickInput) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.state.is_running() {
            return report;
        }
        let steps = self.stabilizer.advance(elapsed);
        let held = input.held_only();
        let tick_ms = self.tick_ms();
        for step in 0..steps {
            if !self.state.is_running() {
                break;
            }
            let tick_input = if step == 0 { input } else { &held };
            let ctx = TickContext {
                damage_text_cap: self.config.run.damage_text_cap,
                ..TickContext::new(&self.catalog, self.behavior.as_ref(), tick_ms)
            };
            let outcome = tick(self.state.clone(), tick_input, &ctx, &mut self.rng);
            self.state = outcome.state;
            report.ticks += 1;
            for event in &outcome.events {
                self.react(event);
            }
            report.events.extend(outcome.events);
            report.events.extend(self.run_due_tasks());
        }
        report
    }

    fn react(&mut self, event: &GameEvent) {
        let now = self.state.time_ms;
        match event {
            GameEvent::SkillActivated {
                effect,
                duration_ms,
                ..
            } => {
                let epoch = self.effect_epochs.entry(effect.clone()).or_insert(0);
                *epoch += 1;
                self.scheduler.schedule(
                    now + f64::from(*duration_ms),
                    TaskKind::EffectExpiry {
                        effect: effect.clone(),
                        epoch: *epoch,
                    },
                );
            },
            GameEvent::WaveAdvanceScheduled { wave } => {
                let delay = self.config.run.wave_advance_delay_ms as f64;
                self.scheduler
                    .schedule(now + delay, TaskKind::WaveAdvance { wave: *wave });
                self.persist_progress();
            },
            GameEvent::BossDefeated { wave, score, .. } => {
                self.stats.record_progress(*wave, *score);
                self.persist_stats();
            },
            GameEvent::RewardsPending { .. } => self.persist_progress(),
            GameEvent::Victory {
                score,
                play_time_ms,
            } => {
                self.stats
                    .record_run_end(self.state.wave, *score, *play_time_ms, false);
                self.persist_stats();
                self.persist_progress();
                self.scheduler.clear();
            },
            GameEvent::Defeat {
                wave,
                score,
                play_time_ms,
            } => {
                self.stats.record_run_end(*wave, *score, *play_time_ms, true);
                self.persist_stats();
                if let Err(e) = self.store.clear_progress() {
                    tracing::error!(error = %e, "Failed to clear saved progress");
                }
                self.saved = None;
                self.scheduler.clear();
            },
            _ => {},
        }
    }

    /// Apply every delayed task now due, each behind its guard.
    fn run_due_tasks(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for task in self.scheduler.take_due(self.state.time_ms) {
            match task {
                TaskKind::WaveAdvance { wave } => {
                    if self.state.status == GameStatus::Playing
                        && self.state.awaiting_next_wave
                        && self.state.wave == wave
                    {
                        events.push(begin_wave(&mut self.state));
                        self.persist_progress();
                    } else {
                        tracing::debug!(wave, "stale wave advance dropped");
                    }
                },
                TaskKind::EffectExpiry { effect, epoch } => {
                    if self.effect_epochs.get(&effect) == Some(&epoch) {
                        self.state.player.active_effects.remove(&effect);
                        self.effect_epochs.remove(&effect);
                    }
                },
            }
        }
        events
    }

    // --- rewards and loadout ---

    /// Pick reward `index` of the current offers.
    pub fn choose_reward(&mut self, index: usize) -> RewardChoice {
        let choice = choose_reward(&mut self.state, index, &self.catalog, &mut self.rng);
        match &choice {
            RewardChoice::WaveStarted(_) => {
                self.stabilizer.reset();
                self.persist_progress();
            },
            RewardChoice::Continue => self.persist_progress(),
            RewardChoice::Ignored => {},
        }
        choice
    }

    pub fn allocate_stat(&mut self, kind: StatKind) -> AllocateOutcome {
        if !self.has_active_run() {
            return AllocateOutcome::NoPoints;
        }
        let outcome = allocate_stat(&mut self.state.player, kind, &self.catalog);
        if matches!(outcome, AllocateOutcome::Allocated { .. }) {
            self.persist_progress();
        }
        outcome
    }

    /// Upgrade the equipped weapon one level. Outside a run the outcome is
    /// reported but not applied.
    pub fn upgrade_weapon(&mut self) -> UpgradeOutcome {
        let outcome = upgrade_weapon(&self.state.player.weapon, &self.catalog);
        if self.has_active_run()
            && let UpgradeOutcome::Upgraded(w) = &outcome
        {
            self.state.player.weapon = w.clone();
            self.persist_progress();
        }
        outcome
    }

    pub fn evolve_weapon(&mut self) -> EvolveOutcome {
        let outcome = evolve_weapon(&self.state.player.weapon, &self.catalog);
        if self.has_active_run()
            && let EvolveOutcome::Evolved(w) = &outcome
        {
            self.state.player.weapon = w.clone();
            self.stats.record_weapon(&w.id);
            self.persist_stats();
            self.persist_progress();
        }
        outcome
    }

    /// Fuse two owned weapons. Outside a run the outcome is reported but
    /// not applied.
    pub fn fuse(&mut self, a: &WeaponKey, b: &WeaponKey) -> FusionOutcome {
        let mut player = self.state.player.clone();
        let outcome = fuse_owned(&mut player, a, b, &self.catalog);
        if self.has_active_run()
            && let FusionOutcome::Fused(w) = &outcome
        {
            self.state.player = player;
            self.stats.record_weapon(&w.id);
            self.persist_stats();
            self.persist_progress();
        }
        outcome
    }

    pub fn equip_weapon(&mut self, key: &WeaponKey) -> EquipOutcome {
        self.saving(|p, _| equip_weapon(p, key))
    }

    pub fn equip_skill(&mut self, skill_id: &str, slot: usize) -> EquipOutcome {
        self.saving(|p, c| equip_skill(p, skill_id, slot, c))
    }

    pub fn unequip_skill(&mut self, slot: usize) -> EquipOutcome {
        self.saving(|p, _| unequip_skill(p, slot))
    }

    pub fn equip_artifact(&mut self, artifact_id: &str, slot: usize) -> EquipOutcome {
        self.saving(|p, c| equip_artifact(p, artifact_id, slot, c))
    }

    pub fn unequip_artifact(&mut self, slot: usize) -> EquipOutcome {
        self.saving(|p, c| unequip_artifact(p, slot, c))
    }

    /// Run an equip operation on a copy of the player and commit it only
    /// during an active run.
    fn saving(
        &mut self,
        op: impl FnOnce(&mut Player, &Catalog) -> EquipOutcome,
    ) -> EquipOutcome {
        let mut player = self.state.player.clone();
        let outcome = op(&mut player, &self.catalog);
        if outcome == EquipOutcome::Equipped && self.has_active_run() {
            self.state.player = player;
            self.persist_progress();
        }
        outcome
    }

    // --- persistence ---

    fn persist_progress(&mut self) {
        let snapshot = ProgressSnapshot::capture(&self.state);
        self.state.high_score = snapshot.high_score;
        match self.store.save_progress(&snapshot) {
            Ok(()) => self.saved = Some(snapshot),
            Err(e) => tracing::error!(error = %e, "Failed to save progress"),
        }
    }

    fn persist_stats(&mut self) {
        if let Err(e) = self.store.save_stats(&self.stats) {
            tracing::error!(error = %e, "Failed to save statistics");
        }
    }

    // --- state blobs ---

    /// Full authoritative state as MessagePack, together with the pending
    /// delayed tasks so a restored run keeps advancing.
    pub fn serialize_state(&self) -> Vec<u8> {
        let blob = StateBlobRef {
            state: &self.state,
            scheduler: &self.scheduler,
            effect_epochs: &self.effect_epochs,
        };
        match rmp_serde::to_vec_named(&blob) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize state");
                Vec::new()
            },
        }
    }

    /// Replace the state and its pending tasks from a
    /// [`Game::serialize_state`] blob. Malformed input leaves everything
    /// untouched and returns false.
    pub fn apply_state(&mut self, data: &[u8]) -> bool {
        match rmp_serde::from_slice::<StateBlob>(data) {
            Ok(blob) => {
                self.state = blob.state;
                self.scheduler = blob.scheduler;
                self.effect_epochs = blob.effect_epochs;
                self.stabilizer.reset();
                true
            },
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed state blob");
                false
            },
        }
    }
}
