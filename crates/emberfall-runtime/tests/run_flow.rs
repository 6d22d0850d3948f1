use rand::RngCore;

use emberfall_combat::boss_ai::BossBehavior;
use emberfall_core::arena::Arena;
use emberfall_core::boss::Boss;
use emberfall_core::config::EngineConfig;
use emberfall_core::content::{Catalog, Difficulty};
use emberfall_core::events::GameEvent;
use emberfall_core::input::{Action, MoveKey, TickInput};
use emberfall_core::player::{Player, PlayerClass};
use emberfall_core::projectile::Projectile;
use emberfall_core::state::GameStatus;
use emberfall_core::store::{MemoryStore, ProgressStore};
use emberfall_core::test_helpers::make_boss_shot;
use emberfall_progression::inventory::EquipOutcome;
use emberfall_runtime::{Game, GameError};

const TICK_SECS: f64 = 1.0 / 60.0;

/// Never moves, never fires.
struct Idle;

impl BossBehavior for Idle {
    fn update(
        &self,
        _: &mut Boss,
        _: &Player,
        _: &Arena,
        _: f64,
        _: &mut dyn RngCore,
    ) -> Vec<Projectile> {
        Vec::new()
    }
}

/// Bosses up to the given wave drop dead on their first update; later
/// ones stand still.
struct Fragile(u32);

impl BossBehavior for Fragile {
    fn update(
        &self,
        boss: &mut Boss,
        _: &Player,
        _: &Arena,
        _: f64,
        _: &mut dyn RngCore,
    ) -> Vec<Projectile> {
        if boss.wave <= self.0 {
            boss.health = 0.0;
        }
        Vec::new()
    }
}

/// Fires one overwhelming shot centred on the player.
struct Lethal;

impl BossBehavior for Lethal {
    fn update(
        &self,
        _: &mut Boss,
        player: &Player,
        _: &Arena,
        _: f64,
        _: &mut dyn RngCore,
    ) -> Vec<Projectile> {
        let (cx, cy) = player.center();
        let mut shot = make_boss_shot(cx - 100.0, cy - 100.0, 1_000_000);
        shot.width = 200.0;
        shot.height = 200.0;
        vec![shot]
    }
}

fn config(max_wave: u32) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.run.seed = Some(11);
    config.run.max_wave = max_wave;
    config.run.wave_advance_delay_ms = 100;
    config
}

fn game_with(
    config: EngineConfig,
    store: MemoryStore,
    behavior: impl BossBehavior + 'static,
) -> Game {
    Game::new(config, Catalog::builtin(), Box::new(store))
        .unwrap()
        .with_behavior(Box::new(behavior))
}

/// Drive frames until at least `ticks` fixed ticks ran or the run stopped.
fn run_ticks(game: &mut Game, ticks: u64, input: &TickInput) -> Vec<GameEvent> {
    let target = game.state().tick + ticks;
    let mut events = Vec::new();
    for _ in 0..ticks * 4 {
        if game.state().tick >= target || !game.state().is_running() {
            break;
        }
        events.extend(game.frame(TICK_SECS, input).events);
    }
    events
}

#[test]
fn fragile_bosses_lead_to_victory() {
    let mut g = game_with(config(3), MemoryStore::new(), Fragile(u32::MAX));
    g.start_run(PlayerClass::Warrior, Difficulty::Normal).unwrap();

    let mut seen = Vec::new();
    for _ in 0..2000 {
        match g.state().status {
            GameStatus::Choosing => {
                g.choose_reward(0);
            },
            GameStatus::Victory => break,
            _ => seen.extend(g.frame(TICK_SECS * 1.5, &TickInput::default()).events),
        }
    }

    assert_eq!(g.state().status, GameStatus::Victory);
    assert_eq!(g.state().wave, 3);
    assert_eq!(g.state().score, 100 + 200 + 300);
    assert!(g.state().final_play_time_ms.is_some());
    assert!(seen.iter().any(|e| matches!(e, GameEvent::Victory { score: 600, .. })));
    assert!(seen.iter().any(|e| matches!(e, GameEvent::LevelUp { .. })));

    assert_eq!(g.stats().highest_wave, 3);
    assert_eq!(g.stats().deaths, 0);
    assert!(g.store().load_progress().is_some());
    assert_eq!(g.pending_tasks(), 0);

    let t = g.state().tick;
    assert_eq!(g.frame(TICK_SECS * 3.0, &TickInput::default()).ticks, 0);
    assert_eq!(g.state().tick, t);

    assert_eq!(g.restart().unwrap(), GameEvent::WaveStarted { wave: 1 });
    assert_eq!(g.stats().games_played, 2);
    assert_eq!(g.state().high_score, 600);
}

#[test]
fn defeat_clears_saved_progress() {
    let mut g = game_with(config(50), MemoryStore::new(), Lethal);
    g.start_run(PlayerClass::Mage, Difficulty::Hard).unwrap();
    assert!(g.store().load_progress().is_some());

    let events = run_ticks(&mut g, 3, &TickInput::default());
    assert_eq!(g.state().status, GameStatus::Defeat);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Defeat { wave: 1, .. })));
    assert!(g.store().load_progress().is_none());
    assert!(g.saved_run().is_none());
    assert_eq!(g.stats().deaths, 1);

    let frozen = g.state().clone();
    assert_eq!(g.unequip_skill(0), EquipOutcome::Equipped);
    g.equip_weapon(&frozen.player.weapon.key());
    assert_eq!(g.state(), &frozen);

    assert!(matches!(
        g.restart(),
        Ok(GameEvent::WaveStarted { wave: 1 })
    ));
}

#[test]
fn next_wave_waits_for_the_advance_delay() {
    let mut g = game_with(config(50), MemoryStore::new(), Fragile(1));
    g.start_run(PlayerClass::Warrior, Difficulty::Normal).unwrap();

    let events = run_ticks(&mut g, 1, &TickInput::default());
    assert!(events.contains(&GameEvent::WaveAdvanceScheduled { wave: 2 }));
    assert!(g.state().awaiting_next_wave);
    assert!(g.state().boss.is_none());
    assert_eq!(g.pending_tasks(), 1);
    let defeated_at = g.state().time_ms;

    // 100 ms is six ticks at 60 Hz.
    let events = run_ticks(&mut g, 5, &TickInput::default());
    assert!(events.is_empty());
    assert!(g.state().boss.is_none());

    let events = run_ticks(&mut g, 2, &TickInput::default());
    assert!(events.contains(&GameEvent::WaveStarted { wave: 2 }));
    assert!(g.state().time_ms - defeated_at >= 100.0);
    assert_eq!(g.state().boss.as_ref().map(|b| b.wave), Some(2));
    assert_eq!(g.saved_run().map(|s| s.wave), Some(2));
}

#[test]
fn pause_freezes_the_wave_advance() {
    let mut g = game_with(config(50), MemoryStore::new(), Fragile(1));
    g.start_run(PlayerClass::Warrior, Difficulty::Normal).unwrap();
    run_ticks(&mut g, 1, &TickInput::default());
    assert!(g.state().awaiting_next_wave);

    assert!(g.toggle_pause());
    for _ in 0..60 {
        g.frame(TICK_SECS, &TickInput::default());
    }
    assert!(g.state().boss.is_none());
    assert_eq!(g.state().wave, 2);
    assert_eq!(g.pending_tasks(), 1);

    g.toggle_pause();
    let events = run_ticks(&mut g, 10, &TickInput::default());
    assert!(events.contains(&GameEvent::WaveStarted { wave: 2 }));
}

#[test]
fn restored_blob_keeps_the_pending_wave_advance() {
    let mut g = game_with(config(50), MemoryStore::new(), Fragile(1));
    g.start_run(PlayerClass::Warrior, Difficulty::Normal).unwrap();
    run_ticks(&mut g, 1, &TickInput::default());
    assert!(g.state().awaiting_next_wave);
    let blob = g.serialize_state();

    g.return_to_menu();
    assert_eq!(g.pending_tasks(), 0);
    assert!(g.apply_state(&blob));
    assert_eq!(g.state().status, GameStatus::Playing);
    assert_eq!(g.pending_tasks(), 1);

    let events = run_ticks(&mut g, 10, &TickInput::default());
    assert!(events.contains(&GameEvent::WaveStarted { wave: 2 }));
    assert!(!g.state().awaiting_next_wave);
    assert_eq!(g.state().boss.as_ref().map(|b| b.wave), Some(2));
}

#[test]
fn restored_blob_keeps_skill_expiry() {
    let mut g = game_with(config(50), MemoryStore::new(), Idle);
    g.start_run(PlayerClass::Rogue, Difficulty::Normal).unwrap();
    let mut input = TickInput::default();
    g.press(&mut input, Action::Skill(0));
    g.frame(TICK_SECS * 1.01, &input);
    assert!(g.state().player.has_effect("stealth"));
    let blob = g.serialize_state();

    g.return_to_menu();
    assert!(g.apply_state(&blob));
    assert!(g.state().player.has_effect("stealth"));

    // vanish lasts 2500 ms, 150 ticks.
    run_ticks(&mut g, 160, &TickInput::default());
    assert!(!g.state().player.has_effect("stealth"));
    assert_eq!(g.pending_tasks(), 0);
}

#[test]
fn skill_effect_expires_after_its_duration() {
    let mut g = game_with(config(50), MemoryStore::new(), Idle);
    g.start_run(PlayerClass::Warrior, Difficulty::Normal).unwrap();

    let mut input = TickInput::default();
    g.press(&mut input, Action::Skill(0));
    let report = g.frame(TICK_SECS * 1.01, &input);
    assert_eq!(report.ticks, 1);
    assert!(report.events.iter().any(|e| matches!(
        e,
        GameEvent::SkillActivated { effect, duration_ms: 3000, .. } if effect == "shield"
    )));
    assert!(g.state().player.has_effect("shield"));

    // 3000 ms at 60 Hz is 180 ticks.
    run_ticks(&mut g, 170, &TickInput::default());
    assert!(g.state().player.has_effect("shield"));
    run_ticks(&mut g, 20, &TickInput::default());
    assert!(!g.state().player.has_effect("shield"));
    assert_eq!(g.pending_tasks(), 0);
}

#[test]
fn held_keys_apply_to_every_tick_of_a_frame() {
    let mut g = game_with(config(50), MemoryStore::new(), Idle);
    g.start_run(PlayerClass::Archer, Difficulty::Easy).unwrap();
    run_ticks(&mut g, 30, &TickInput::default());
    let x0 = g.state().player.x;
    let report = g.frame(TICK_SECS * 3.5, &TickInput::holding([MoveKey::Right]));
    assert!(report.ticks >= 3);
    assert!(g.state().player.x > x0);
}

#[test]
fn saved_run_continues_in_a_new_session() {
    let mut first = game_with(config(50), MemoryStore::new(), Fragile(1));
    first.start_run(PlayerClass::Rogue, Difficulty::Normal).unwrap();
    run_ticks(&mut first, 10, &TickInput::default());
    assert_eq!(first.state().wave, 2);
    first.return_to_menu();
    assert_eq!(first.state().status, GameStatus::Menu);

    let raw = serde_json::to_string(&first.store().load_progress().unwrap()).unwrap();
    let mut second = game_with(config(50), MemoryStore::new().with_raw_progress(raw), Idle);
    assert_eq!(second.saved_run().map(|s| s.wave), Some(2));
    assert_eq!(second.state().high_score, 100);

    let event = second.continue_run(Difficulty::Normal).unwrap();
    assert_eq!(event, GameEvent::WaveStarted { wave: 2 });
    assert_eq!(second.state().player.class, PlayerClass::Rogue);
    assert_eq!(second.state().score, 100);
    assert_eq!(second.stats().games_played, 0);
}

#[test]
fn malformed_store_starts_fresh() {
    let store = MemoryStore::new()
        .with_raw_progress("{not json")
        .with_raw_stats("\"oops\"");
    let mut g = game_with(config(50), store, Idle);
    assert!(g.saved_run().is_none());
    assert_eq!(g.stats(), &Default::default());
    assert!(matches!(
        g.continue_run(Difficulty::Normal),
        Err(GameError::NoSavedRun)
    ));
    assert!(g.start_run(PlayerClass::Paladin, Difficulty::Normal).is_ok());
}

#[test]
fn same_seed_same_run() {
    let mut input = TickInput::holding([MoveKey::Right]);
    input.press(Action::Attack);

    let play = || {
        let mut g =
            Game::new(config(50), Catalog::builtin(), Box::new(MemoryStore::new())).unwrap();
        g.start_run(PlayerClass::Archer, Difficulty::Normal).unwrap();
        for _ in 0..240 {
            g.frame(TICK_SECS * 1.25, &input);
        }
        g.serialize_state()
    };
    let a = play();
    assert!(!a.is_empty());
    assert_eq!(a, play());
}
