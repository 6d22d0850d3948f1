use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;

use emberfall_core::config::EngineConfig;
use emberfall_core::content::{Catalog, Difficulty};
use emberfall_core::events::GameEvent;
use emberfall_core::input::{Action, MoveKey, TickInput};
use emberfall_core::player::{PlayerClass, StatKind};
use emberfall_core::state::{GameState, GameStatus};
use emberfall_core::store::JsonFileStore;
use emberfall_runtime::Game;

/// Command-line options: `--class=mage --difficulty=hard --frames=3600 --continue`.
struct Options {
    class: PlayerClass,
    difficulty: Difficulty,
    frames: u64,
    resume: bool,
}

impl Options {
    fn from_args() -> Self {
        let mut opts = Self {
            class: PlayerClass::Warrior,
            difficulty: Difficulty::Normal,
            frames: 60 * 60 * 5,
            resume: false,
        };
        for arg in std::env::args().skip(1) {
            if let Some(v) = arg.strip_prefix("--class=") {
                match PlayerClass::ALL.into_iter().find(|c| c.as_str() == v) {
                    Some(c) => opts.class = c,
                    None => tracing::warn!("Unknown class {v}, using warrior"),
                }
            } else if let Some(v) = arg.strip_prefix("--difficulty=") {
                opts.difficulty = match v {
                    "easy" => Difficulty::Easy,
                    "hard" => Difficulty::Hard,
                    _ => Difficulty::Normal,
                };
            } else if let Some(v) = arg.strip_prefix("--frames=") {
                opts.frames = v.parse().unwrap_or(opts.frames);
            } else if arg == "--continue" {
                opts.resume = true;
            }
        }
        opts
    }
}

/// Simple autopilot: walk toward the boss, swing whenever possible, dodge
/// incoming shots and use the first skill.
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let Some(boss) = state.boss.as_ref() else {
        return input;
    };
    let (px, py) = state.player.center();
    let (bx, by) = boss.center();
    if (bx - px).abs() > 120.0 {
        input
            .held
            .insert(if bx < px { MoveKey::Left } else { MoveKey::Right });
    }
    if by < py - 80.0 && state.player.grounded {
        input.press(Action::Jump);
    }
    let threatened = state.projectiles.iter().any(|p| {
        !p.from_player && {
            let (sx, sy) = p.center();
            (sx - px).abs() < 60.0 && (sy - py).abs() < 60.0
        }
    });
    if threatened {
        input.press(Action::Dodge);
        input.press(Action::Skill(0));
    }
    input.press(Action::Attack);
    input
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Options::from_args();
    let config = EngineConfig::load();
    config.validate();
    let store = JsonFileStore::new(&config.storage.save_dir);
    let frame_interval = Duration::from_secs_f64(1.0 / config.timing.tick_rate_hz.max(1.0));

    let mut game = match Game::new(config, Catalog::builtin(), Box::new(store)) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("Failed to initialise: {e}");
            return;
        },
    };

    let started = if opts.resume && game.saved_run().is_some() {
        game.continue_run(opts.difficulty)
    } else {
        game.start_run(opts.class, opts.difficulty)
    };
    if let Err(e) = started {
        tracing::error!("Failed to start run: {e}");
        return;
    }

    let mut interval = tokio::time::interval(frame_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last = Instant::now();

    for _ in 0..opts.frames {
        interval.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_secs_f64();
        last = now;

        match game.state().status {
            GameStatus::Choosing => {
                while game.state().player.stat_points > 0 {
                    game.allocate_stat(StatKind::Strength);
                }
                game.choose_reward(0);
                continue;
            },
            GameStatus::Defeat | GameStatus::Victory => break,
            _ => {},
        }

        let input = autopilot(game.state());
        let report = game.frame(elapsed, &input);
        for event in &report.events {
            match event {
                GameEvent::WaveStarted { wave } => tracing::info!(wave, "wave started"),
                GameEvent::LevelUp { level } => tracing::info!(level, "level up"),
                GameEvent::Victory { score, .. } => tracing::info!(score, "victory"),
                GameEvent::Defeat { wave, score, .. } => tracing::info!(wave, score, "defeat"),
                other => tracing::trace!(?other, "event"),
            }
        }
    }

    let state = game.state();
    let stats = game.stats();
    tracing::info!(
        status = ?state.status,
        wave = state.wave,
        score = state.score,
        high_score = state.high_score,
        fps = ?game.stabilizer().fps(),
        games_played = stats.games_played,
        deaths = stats.deaths,
        "session finished"
    );
}
