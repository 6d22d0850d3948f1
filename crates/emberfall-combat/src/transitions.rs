//! Run-level state transitions: wave start, boss defeat, falling off the
//! map, player defeat and reward choice.

use rand::Rng;

use emberfall_core::content::Catalog;
use emberfall_core::events::GameEvent;
use emberfall_core::state::{GameState, GameStatus};
use emberfall_progression::leveling::{
    MILESTONE_BONUS_REWARDS, boss_experience, gain_experience, is_milestone, wave_score,
};
use emberfall_progression::rewards::{apply_reward, roll_offers};

use crate::arena_gen::{generate_arena, player_spawn};
use crate::boss_ai::spawn_boss;
use crate::physics::landing_spot;

/// Fraction of max health lost when falling off the map.
pub const FALL_DAMAGE_FRACTION: f32 = 0.1;

/// Generate the arena and boss for `state.wave` and put the run back into
/// `Playing`.
pub fn begin_wave(state: &mut GameState) -> GameEvent {
    let arena = generate_arena(state.seed, state.wave);
    let boss = spawn_boss(state.wave, state.difficulty, &arena);
    let (x, y) = player_spawn(&arena, state.player.width, state.player.height);
    let player = &mut state.player;
    player.x = x;
    player.y = y;
    player.vx = 0.0;
    player.vy = 0.0;
    player.grounded = false;
    player.is_jumping = false;
    state.arena = arena;
    state.boss = Some(boss);
    state.projectiles.clear();
    state.reward_options.clear();
    state.awaiting_next_wave = false;
    state.status = GameStatus::Playing;
    tracing::info!(wave = state.wave, "wave started");
    GameEvent::WaveStarted { wave: state.wave }
}

/// Resolve a defeated boss: experience, score, and either victory, a reward
/// choice, or a scheduled wave advance.
pub fn resolve_boss_defeat(
    state: &mut GameState,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> Vec<GameEvent> {
    if !state.boss.as_ref().is_some_and(|b| b.is_defeated()) {
        return Vec::new();
    }
    let cleared = state.wave;
    let experience = boss_experience(cleared, state.player.level);
    let levels = gain_experience(&mut state.player, experience);
    state.score += wave_score(cleared);
    state.high_score = state.high_score.max(state.score);
    state.boss = None;
    state.projectiles.clear();
    tracing::info!(wave = cleared, score = state.score, experience, "boss defeated");

    let mut events = vec![GameEvent::BossDefeated {
        wave: cleared,
        experience,
        score: state.score,
    }];
    if levels > 0 {
        events.push(GameEvent::LevelUp {
            level: state.player.level,
        });
    }

    if cleared >= state.max_wave {
        state.status = GameStatus::Victory;
        state.final_play_time_ms = Some(state.time_ms);
        events.push(GameEvent::Victory {
            score: state.score,
            play_time_ms: state.time_ms,
        });
        return events;
    }

    state.wave += 1;
    state.player.health = state.player.max_health;
    state.pending_level_ups += levels;
    if is_milestone(cleared) {
        state.pending_bonus_rewards += MILESTONE_BONUS_REWARDS;
    }

    let pending = state.pending_rewards();
    if pending > 0 {
        state.status = GameStatus::Choosing;
        state.reward_options = roll_offers(&state.player, catalog, rng);
        events.push(GameEvent::RewardsPending { count: pending });
    } else {
        state.awaiting_next_wave = true;
        events.push(GameEvent::WaveAdvanceScheduled { wave: state.wave });
    }
    events
}

/// Respawn a player who fell below the arena, costing a tenth of max
/// health.
pub fn resolve_fall(state: &mut GameState) -> Option<GameEvent> {
    let arena = &state.arena;
    let player = &mut state.player;
    if player.y <= arena.fall_bound() {
        return None;
    }
    let damage = (player.max_health * FALL_DAMAGE_FRACTION).floor();
    player.take_damage(damage);
    let (x, y) = landing_spot(arena, player.x, player.width, player.height)
        .unwrap_or((arena.width / 2.0 - player.width / 2.0, 0.0));
    player.x = x;
    player.y = y;
    player.vx = 0.0;
    player.vy = 0.0;
    tracing::debug!(damage, "player fell off the map");
    Some(GameEvent::FellOffMap {
        damage: damage as u32,
    })
}

/// Terminal defeat once the player's health is gone.
pub fn resolve_defeat(state: &mut GameState) -> Option<GameEvent> {
    if !state.player.is_dead() {
        return None;
    }
    state.status = GameStatus::Defeat;
    state.final_play_time_ms = Some(state.time_ms);
    state.projectiles.clear();
    tracing::info!(wave = state.wave, score = state.score, "player defeated");
    Some(GameEvent::Defeat {
        wave: state.wave,
        score: state.score,
        play_time_ms: state.time_ms,
    })
}

/// Outcome of picking one of the offered rewards.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardChoice {
    /// More rewards pending; new offers were rolled.
    Continue,
    /// Last pending reward resolved; the next wave started.
    WaveStarted(GameEvent),
    /// Not choosing, or the index is out of range.
    Ignored,
}

/// Apply offer `index`, consume one pending reward and either roll the
/// next offers or start the next wave.
pub fn choose_reward(
    state: &mut GameState,
    index: usize,
    catalog: &Catalog,
    rng: &mut impl Rng,
) -> RewardChoice {
    if state.status != GameStatus::Choosing {
        return RewardChoice::Ignored;
    }
    let Some(reward) = state.reward_options.get(index).cloned() else {
        return RewardChoice::Ignored;
    };
    if !apply_reward(&mut state.player, &reward, catalog) {
        tracing::debug!(?reward, "reward had no effect");
    }
    if state.pending_level_ups > 0 {
        state.pending_level_ups -= 1;
    } else {
        state.pending_bonus_rewards = state.pending_bonus_rewards.saturating_sub(1);
    }

    if state.pending_rewards() > 0 {
        state.reward_options = roll_offers(&state.player, catalog, rng);
        RewardChoice::Continue
    } else {
        RewardChoice::WaveStarted(begin_wave(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberfall_core::state::Reward;
    use emberfall_core::test_helpers::make_playing_state;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn defeated(mut state: GameState) -> GameState {
        if let Some(b) = state.boss.as_mut() {
            b.health = 0.0;
        }
        state
    }

    #[test]
    fn begin_wave_spawns_boss_and_clears_shots() {
        let mut state = make_playing_state();
        state.wave = 4;
        state.projectiles.push(emberfall_core::test_helpers::make_boss_shot(0.0, 0.0, 1));
        let event = begin_wave(&mut state);
        assert_eq!(event, GameEvent::WaveStarted { wave: 4 });
        assert_eq!(state.boss.as_ref().map(|b| b.wave), Some(4));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.arena, generate_arena(state.seed, 4));
    }

    #[test]
    fn live_boss_is_not_defeated() {
        let mut state = make_playing_state();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(resolve_boss_defeat(&mut state, &Catalog::builtin(), &mut rng).is_empty());
    }

    #[test]
    fn defeat_without_level_up_schedules_advance() {
        let mut state = defeated(make_playing_state());
        state.player.health = 5.0;
        let mut rng = StdRng::seed_from_u64(0);
        let events = resolve_boss_defeat(&mut state, &Catalog::builtin(), &mut rng);
        // Wave 1 at level 1: 78 experience, below the 100 threshold
        assert_eq!(state.player.experience, 78);
        assert_eq!(state.score, 100);
        assert_eq!(state.wave, 2);
        assert!(state.boss.is_none());
        assert!(state.awaiting_next_wave);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.player.health, state.player.max_health);
        assert!(events.contains(&GameEvent::WaveAdvanceScheduled { wave: 2 }));
    }

    #[test]
    fn level_up_enters_choosing() {
        let mut state = defeated(make_playing_state());
        state.player.experience = 50;
        let mut rng = StdRng::seed_from_u64(0);
        let events = resolve_boss_defeat(&mut state, &Catalog::builtin(), &mut rng);
        assert_eq!(state.status, GameStatus::Choosing);
        assert_eq!(state.pending_level_ups, 1);
        assert!(!state.reward_options.is_empty());
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        assert!(events.contains(&GameEvent::RewardsPending { count: 1 }));
    }

    #[test]
    fn milestone_grants_bonus_rewards() {
        let mut state = defeated(make_playing_state());
        state.wave = 10;
        let mut rng = StdRng::seed_from_u64(0);
        resolve_boss_defeat(&mut state, &Catalog::builtin(), &mut rng);
        assert_eq!(state.pending_bonus_rewards, 3);
        assert_eq!(state.status, GameStatus::Choosing);
    }

    #[test]
    fn final_wave_is_victory_once() {
        let mut state = defeated(make_playing_state());
        state.wave = 50;
        state.time_ms = 1234.0;
        let mut rng = StdRng::seed_from_u64(0);
        let catalog = Catalog::builtin();
        let events = resolve_boss_defeat(&mut state, &catalog, &mut rng);
        assert_eq!(state.status, GameStatus::Victory);
        assert_eq!(state.wave, 50);
        assert_eq!(state.final_play_time_ms, Some(1234.0));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Victory { .. }))
                .count(),
            1
        );
        // Boss is gone; nothing fires twice
        assert!(resolve_boss_defeat(&mut state, &catalog, &mut rng).is_empty());
    }

    #[test]
    fn falling_costs_a_tenth_and_respawns() {
        let mut state = make_playing_state();
        let max = state.player.max_health;
        state.player.y = state.arena.fall_bound() + 10.0;
        let event = resolve_fall(&mut state);
        assert_eq!(
            event,
            Some(GameEvent::FellOffMap {
                damage: (max * 0.1).floor() as u32
            })
        );
        assert_eq!(state.player.health, max - (max * 0.1).floor());
        assert!(state.player.y < state.arena.fall_bound());
    }

    #[test]
    fn fall_with_no_platforms_goes_to_center_top() {
        let mut state = make_playing_state();
        state.arena.platforms.clear();
        state.player.y = state.arena.fall_bound() + 1.0;
        resolve_fall(&mut state);
        assert_eq!(state.player.y, 0.0);
        assert_eq!(state.player.x, state.arena.width / 2.0 - state.player.width / 2.0);
    }

    #[test]
    fn zero_health_is_defeat() {
        let mut state = make_playing_state();
        assert!(resolve_defeat(&mut state).is_none());
        state.player.health = 0.0;
        state.time_ms = 500.0;
        let event = resolve_defeat(&mut state);
        assert!(matches!(event, Some(GameEvent::Defeat { wave: 1, .. })));
        assert_eq!(state.status, GameStatus::Defeat);
        assert_eq!(state.final_play_time_ms, Some(500.0));
    }

    #[test]
    fn choosing_last_reward_starts_next_wave() {
        let catalog = Catalog::builtin();
        let mut state = make_playing_state();
        state.status = GameStatus::Choosing;
        state.wave = 2;
        state.pending_level_ups = 1;
        state.reward_options = vec![Reward::StatPoints(3)];
        state.boss = None;
        let mut rng = StdRng::seed_from_u64(0);
        let points = state.player.stat_points;
        let choice = choose_reward(&mut state, 0, &catalog, &mut rng);
        assert_eq!(choice, RewardChoice::WaveStarted(GameEvent::WaveStarted { wave: 2 }));
        assert_eq!(state.player.stat_points, points + 3);
        assert_eq!(state.status, GameStatus::Playing);
        assert!(state.boss.is_some());
    }

    #[test]
    fn choosing_with_more_pending_rerolls() {
        let catalog = Catalog::builtin();
        let mut state = make_playing_state();
        state.status = GameStatus::Choosing;
        state.pending_level_ups = 1;
        state.pending_bonus_rewards = 1;
        state.reward_options = vec![Reward::FullHeal];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(choose_reward(&mut state, 0, &catalog, &mut rng), RewardChoice::Continue);
        assert_eq!(state.pending_rewards(), 1);
        assert_eq!(state.status, GameStatus::Choosing);
        assert_eq!(choose_reward(&mut state, 9, &catalog, &mut rng), RewardChoice::Ignored);
    }
}
