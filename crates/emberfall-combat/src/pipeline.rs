//! The per-tick combat pipeline.
//!
//! [`tick`] takes the authoritative state by value and returns the next
//! version along with the events raised. Stages run in a fixed order and
//! each one sees the result of the previous:
//!
//! 1. player physics, attack and skill input
//! 2. regeneration
//! 3. boss behaviour
//! 4. boss debuffs
//! 5. projectile movement
//! 6. homing
//! 7. lifetime expiry
//! 8. wall culling
//! 9. player projectiles vs boss
//! 10. boss projectiles vs player
//! 11. damage label aging
//! 12. boss defeat
//! 13. falling off the map
//! 14. player defeat

use rand::{Rng, RngCore};

use emberfall_core::content::Catalog;
use emberfall_core::damage_text::{DAMAGE_TEXT_CAP, DamageTarget, DamageText};
use emberfall_core::events::GameEvent;
use emberfall_core::input::TickInput;
use emberfall_core::state::{GameState, GameStatus};

use crate::attacks::{activate_skills, player_attack};
use crate::boss_ai::BossBehavior;
use crate::debuffs::tick_debuffs;
use crate::hits::{resolve_boss_hits, resolve_player_hits};
use crate::labels::{age_labels, push_label};
use crate::physics::{step_player, tick_cooldowns};
use crate::projectiles::{cull_projectiles, expire_projectiles, home_projectiles, move_projectiles};
use crate::regen::apply_regeneration;
use crate::transitions::{resolve_boss_defeat, resolve_defeat, resolve_fall};

/// Read-only collaborators for a tick.
pub struct TickContext<'a> {
    pub catalog: &'a Catalog,
    pub behavior: &'a dyn BossBehavior,
    /// Fixed tick length in milliseconds.
    pub tick_ms: f64,
    pub damage_text_cap: usize,
}

impl<'a> TickContext<'a> {
    pub fn new(catalog: &'a Catalog, behavior: &'a dyn BossBehavior, tick_ms: f64) -> Self {
        Self {
            catalog,
            behavior,
            tick_ms,
            damage_text_cap: DAMAGE_TEXT_CAP,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the run by one fixed tick. A state that is not running (menu,
/// paused, choosing, terminal) comes back unchanged.
pub fn tick<R: Rng>(
    mut state: GameState,
    input: &TickInput,
    ctx: &TickContext<'_>,
    rng: &mut R,
) -> TickOutcome {
    let mut events = Vec::new();
    if !state.is_running() {
        return TickOutcome { state, events };
    }
    let catalog = ctx.catalog;
    let cap = ctx.damage_text_cap;
    let now = state.time_ms;

    // 1
    tick_cooldowns(&mut state.player);
    step_player(&mut state.player, input, &state.arena);
    let spawned = player_attack(&mut state.player, input, catalog, now, rng);
    state.projectiles.extend(spawned);
    events.extend(activate_skills(&mut state.player, input, catalog));

    // 2
    apply_regeneration(&mut state.player, catalog);

    // 3
    if let Some(boss) = state.boss.as_mut() {
        let fired = ctx
            .behavior
            .update(boss, &state.player, &state.arena, now, &mut *rng as &mut dyn RngCore);
        state.projectiles.extend(fired);
    }

    // 4
    if let Some(boss) = state.boss.as_mut() {
        for (element, amount) in tick_debuffs(boss) {
            push_label(
                &mut state.damage_texts,
                DamageText::new(boss.x + boss.width / 2.0, boss.y, amount, DamageTarget::Boss)
                    .with_element(element),
                cap,
            );
            events.push(GameEvent::BossDamaged {
                amount,
                crit: false,
                element: Some(element),
            });
        }
    }

    // 5 - 8
    move_projectiles(&mut state.projectiles, state.player.has_effect("slow"));
    if let Some(boss) = state.boss.as_ref() {
        home_projectiles(&mut state.projectiles, boss.center());
    }
    expire_projectiles(&mut state.projectiles, now, ctx.tick_ms);
    cull_projectiles(&mut state.projectiles, &state.arena);

    // 9
    if let Some(boss) = state.boss.as_mut() {
        events.extend(resolve_player_hits(
            boss,
            &state.player,
            &mut state.projectiles,
            &mut state.damage_texts,
            catalog,
            cap,
            rng,
        ));
    }

    // 10
    events.extend(resolve_boss_hits(
        &mut state.player,
        state.boss.as_mut(),
        &mut state.projectiles,
        &mut state.damage_texts,
        catalog,
        cap,
    ));

    // 11
    age_labels(&mut state.damage_texts, cap);

    // 12
    events.extend(resolve_boss_defeat(&mut state, catalog, rng));

    // 13, 14
    if state.status == GameStatus::Playing {
        events.extend(resolve_fall(&mut state));
        events.extend(resolve_defeat(&mut state));
    }

    state.tick += 1;
    state.time_ms += ctx.tick_ms;
    TickOutcome { state, events }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boss_ai::WaveBoss;
    use emberfall_core::input::Action;
    use emberfall_core::test_helpers::{make_boss_shot, make_playing_state, make_state};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TICK_MS: f64 = 1000.0 / 60.0;

    fn run(state: GameState, input: &TickInput, rng: &mut StdRng) -> TickOutcome {
        let catalog = Catalog::builtin();
        let ctx = TickContext::new(&catalog, &WaveBoss, TICK_MS);
        tick(state, input, &ctx, rng)
    }

    #[test]
    fn idle_states_do_not_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let menu = make_state();
        let out = run(menu.clone(), &TickInput::default(), &mut rng);
        assert_eq!(out.state, menu);

        let mut paused = make_playing_state();
        paused.is_paused = true;
        let out = run(paused.clone(), &TickInput::default(), &mut rng);
        assert_eq!(out.state, paused);
        assert!(out.events.is_empty());
    }

    #[test]
    fn clock_advances_one_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let out = run(make_playing_state(), &TickInput::default(), &mut rng);
        assert_eq!(out.state.tick, 1);
        assert_eq!(out.state.time_ms, TICK_MS);
    }

    #[test]
    fn attack_spawns_player_projectile() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut input = TickInput::default();
        input.press(Action::Attack);
        let out = run(make_playing_state(), &input, &mut rng);
        assert!(out.state.projectiles.iter().any(|p| p.from_player));
        assert!(out.state.player.attack_cooldown > 0);
    }

    #[test]
    fn killing_blow_advances_run() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = make_playing_state();
        if let Some(b) = state.boss.as_mut() {
            b.health = 0.0;
        }
        let out = run(state, &TickInput::default(), &mut rng);
        assert!(out.state.boss.is_none());
        assert!(out.state.awaiting_next_wave);
        assert!(
            out.events
                .iter()
                .any(|e| matches!(e, GameEvent::BossDefeated { wave: 1, .. }))
        );
    }

    #[test]
    fn lethal_shot_ends_the_run_and_freezes_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = make_playing_state();
        state.player.health = 1.0;
        let (px, py) = (state.player.x, state.player.y);
        state.projectiles.push(make_boss_shot(px + 4.0, py + 10.0, 500));
        let out = run(state, &TickInput::default(), &mut rng);
        assert_eq!(out.state.status, GameStatus::Defeat);
        assert!(out.events.iter().any(|e| matches!(e, GameEvent::Defeat { .. })));

        let frozen = out.state.clone();
        let held = TickInput::holding([emberfall_core::input::MoveKey::Left]);
        let again = run(out.state, &held, &mut rng);
        assert_eq!(again.state, frozen);
    }

    #[test]
    fn label_buffer_stays_capped() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = make_playing_state();
        state.player.stats.critical_chance = 0;
        let catalog = Catalog::builtin();
        let ctx = TickContext {
            damage_text_cap: 5,
            ..TickContext::new(&catalog, &WaveBoss, TICK_MS)
        };
        for _ in 0..30 {
            if let Some(b) = state.boss.as_ref() {
                let mut shot =
                    emberfall_core::test_helpers::make_player_shot(b.x + 5.0, b.y + 5.0, 1);
                shot.lifetime = Some(100);
                state.projectiles.push(shot);
            }
            state = tick(state, &TickInput::default(), &ctx, &mut rng).state;
            assert!(state.damage_texts.len() <= 5);
        }
    }
}
