use emberfall_core::content::Catalog;
use emberfall_core::player::Player;
use emberfall_progression::stats::artifact_regen_percent;

/// Ticks between artifact regeneration pulses.
pub const ARTIFACT_REGEN_INTERVAL: u32 = 300;
/// Health per tick while the regeneration effect is active.
pub const REGEN_EFFECT_PER_TICK: f32 = 0.5;

/// Apply both regeneration sources for one tick. Each source is gated
/// independently; healing never exceeds max health.
pub fn apply_regeneration(player: &mut Player, catalog: &Catalog) {
    let percent = artifact_regen_percent(player, catalog);
    if percent > 0.0 {
        player.regen_counter += 1;
        if player.regen_counter >= ARTIFACT_REGEN_INTERVAL {
            player.regen_counter = 0;
            let amount = player.max_health * percent / 100.0;
            player.heal(amount);
        }
    } else {
        player.regen_counter = 0;
    }

    if player.has_effect("regeneration") {
        player.heal(REGEN_EFFECT_PER_TICK);
    }
}
