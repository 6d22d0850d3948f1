use emberfall_core::content::Catalog;
use emberfall_core::player::{Player, PlayerClass};
use emberfall_core::store::ProgressSnapshot;

use crate::inventory::grant_skill;
use crate::stats::derived_max_health;

/// Build a fresh level-1 player of `class` at `(x, y)` with the class's
/// starting weapon, stats and skill. `None` when the catalog lacks the
/// class or its weapon.
pub fn new_player(catalog: &Catalog, class: PlayerClass, x: f32, y: f32) -> Option<Player> {
    let def = catalog.class(class)?;
    let weapon = catalog.weapon(&def.starting_weapon)?.clone();
    let mut player = Player::new(class, def.stats, weapon, x, y);
    grant_skill(&mut player, &def.starting_skill, catalog);
    player.max_health = derived_max_health(&player, catalog);
    player.health = player.max_health;
    Some(player)
}

/// Rebuild a player from saved progression.
pub fn restore_player(
    catalog: &Catalog,
    snapshot: &ProgressSnapshot,
    x: f32,
    y: f32,
) -> Option<Player> {
    let mut player = new_player(catalog, snapshot.class, x, y)?;
    snapshot.restore_player(&mut player);
    player.max_health = derived_max_health(&player, catalog);
    player.health = player.health.clamp(0.0, player.max_health);
    if player.health <= 0.0 {
        player.health = player.max_health;
    }
    Some(player)
}
