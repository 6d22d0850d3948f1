pub mod arena;
pub mod boss;
pub mod config;
pub mod content;
pub mod damage_text;
pub mod events;
pub mod frame;
pub mod input;
pub mod player;
pub mod projectile;
pub mod state;
pub mod store;
pub mod weapon;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::arena::{Arena, Platform};
    use crate::boss::{BOSS_HEIGHT, BOSS_WIDTH, Boss};
    use crate::content::{Catalog, Difficulty};
    use crate::player::{Player, PlayerClass};
    use crate::projectile::Projectile;
    use crate::state::{GameState, GameStatus};
    use crate::weapon::{ProjectileShape, Weapon, WeaponKind};

    /// Catalog weapon `id` tagged with `level`. Stats are the catalog's
    /// level-0 values; unknown ids produce a plain melee weapon.
    pub fn make_weapon(id: &str, level: u32) -> Weapon {
        let mut weapon = Catalog::builtin().weapon(id).cloned().unwrap_or(Weapon {
            id: id.to_string(),
            name: id.to_string(),
            damage: 10,
            attack_speed: 20,
            range: 60,
            kind: WeaponKind::Melee,
            element: None,
            elemental_damage: None,
            projectile: None,
            special: None,
            upgrade_level: 0,
            is_evolved: false,
        });
        weapon.upgrade_level = level;
        weapon
    }

    /// Stationary boss with round-number stats for the given wave.
    pub fn make_boss(wave: u32) -> Boss {
        Boss {
            x: 800.0,
            y: 400.0,
            vx: 0.0,
            vy: 0.0,
            width: BOSS_WIDTH,
            height: BOSS_HEIGHT,
            health: 1000.0,
            max_health: 1000.0,
            damage: 10,
            speed: 0.0,
            attack_interval: 120,
            attack_timer: 0,
            pattern_index: 0,
            wave,
            debuffs: Vec::new(),
        }
    }

    /// A flat arena: one wide floor, two side walls.
    pub fn make_arena() -> Arena {
        Arena {
            width: 1280.0,
            height: 720.0,
            platforms: vec![
                Platform::new(0.0, 660.0, 1280.0, 60.0),
                Platform::wall(-20.0, 0.0, 20.0, 720.0),
                Platform::wall(1280.0, 0.0, 20.0, 720.0),
            ],
        }
    }

    /// Warrior with catalog stats standing on the floor of [`make_arena`].
    pub fn make_player(class: PlayerClass) -> Player {
        let catalog = Catalog::builtin();
        let def = catalog.class(class).cloned();
        let (stats, weapon_id) = def
            .map(|d| (d.stats, d.starting_weapon))
            .unwrap_or_default();
        let mut player = Player::new(class, stats, make_weapon(&weapon_id, 0), 200.0, 612.0);
        player.grounded = true;
        player
    }

    /// Menu-state run with a warrior, a wave-1 boss and a flat arena.
    pub fn make_state() -> GameState {
        let mut state =
            GameState::new(make_player(PlayerClass::Warrior), Difficulty::Normal, 50, 42);
        state.boss = Some(make_boss(1));
        state.arena = make_arena();
        state
    }

    /// Like [`make_state`] but already playing.
    pub fn make_playing_state() -> GameState {
        let mut state = make_state();
        state.status = GameStatus::Playing;
        state
    }

    /// Player-owned projectile at `(x, y)` with no velocity.
    pub fn make_player_shot(x: f32, y: f32, damage: u32) -> Projectile {
        Projectile {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width: 12.0,
            height: 12.0,
            damage,
            from_player: true,
            element: None,
            elemental_damage: None,
            piercing: false,
            tracking: false,
            lifetime: None,
            created_at_ms: 0.0,
            shape: ProjectileShape::Orb,
            weapon_id: None,
            struck: false,
        }
    }

    /// Boss-owned projectile at `(x, y)` with no velocity.
    pub fn make_boss_shot(x: f32, y: f32, damage: u32) -> Projectile {
        Projectile {
            from_player: false,
            shape: ProjectileShape::Shard,
            ..make_player_shot(x, y, damage)
        }
    }
}
