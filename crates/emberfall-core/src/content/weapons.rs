use crate::weapon::{Element, ProjectileShape, ProjectileSpec, Weapon, WeaponKind};

use super::{Evolution, FusionRecipe};

fn melee(id: &str, name: &str, damage: u32, attack_speed: u32, range: u32) -> Weapon {
    Weapon {
        id: id.to_string(),
        name: name.to_string(),
        damage,
        attack_speed,
        range,
        kind: WeaponKind::Melee,
        element: None,
        elemental_damage: None,
        projectile: None,
        special: None,
        upgrade_level: 0,
        is_evolved: false,
    }
}

fn shooter(
    id: &str,
    name: &str,
    kind: WeaponKind,
    stats: (u32, u32, u32),
    projectile: ProjectileSpec,
) -> Weapon {
    let (damage, attack_speed, range) = stats;
    Weapon {
        kind,
        projectile: Some(projectile),
        ..melee(id, name, damage, attack_speed, range)
    }
}

fn shot(shape: ProjectileShape, count: u32, speed: f32, lifetime: u32) -> ProjectileSpec {
    ProjectileSpec {
        shape,
        count,
        speed,
        lifetime,
        piercing: false,
    }
}

trait WeaponExt {
    fn elemental(self, element: Element, damage: u32) -> Self;
    fn special(self, special: &str) -> Self;
    fn evolved(self) -> Self;
    fn piercing(self) -> Self;
}

impl WeaponExt for Weapon {
    fn elemental(mut self, element: Element, damage: u32) -> Self {
        self.element = Some(element);
        self.elemental_damage = Some(damage);
        self
    }

    fn special(mut self, special: &str) -> Self {
        self.special = Some(special.to_string());
        self
    }

    fn evolved(mut self) -> Self {
        self.is_evolved = true;
        self
    }

    fn piercing(mut self) -> Self {
        if let Some(p) = self.projectile.as_mut() {
            p.piercing = true;
        }
        self
    }
}

pub(super) fn builtin() -> Vec<Weapon> {
    use ProjectileShape::*;
    use WeaponKind::*;

    vec![
        // Base weapons
        melee("rusty_sword", "Rusty Sword", 12, 30, 60),
        melee("iron_sword", "Iron Sword", 20, 26, 70),
        melee("holy_sword", "Holy Sword", 26, 28, 80).special("holy"),
        melee("twin_daggers", "Twin Daggers", 10, 14, 45).special("dual_wield"),
        melee("venom_dagger", "Venom Dagger", 11, 18, 50).elemental(Element::Poison, 10),
        melee("spellblade", "Spellblade", 18, 24, 75)
            .elemental(Element::Lightning, 8)
            .special("hybrid"),
        shooter(
            "hunting_bow",
            "Hunting Bow",
            Ranged,
            (16, 32, 500),
            shot(Arrow, 1, 12.0, 90),
        ),
        shooter(
            "fire_staff",
            "Fire Staff",
            Magic,
            (10, 36, 400),
            shot(Orb, 1, 8.0, 120),
        )
        .elemental(Element::Fire, 15),
        shooter(
            "frost_staff",
            "Frost Staff",
            Magic,
            (9, 36, 400),
            shot(Shard, 1, 9.0, 120),
        )
        .elemental(Element::Ice, 14),
        shooter(
            "thunder_staff",
            "Thunder Staff",
            Magic,
            (8, 40, 450),
            shot(Bolt, 1, 14.0, 80),
        )
        .elemental(Element::Lightning, 18),
        shooter(
            "dark_staff",
            "Dark Staff",
            Magic,
            (12, 38, 420),
            shot(Orb, 1, 7.0, 140),
        )
        .elemental(Element::Dark, 16)
        .special("dark"),
        shooter(
            "chaos_orb",
            "Chaos Orb",
            Magic,
            (14, 34, 420),
            shot(Orb, 1, 8.0, 120),
        )
        .elemental(Element::Fire, 14)
        .special("chaos"),
        // Fusion results
        melee("flame_blade", "Flame Blade", 28, 24, 75).elemental(Element::Fire, 18),
        shooter(
            "tempest_staff",
            "Tempest Staff",
            Magic,
            (16, 30, 480),
            shot(Bolt, 2, 13.0, 90),
        )
        .elemental(Element::Lightning, 24)
        .special("homing"),
        shooter(
            "storm_bow",
            "Storm Bow",
            Ranged,
            (24, 28, 550),
            shot(Arrow, 2, 14.0, 90),
        )
        .elemental(Element::Lightning, 14)
        .special("homing"),
        // Evolved weapons
        melee("excalibur", "Excalibur", 45, 22, 95)
            .special("holy")
            .evolved(),
        shooter(
            "inferno_staff",
            "Inferno Staff",
            Magic,
            (18, 30, 450),
            shot(Orb, 3, 9.0, 120),
        )
        .elemental(Element::Fire, 32)
        .evolved(),
        shooter(
            "glacier_staff",
            "Glacier Staff",
            Magic,
            (16, 30, 450),
            shot(Shard, 3, 10.0, 120),
        )
        .elemental(Element::Ice, 28)
        .evolved(),
        shooter(
            "storm_staff",
            "Storm Staff",
            Magic,
            (15, 32, 500),
            shot(Bolt, 2, 15.0, 90),
        )
        .elemental(Element::Lightning, 34)
        .special("homing")
        .evolved(),
        shooter(
            "void_staff",
            "Void Staff",
            Magic,
            (20, 32, 460),
            shot(Orb, 2, 8.0, 150),
        )
        .elemental(Element::Dark, 30)
        .special("dark")
        .evolved(),
        melee("shadow_fangs", "Shadow Fangs", 22, 12, 55)
            .elemental(Element::Poison, 20)
            .special("dual_wield")
            .evolved(),
        shooter(
            "dragon_bow",
            "Dragon Bow",
            Ranged,
            (30, 26, 600),
            shot(Arrow, 3, 14.0, 100),
        )
        .elemental(Element::Fire, 12)
        .piercing()
        .evolved(),
        melee("ultimate_sword", "Ultimate Sword", 80, 18, 110)
            .elemental(Element::Lightning, 40)
            .special("holy")
            .evolved(),
    ]
}

pub(super) fn recipes() -> Vec<FusionRecipe> {
    let recipe = |a: &str, b: &str, result: &str, description: &str| FusionRecipe {
        a: a.to_string(),
        b: b.to_string(),
        result: result.to_string(),
        description: description.to_string(),
    };
    vec![
        recipe(
            "iron_sword",
            "fire_staff",
            "flame_blade",
            "Steel tempered in living flame.",
        ),
        recipe(
            "frost_staff",
            "thunder_staff",
            "tempest_staff",
            "Ice and lightning bound into a seeking storm.",
        ),
        recipe(
            "venom_dagger",
            "twin_daggers",
            "shadow_fangs",
            "Three blades, one poison.",
        ),
        recipe(
            "holy_sword",
            "dark_staff",
            "spellblade",
            "Light and shadow folded into one edge.",
        ),
        recipe(
            "hunting_bow",
            "thunder_staff",
            "storm_bow",
            "Arrows that find their mark.",
        ),
        // The only evolved + evolved pair that may fuse.
        recipe(
            "excalibur",
            "void_staff",
            "ultimate_sword",
            "The blade that ends all waves.",
        ),
    ]
}

pub(super) fn evolutions() -> Vec<Evolution> {
    [
        ("holy_sword", "excalibur"),
        ("fire_staff", "inferno_staff"),
        ("frost_staff", "glacier_staff"),
        ("thunder_staff", "storm_staff"),
        ("dark_staff", "void_staff"),
        ("twin_daggers", "shadow_fangs"),
        ("hunting_bow", "dragon_bow"),
    ]
    .into_iter()
    .map(|(from, to)| Evolution {
        from: from.to_string(),
        to: to.to_string(),
    })
    .collect()
}
