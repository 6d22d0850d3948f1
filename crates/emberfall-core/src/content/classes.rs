use crate::player::{PlayerClass, Stats};

use super::ClassDef;

pub(super) fn builtin() -> Vec<ClassDef> {
    let class = |class: PlayerClass,
                 name: &str,
                 weapon: &str,
                 stats: [u32; 5],
                 damage_reduction: f32,
                 skill: &str| {
        let [strength, vitality, agility, defense, critical_chance] = stats;
        ClassDef {
            class,
            name: name.to_string(),
            starting_weapon: weapon.to_string(),
            stats: Stats {
                strength,
                vitality,
                agility,
                defense,
                critical_chance,
            },
            damage_reduction,
            starting_skill: skill.to_string(),
        }
    };

    vec![
        class(
            PlayerClass::Warrior,
            "Warrior",
            "iron_sword",
            [6, 6, 3, 4, 5],
            0.15,
            "iron_skin",
        ),
        class(
            PlayerClass::Mage,
            "Mage",
            "fire_staff",
            [2, 4, 4, 2, 5],
            0.0,
            "mana_shield",
        ),
        class(
            PlayerClass::Archer,
            "Archer",
            "hunting_bow",
            [4, 4, 7, 2, 8],
            0.0,
            "shadow_dash",
        ),
        class(
            PlayerClass::Rogue,
            "Rogue",
            "twin_daggers",
            [5, 4, 8, 2, 12],
            0.0,
            "vanish",
        ),
        class(
            PlayerClass::Paladin,
            "Paladin",
            "holy_sword",
            [5, 7, 2, 5, 4],
            0.10,
            "riposte",
        ),
    ]
}
