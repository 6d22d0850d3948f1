use super::{BonusBundle, SkillDef, SkillKind};

fn active(
    id: &str,
    name: &str,
    description: &str,
    effect: &str,
    cooldown: u32,
    duration_ms: u32,
) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind: SkillKind::Active {
            effect: effect.to_string(),
            cooldown,
            duration_ms,
        },
    }
}

fn passive(id: &str, name: &str, description: &str, bonus: BonusBundle) -> SkillDef {
    SkillDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind: SkillKind::Passive { bonus },
    }
}

pub(super) fn builtin() -> Vec<SkillDef> {
    vec![
        active(
            "iron_skin",
            "Iron Skin",
            "Become immune to damage for a short time.",
            "shield",
            600,
            3000,
        ),
        active(
            "shadow_dash",
            "Shadow Dash",
            "A burst of speed that passes through attacks.",
            "dash",
            300,
            500,
        ),
        active(
            "vanish",
            "Vanish",
            "Fade from sight; boss attacks pass through you.",
            "stealth",
            900,
            2500,
        ),
        active(
            "mana_shield",
            "Mana Shield",
            "Absorb every hit with a barrier of mana.",
            "mana_shield",
            900,
            4000,
        ),
        active(
            "riposte",
            "Riposte",
            "Reflect double the damage you take back at the boss.",
            "counter",
            720,
            3000,
        ),
        active(
            "time_warp",
            "Time Warp",
            "Slow every hostile projectile.",
            "slow",
            1200,
            4000,
        ),
        active(
            "second_wind",
            "Second Wind",
            "Rapidly regenerate health.",
            "regeneration",
            1200,
            5000,
        ),
        active(
            "berserk",
            "Berserk",
            "Deal 50% more damage for a while.",
            "fury",
            900,
            5000,
        ),
        passive(
            "toughness",
            "Toughness",
            "+10% max health.",
            BonusBundle {
                health_bonus: 10.0,
                ..Default::default()
            },
        ),
        passive(
            "giant_blood",
            "Giant Blood",
            "+20% max health.",
            BonusBundle {
                health_bonus: 20.0,
                ..Default::default()
            },
        ),
        passive(
            "sharpness",
            "Sharpness",
            "+10% damage.",
            BonusBundle {
                damage_bonus: 10.0,
                ..Default::default()
            },
        ),
        passive(
            "precision",
            "Precision",
            "+5% critical chance.",
            BonusBundle {
                crit_chance_bonus: 5.0,
                ..Default::default()
            },
        ),
        passive(
            "fortitude",
            "Fortitude",
            "Take 10% less damage.",
            BonusBundle {
                defense_bonus: 10.0,
                ..Default::default()
            },
        ),
        passive(
            "assassin_instinct",
            "Assassin Instinct",
            "+8% critical chance and +5% damage.",
            BonusBundle {
                damage_bonus: 5.0,
                crit_chance_bonus: 8.0,
                ..Default::default()
            },
        ),
    ]
}
