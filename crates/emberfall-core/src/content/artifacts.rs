use super::{ArtifactDef, BonusBundle};

fn artifact(
    id: &str,
    name: &str,
    description: &str,
    bonus: BonusBundle,
    regen_percent: Option<f32>,
) -> ArtifactDef {
    ArtifactDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        bonus,
        regen_percent,
    }
}

pub(super) fn builtin() -> Vec<ArtifactDef> {
    vec![
        artifact(
            "heart_amulet",
            "Heart Amulet",
            "+15% max health.",
            BonusBundle {
                health_bonus: 15.0,
                ..Default::default()
            },
            None,
        ),
        artifact(
            "war_banner",
            "War Banner",
            "+12% damage.",
            BonusBundle {
                damage_bonus: 12.0,
                ..Default::default()
            },
            None,
        ),
        artifact(
            "eagle_eye",
            "Eagle Eye",
            "+6% critical chance.",
            BonusBundle {
                crit_chance_bonus: 6.0,
                ..Default::default()
            },
            None,
        ),
        artifact(
            "stone_ward",
            "Stone Ward",
            "Take 15% less damage.",
            BonusBundle {
                defense_bonus: 15.0,
                ..Default::default()
            },
            None,
        ),
        artifact(
            "troll_blood",
            "Troll Blood",
            "+5% max health; restore 5% health every few seconds.",
            BonusBundle {
                health_bonus: 5.0,
                ..Default::default()
            },
            Some(5.0),
        ),
        artifact(
            "phoenix_feather",
            "Phoenix Feather",
            "+10% max health, +5% damage; restore 3% health every few seconds.",
            BonusBundle {
                health_bonus: 10.0,
                damage_bonus: 5.0,
                ..Default::default()
            },
            Some(3.0),
        ),
        artifact(
            "berserker_ring",
            "Berserker Ring",
            "+20% damage.",
            BonusBundle {
                damage_bonus: 20.0,
                ..Default::default()
            },
            None,
        ),
        artifact(
            "guardian_sigil",
            "Guardian Sigil",
            "+10% max health, take 10% less damage.",
            BonusBundle {
                health_bonus: 10.0,
                defense_bonus: 10.0,
                ..Default::default()
            },
            None,
        ),
    ]
}
