//! Read-only content tables: weapons, skills, artifacts, classes, fusion
//! recipes and evolutions. Everything is looked up by id; nothing here is
//! mutated during a run.

mod artifacts;
mod classes;
mod skills;
mod weapons;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{PlayerClass, Stats};
use crate::weapon::Weapon;

/// Additive stat modifiers granted by passive skills and artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusBundle {
    /// Percent added to max health.
    pub health_bonus: f32,
    /// Percent added to outgoing damage.
    pub damage_bonus: f32,
    /// Whole percent added to critical chance.
    pub crit_chance_bonus: f32,
    /// Percent of incoming damage removed.
    pub defense_bonus: f32,
}

impl std::ops::Add for BonusBundle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            health_bonus: self.health_bonus + rhs.health_bonus,
            damage_bonus: self.damage_bonus + rhs.damage_bonus,
            crit_chance_bonus: self.crit_chance_bonus + rhs.crit_chance_bonus,
            defense_bonus: self.defense_bonus + rhs.defense_bonus,
        }
    }
}

/// Whether a skill is toggled by a key or always on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SkillKind {
    Active {
        /// Tag inserted into the player's active effects.
        effect: String,
        /// Cooldown in ticks.
        cooldown: u32,
        /// Effect duration in real milliseconds.
        duration_ms: u32,
    },
    Passive {
        bonus: BonusBundle,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
}

impl SkillDef {
    pub fn is_passive(&self) -> bool {
        matches!(self.kind, SkillKind::Passive { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactDef {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub bonus: BonusBundle,
    /// Percent of max health restored every regeneration interval.
    #[serde(default)]
    pub regen_percent: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub class: PlayerClass,
    pub name: String,
    pub starting_weapon: String,
    pub stats: Stats,
    /// Flat fraction of incoming damage removed by the class passive.
    pub damage_reduction: f32,
    pub starting_skill: String,
}

/// Unordered pair of source weapon ids producing `result`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionRecipe {
    pub a: String,
    pub b: String,
    pub result: String,
    pub description: String,
}

impl FusionRecipe {
    pub fn covers(&self, a: &str, b: &str) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub from: String,
    pub to: String,
}

/// A weapon only one class may obtain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restriction {
    pub weapon: String,
    pub class: PlayerClass,
}

/// Run difficulty. Scales boss health and damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Boss health scaling in whole percent.
    pub fn boss_health_percent(self) -> u32 {
        match self {
            Difficulty::Easy => 75,
            Difficulty::Normal => 100,
            Difficulty::Hard => 140,
        }
    }

    /// Boss damage scaling in whole percent.
    pub fn boss_damage_percent(self) -> u32 {
        match self {
            Difficulty::Easy => 70,
            Difficulty::Normal => 100,
            Difficulty::Hard => 130,
        }
    }
}

/// Serialized form of a catalog, as written in TOML/JSON content files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub weapons: Vec<Weapon>,
    pub skills: Vec<SkillDef>,
    pub artifacts: Vec<ArtifactDef>,
    pub classes: Vec<ClassDef>,
    pub recipes: Vec<FusionRecipe>,
    pub evolutions: Vec<Evolution>,
    pub restrictions: Vec<Restriction>,
}

/// Indexed content tables.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: BTreeMap<String, Weapon>,
    skills: BTreeMap<String, SkillDef>,
    artifacts: BTreeMap<String, ArtifactDef>,
    classes: BTreeMap<PlayerClass, ClassDef>,
    recipes: Vec<FusionRecipe>,
    evolutions: BTreeMap<String, String>,
    restrictions: BTreeMap<String, PlayerClass>,
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        Self {
            weapons: file
                .weapons
                .into_iter()
                .map(|w| (w.id.clone(), w))
                .collect(),
            skills: file.skills.into_iter().map(|s| (s.id.clone(), s)).collect(),
            artifacts: file
                .artifacts
                .into_iter()
                .map(|a| (a.id.clone(), a))
                .collect(),
            classes: file.classes.into_iter().map(|c| (c.class, c)).collect(),
            recipes: file.recipes,
            evolutions: file
                .evolutions
                .into_iter()
                .map(|e| (e.from, e.to))
                .collect(),
            restrictions: file
                .restrictions
                .into_iter()
                .map(|r| (r.weapon, r.class))
                .collect(),
        }
    }
}

impl Catalog {
    /// The tables shipped with the game.
    pub fn builtin() -> Self {
        CatalogFile {
            weapons: weapons::builtin(),
            skills: skills::builtin(),
            artifacts: artifacts::builtin(),
            classes: classes::builtin(),
            recipes: weapons::recipes(),
            evolutions: weapons::evolutions(),
            restrictions: vec![Restriction {
                weapon: "ultimate_sword".to_string(),
                class: PlayerClass::Warrior,
            }],
        }
        .into()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<CatalogFile>(content).map(Self::from)
    }

    pub fn weapon(&self, id: &str) -> Option<&Weapon> {
        self.weapons.get(id)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillDef> {
        self.skills.values()
    }

    pub fn artifact(&self, id: &str) -> Option<&ArtifactDef> {
        self.artifacts.get(id)
    }

    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactDef> {
        self.artifacts.values()
    }

    pub fn class(&self, class: PlayerClass) -> Option<&ClassDef> {
        self.classes.get(&class)
    }

    /// Recipe lookup by unordered id pair.
    pub fn fusion_recipe(&self, a: &str, b: &str) -> Option<&FusionRecipe> {
        self.recipes.iter().find(|r| r.covers(a, b))
    }

    /// True when `id` is only reachable through fusion.
    pub fn is_fusion_result(&self, id: &str) -> bool {
        self.recipes.iter().any(|r| r.result == id)
    }

    pub fn evolution(&self, id: &str) -> Option<&str> {
        self.evolutions.get(id).map(String::as_str)
    }

    /// Capability check for class-restricted weapons.
    pub fn can_obtain(&self, weapon_id: &str, class: PlayerClass) -> bool {
        self.restrictions
            .get(weapon_id)
            .is_none_or(|&only| only == class)
    }
}
