use serde::{Deserialize, Serialize};

/// Elemental damage types. Each maps to one debuff kind on the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Poison,
    Dark,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Ice,
        Element::Lightning,
        Element::Poison,
        Element::Dark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Ice => "ice",
            Element::Lightning => "lightning",
            Element::Poison => "poison",
            Element::Dark => "dark",
        }
    }
}

/// How a weapon delivers its damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Melee,
    Ranged,
    Magic,
}

/// Visual/collision shape tag carried by a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileShape {
    Slash,
    Arrow,
    Orb,
    Bolt,
    Shard,
}

/// Projectile parameters for weapons that fire something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpec {
    pub shape: ProjectileShape,
    pub count: u32,
    pub speed: f32,
    /// Lifetime in ticks.
    pub lifetime: u32,
    #[serde(default)]
    pub piercing: bool,
}

/// A weapon instance. Upgrades and fusion produce new instances; the
/// catalog keeps the level-0 definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub damage: u32,
    /// Cooldown between attacks, in ticks.
    pub attack_speed: u32,
    pub range: u32,
    pub kind: WeaponKind,
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub elemental_damage: Option<u32>,
    #[serde(default)]
    pub projectile: Option<ProjectileSpec>,
    #[serde(default)]
    pub special: Option<String>,
    #[serde(default)]
    pub upgrade_level: u32,
    #[serde(default)]
    pub is_evolved: bool,
}

impl Weapon {
    /// The composite identity used for inventory membership, equip
    /// detection and fusion bookkeeping.
    pub fn key(&self) -> WeaponKey {
        WeaponKey {
            id: self.id.clone(),
            upgrade_level: self.upgrade_level,
        }
    }

    pub fn matches(&self, key: &WeaponKey) -> bool {
        self.id == key.id && self.upgrade_level == key.upgrade_level
    }

    pub fn has_special(&self, special: &str) -> bool {
        self.special.as_deref() == Some(special)
    }
}

/// Value-equality key `{id, upgrade_level}`.
///
/// Two copies of the same base weapon upgraded to the same level are
/// indistinguishable under this key. Inventory removal takes the first
/// matching copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponKey {
    pub id: String,
    pub upgrade_level: u32,
}

impl WeaponKey {
    pub fn new(id: impl Into<String>, upgrade_level: u32) -> Self {
        Self {
            id: id.into(),
            upgrade_level,
        }
    }
}

impl std::fmt::Display for WeaponKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.id, self.upgrade_level)
    }
}
