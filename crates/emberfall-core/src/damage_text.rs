use serde::{Deserialize, Serialize};

use crate::weapon::Element;

/// Max floating labels kept alive at once.
pub const DAMAGE_TEXT_CAP: usize = 40;
/// Opacity lost per tick.
pub const DAMAGE_TEXT_FADE: f32 = 0.02;
/// Upward drift per tick (arena y grows downward).
pub const DAMAGE_TEXT_RISE: f32 = 1.0;

/// Which side took the damage a label reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageTarget {
    Boss,
    Player,
}

/// A transient floating damage number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageText {
    pub x: f32,
    pub y: f32,
    pub amount: u32,
    pub target: DamageTarget,
    pub opacity: f32,
    pub offset_y: f32,
    #[serde(default)]
    pub crit: bool,
    #[serde(default)]
    pub element: Option<Element>,
}

impl DamageText {
    pub fn new(x: f32, y: f32, amount: u32, target: DamageTarget) -> Self {
        Self {
            x,
            y,
            amount,
            target,
            opacity: 1.0,
            offset_y: 0.0,
            crit: false,
            element: None,
        }
    }

    pub fn with_crit(mut self, crit: bool) -> Self {
        self.crit = crit;
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }
}
