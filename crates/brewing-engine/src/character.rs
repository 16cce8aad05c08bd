//! The brewer: equipment, proficiency, and scoring mode.

use brewing_common::EquipmentId;
use serde::{Deserialize, Serialize};

use crate::outcome::ResolutionMode;

/// What the brew transaction needs to know about whoever is brewing.
pub trait BrewerProfile {
    /// Brewing bonus of the active equipment (may be negative).
    fn equipment_bonus(&self) -> i32;

    /// Whether the brewer is proficient with alchemy tools.
    fn is_proficient(&self) -> bool;

    /// Proficiency bonus applied when proficient.
    fn proficiency_bonus(&self) -> i32;

    /// Scoring mode for brew attempts.
    fn resolution_mode(&self) -> ResolutionMode;

    /// Equipment bonus plus proficiency bonus if proficient.
    fn total_bonus(&self) -> i32 {
        let proficiency = if self.is_proficient() {
            self.proficiency_bonus()
        } else {
            0
        };
        self.equipment_bonus() + proficiency
    }
}

/// A piece of brewing equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Equipment identifier
    pub id: EquipmentId,
    /// Display name
    pub name: String,
    /// Bonus (or penalty) to brew rolls
    #[serde(default)]
    pub brewing_bonus: i32,
}

impl Equipment {
    /// Creates a new piece of equipment.
    #[must_use]
    pub fn new(id: impl Into<EquipmentId>, name: impl Into<String>, brewing_bonus: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brewing_bonus,
        }
    }
}

/// A player character who brews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character name
    pub name: String,
    /// Active equipment
    #[serde(default)]
    pub equipment: Option<Equipment>,
    /// Proficient with alchemy tools
    #[serde(default)]
    pub proficient: bool,
    /// Proficiency bonus
    #[serde(default = "default_proficiency_bonus")]
    pub proficiency_bonus: i32,
    /// Scoring mode
    #[serde(default)]
    pub mode: ResolutionMode,
}

const fn default_proficiency_bonus() -> i32 {
    2
}

impl Character {
    /// Creates a character with no equipment and no proficiency.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            equipment: None,
            proficient: false,
            proficiency_bonus: default_proficiency_bonus(),
            mode: ResolutionMode::default(),
        }
    }

    /// Equips a piece of equipment.
    #[must_use]
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        self
    }

    /// Makes the character proficient with the given bonus.
    #[must_use]
    pub fn with_proficiency(mut self, bonus: i32) -> Self {
        self.proficient = true;
        self.proficiency_bonus = bonus;
        self
    }

    /// Sets the scoring mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ResolutionMode) -> Self {
        self.mode = mode;
        self
    }
}

impl BrewerProfile for Character {
    fn equipment_bonus(&self) -> i32 {
        self.equipment.as_ref().map_or(0, |e| e.brewing_bonus)
    }

    fn is_proficient(&self) -> bool {
        self.proficient
    }

    fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
    }

    fn resolution_mode(&self) -> ResolutionMode {
        self.mode
    }
}
