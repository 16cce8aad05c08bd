//! Alchemical elements.
//!
//! Ingredients carry a set of elements and components require some of them.
//! The catalog is closed: data naming anything else is rejected on parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BrewError;

/// An alchemical element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Heat and flame.
    Fire,
    /// Tides and rain.
    Water,
    /// Soil and weight.
    Earth,
    /// Wind and breath.
    Air,
    /// Frost.
    Ice,
    /// Storm-spark.
    Lightning,
    /// Concussive sound.
    Thunder,
    /// Corrosion.
    Acid,
    /// Venom and rot.
    Poison,
    /// Plain illumination.
    Light,
    /// Darkness.
    Shadow,
    /// Holy radiance.
    Radiant,
    /// Withering.
    Necrotic,
    /// Pressure on the mind.
    Psychic,
    /// Raw kinetic force.
    Force,
    /// Untamed magic.
    Arcane,
    /// Hours and moments.
    Time,
    /// Distance and place.
    Space,
    /// Growth and vigor.
    Life,
    /// Endings.
    Death,
    /// Thought.
    Mind,
    /// Soul-stuff.
    Spirit,
    /// Vital fluid.
    Blood,
    /// Skeleton and marrow.
    Bone,
    /// Ore and alloy.
    Metal,
    /// Rock and crystal.
    Stone,
    /// Leaf and root.
    Plant,
    /// Animal nature.
    Beast,
    /// Otherworldly whimsy.
    Fey,
    /// Hellfire and brimstone.
    Infernal,
    /// Starlight and choirs.
    Celestial,
    /// Emptiness.
    Void,
    /// Disorder.
    Chaos,
    /// Sleep and vision.
    Dream,
    /// Fortune.
    Luck,
}

impl Element {
    /// Every element in catalog order.
    pub const ALL: [Element; 35] = [
        Self::Fire,
        Self::Water,
        Self::Earth,
        Self::Air,
        Self::Ice,
        Self::Lightning,
        Self::Thunder,
        Self::Acid,
        Self::Poison,
        Self::Light,
        Self::Shadow,
        Self::Radiant,
        Self::Necrotic,
        Self::Psychic,
        Self::Force,
        Self::Arcane,
        Self::Time,
        Self::Space,
        Self::Life,
        Self::Death,
        Self::Mind,
        Self::Spirit,
        Self::Blood,
        Self::Bone,
        Self::Metal,
        Self::Stone,
        Self::Plant,
        Self::Beast,
        Self::Fey,
        Self::Infernal,
        Self::Celestial,
        Self::Void,
        Self::Chaos,
        Self::Dream,
        Self::Luck,
    ];

    /// Lowercase key used in data files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Ice => "ice",
            Self::Lightning => "lightning",
            Self::Thunder => "thunder",
            Self::Acid => "acid",
            Self::Poison => "poison",
            Self::Light => "light",
            Self::Shadow => "shadow",
            Self::Radiant => "radiant",
            Self::Necrotic => "necrotic",
            Self::Psychic => "psychic",
            Self::Force => "force",
            Self::Arcane => "arcane",
            Self::Time => "time",
            Self::Space => "space",
            Self::Life => "life",
            Self::Death => "death",
            Self::Mind => "mind",
            Self::Spirit => "spirit",
            Self::Blood => "blood",
            Self::Bone => "bone",
            Self::Metal => "metal",
            Self::Stone => "stone",
            Self::Plant => "plant",
            Self::Beast => "beast",
            Self::Fey => "fey",
            Self::Infernal => "infernal",
            Self::Celestial => "celestial",
            Self::Void => "void",
            Self::Chaos => "chaos",
            Self::Dream => "dream",
            Self::Luck => "luck",
        }
    }

    /// Parses an element key, returning `None` for anything outside the catalog.
    #[must_use]
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Element {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| BrewError::UnknownElement(s.to_string()))
    }
}
