//! The six-tier rarity ladder.
//!
//! Every numeric derivation that hangs off a rarity (difficulty, die size,
//! distances) goes through [`RARITY_TIERS`] so the ladder lives in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BrewError;

/// Rarity tier of a recipe or base ingredient.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Tier 1.
    #[default]
    Common,
    /// Tier 2.
    Uncommon,
    /// Tier 3.
    Rare,
    /// Tier 4.
    #[serde(alias = "very rare", alias = "veryrare")]
    VeryRare,
    /// Tier 5.
    Legendary,
    /// Tier 6.
    Artifact,
}

/// Static information about one rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityTier {
    /// The tier this row describes
    pub rarity: Rarity,
    /// Integer modifier, 1 for common up to 6 for artifact
    pub modifier: u8,
    /// Human-readable name
    pub name: &'static str,
}

/// All rarity tiers in ascending order.
pub static RARITY_TIERS: [RarityTier; 6] = [
    RarityTier {
        rarity: Rarity::Common,
        modifier: 1,
        name: "Common",
    },
    RarityTier {
        rarity: Rarity::Uncommon,
        modifier: 2,
        name: "Uncommon",
    },
    RarityTier {
        rarity: Rarity::Rare,
        modifier: 3,
        name: "Rare",
    },
    RarityTier {
        rarity: Rarity::VeryRare,
        modifier: 4,
        name: "Very Rare",
    },
    RarityTier {
        rarity: Rarity::Legendary,
        modifier: 5,
        name: "Legendary",
    },
    RarityTier {
        rarity: Rarity::Artifact,
        modifier: 6,
        name: "Artifact",
    },
];

impl Rarity {
    /// Returns the table row for this tier.
    #[must_use]
    pub fn tier(self) -> &'static RarityTier {
        &RARITY_TIERS[self as usize]
    }

    /// Integer rarity modifier (1..=6).
    #[must_use]
    pub fn modifier(self) -> u8 {
        self.tier().modifier
    }

    /// Size of the rarity die: `2 * modifier + 2` (d4 for common up to d14).
    #[must_use]
    pub fn die_size(self) -> u32 {
        2 * self.modifier() as u32 + 2
    }

    /// Distance scale in feet: `5 * modifier`.
    #[must_use]
    pub fn distance_feet(self) -> u32 {
        5 * self.modifier() as u32
    }

    /// Get display name for this tier.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        self.tier().name
    }

    /// Looks a tier up by its modifier.
    #[must_use]
    pub fn from_modifier(modifier: u8) -> Option<Self> {
        RARITY_TIERS
            .iter()
            .find(|t| t.modifier == modifier)
            .map(|t| t.rarity)
    }

    /// Get all tiers in ascending order.
    #[must_use]
    pub fn all() -> impl Iterator<Item = Rarity> {
        RARITY_TIERS.iter().map(|t| t.rarity)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Rarity {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "veryrare" => Ok(Self::VeryRare),
            "legendary" => Ok(Self::Legendary),
            "artifact" => Ok(Self::Artifact),
            _ => Err(BrewError::UnknownRarity(s.to_string())),
        }
    }
}
