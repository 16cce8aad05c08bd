//! Brewed potions and the potion stash.

use brewing_common::{Rarity, RecipeId};
use serde::{Deserialize, Serialize};

use crate::outcome::{BrewedQuality, RollTrace};

/// A brewed potion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Potion {
    /// Recipe the potion was brewed from
    pub recipe_id: RecipeId,
    /// Potion name, copied from the recipe
    pub name: String,
    /// Effect text, copied from the recipe
    pub effect: String,
    /// Rarity the potion was brewed at
    pub rarity: Rarity,
    /// Cosmetic type descriptor
    pub potion_type: String,
    /// Quality the brew achieved
    pub brewed_quality: BrewedQuality,
    /// Complication from a failed brew
    pub flaw_effect: Option<String>,
    /// Bonus from a natural 20
    pub excellence_effect: Option<String>,
    /// Side-effect of the dominant impurity
    pub impurity_effect: Option<String>,
    /// Number of doses in this stack
    pub quantity: u32,
    /// Rolls of the brew that created the stack
    pub roll: RollTrace,
}

impl Potion {
    /// Checks whether the potion carries a flaw, excellence, or impurity.
    ///
    /// Special potions never stack.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.flaw_effect.is_some()
            || self.excellence_effect.is_some()
            || self.impurity_effect.is_some()
    }

    /// Checks whether another potion may merge into this stack.
    #[must_use]
    pub fn stacks_with(&self, other: &Potion) -> bool {
        !self.is_special()
            && !other.is_special()
            && self.recipe_id == other.recipe_id
            && self.rarity == other.rarity
            && self.brewed_quality == other.brewed_quality
            && self.name == other.name
            && self.effect == other.effect
    }
}

/// Potions a player has brewed, in brewing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PotionStash {
    potions: Vec<Potion>,
}

impl PotionStash {
    /// Creates an empty stash.
    #[must_use]
    pub fn new() -> Self {
        Self {
            potions: Vec::new(),
        }
    }

    /// Adds a potion, merging it into a matching plain stack if there is one.
    ///
    /// Returns the index of the stack that holds it.
    pub fn add(&mut self, potion: Potion) -> usize {
        if let Some(index) = self.potions.iter().position(|p| p.stacks_with(&potion)) {
            let stack = &mut self.potions[index];
            stack.quantity = stack.quantity.saturating_add(potion.quantity);
            return index;
        }
        self.potions.push(potion);
        self.potions.len() - 1
    }

    /// Removes doses from a stack, dropping the stack when it empties.
    ///
    /// Returns the number of doses actually removed.
    pub fn remove(&mut self, index: usize, quantity: u32) -> u32 {
        let Some(stack) = self.potions.get_mut(index) else {
            return 0;
        };
        let taken = quantity.min(stack.quantity);
        stack.quantity -= taken;
        if stack.quantity == 0 {
            self.potions.remove(index);
        }
        taken
    }

    /// Returns the stack at an index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Potion> {
        self.potions.get(index)
    }

    /// Number of distinct stacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.potions.len()
    }

    /// Checks if the stash is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.potions.is_empty()
    }

    /// Total doses across all stacks.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.potions.iter().map(|p| p.quantity).sum()
    }

    /// Returns an iterator over all stacks.
    pub fn iter(&self) -> impl Iterator<Item = &Potion> + '_ {
        self.potions.iter()
    }
}
