//! Recipe definitions and data structures.
//!
//! This module provides:
//! - Recipes with an ordered list of component slots
//! - Base slots and element slots
//! - Target difficulty derived from rarity and component count
//! - Universal recipes whose rarity is picked at brew time

use brewing_common::{ComponentId, Element, Rarity, RecipeId};
use serde::{Deserialize, Serialize};

use crate::ingredient::IngredientCategory;

// ============================================================================
// Components
// ============================================================================

/// A slot inside a recipe that one ingredient must fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeComponent {
    /// Slot identifier, unique within the recipe
    pub id: ComponentId,
    /// Display name
    pub name: String,
    /// Marks a base slot
    #[serde(default)]
    pub base: bool,
    /// Elements the ingredient must all carry
    #[serde(default)]
    pub required_elements: Vec<Element>,
    /// Allowed ingredient categories (empty = any)
    #[serde(default)]
    pub categories: Vec<IngredientCategory>,
    /// Allowed legacy type tags (empty = any)
    #[serde(default)]
    pub types: Vec<String>,
    /// Units consumed per brew
    pub quantity: u32,
}

impl RecipeComponent {
    /// Creates a base slot.
    #[must_use]
    pub fn base(id: impl Into<ComponentId>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base: true,
            required_elements: Vec::new(),
            categories: Vec::new(),
            types: Vec::new(),
            quantity,
        }
    }

    /// Creates a regular slot requiring the given elements.
    #[must_use]
    pub fn elements(
        id: impl Into<ComponentId>,
        name: impl Into<String>,
        elements: &[Element],
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base: false,
            required_elements: elements.to_vec(),
            categories: Vec::new(),
            types: Vec::new(),
            quantity,
        }
    }

    /// Restricts the slot to the given categories.
    #[must_use]
    pub fn with_categories(mut self, categories: &[IngredientCategory]) -> Self {
        self.categories = categories.to_vec();
        self
    }

    /// Restricts the slot to the given legacy type tags.
    #[must_use]
    pub fn with_types<S: AsRef<str>>(mut self, types: &[S]) -> Self {
        self.types = types.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Units lost from this slot when a brew fails: half, rounded up.
    #[must_use]
    pub fn failure_loss(&self) -> u32 {
        self.quantity.div_ceil(2)
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// A potion recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier
    pub id: RecipeId,
    /// Potion name
    pub name: String,
    /// Effect text copied onto brewed potions
    #[serde(default)]
    pub effect: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Rarity tier (the default tier for universal recipes)
    pub rarity: Rarity,
    /// Rarity is picked at brew time from the selected base
    #[serde(default)]
    pub universal: bool,
    /// Cosmetic potion type descriptor
    #[serde(default)]
    pub potion_type: String,
    /// Cosmetic potion quality descriptor
    #[serde(default)]
    pub potion_quality: String,
    /// Ordered component slots
    pub components: Vec<RecipeComponent>,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(id: impl Into<RecipeId>, name: impl Into<String>) -> RecipeBuilder {
        RecipeBuilder::new(id.into(), name.into())
    }

    /// Rarity a brew of this recipe runs at.
    ///
    /// Fixed recipes ignore the requested tier.
    #[must_use]
    pub fn effective_rarity(&self, requested: Option<Rarity>) -> Rarity {
        if self.universal {
            requested.unwrap_or(self.rarity)
        } else {
            self.rarity
        }
    }

    /// Target difficulty: `5 * modifier + 5 + component count`.
    #[must_use]
    pub fn target_difficulty(&self, rarity: Rarity) -> i32 {
        5 * i32::from(rarity.modifier()) + 5 + self.components.len() as i32
    }

    /// Builds the matcher context for a brew at the requested tier.
    #[must_use]
    pub fn match_context(&self, requested: Option<Rarity>) -> MatchContext {
        MatchContext {
            universal: self.universal,
            rarity: self.effective_rarity(requested),
        }
    }

    /// Looks up a component by id.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&RecipeComponent> {
        self.components.iter().find(|c| &c.id == id)
    }
}

/// Recipe facts the compatibility matcher needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    /// The recipe picks its rarity at brew time
    pub universal: bool,
    /// Rarity the brew runs at
    pub rarity: Rarity,
}

impl MatchContext {
    /// Context for a recipe with a fixed tier.
    #[must_use]
    pub const fn fixed(rarity: Rarity) -> Self {
        Self {
            universal: false,
            rarity,
        }
    }

    /// Context for a universal recipe brewed at the given tier.
    #[must_use]
    pub const fn universal(rarity: Rarity) -> Self {
        Self {
            universal: true,
            rarity,
        }
    }
}

/// Builder for creating recipes.
#[derive(Debug)]
pub struct RecipeBuilder {
    inner: Recipe,
}

impl RecipeBuilder {
    fn new(id: RecipeId, name: String) -> Self {
        Self {
            inner: Recipe {
                id,
                name,
                effect: String::new(),
                description: String::new(),
                rarity: Rarity::Common,
                universal: false,
                potion_type: String::new(),
                potion_quality: String::new(),
                components: Vec::new(),
            },
        }
    }

    /// Sets the rarity tier.
    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.inner.rarity = rarity;
        self
    }

    /// Marks the recipe as universal.
    #[must_use]
    pub fn universal(mut self) -> Self {
        self.inner.universal = true;
        self
    }

    /// Sets the effect text.
    #[must_use]
    pub fn effect(mut self, effect: impl Into<String>) -> Self {
        self.inner.effect = effect.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    /// Sets the cosmetic type and quality descriptors.
    #[must_use]
    pub fn descriptors(
        mut self,
        potion_type: impl Into<String>,
        quality: impl Into<String>,
    ) -> Self {
        self.inner.potion_type = potion_type.into();
        self.inner.potion_quality = quality.into();
        self
    }

    /// Appends a component slot.
    #[must_use]
    pub fn component(mut self, component: RecipeComponent) -> Self {
        self.inner.components.push(component);
        self
    }

    /// Builds the recipe.
    #[must_use]
    pub fn build(self) -> Recipe {
        self.inner
    }
}
