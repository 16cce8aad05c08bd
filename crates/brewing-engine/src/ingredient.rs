//! Ingredient records.

use brewing_common::{Element, IngredientId, Rarity};
use serde::{Deserialize, Serialize};

/// Coarse kind of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    /// Leaves, roots, fungi.
    Plant,
    /// Ores, salts, gems.
    Mineral,
    /// Parts harvested from creatures.
    Creature,
    /// Anything else.
    #[default]
    Other,
}

impl IngredientCategory {
    /// Get display name for this category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Plant => "Plant",
            Self::Mineral => "Mineral",
            Self::Creature => "Creature",
            Self::Other => "Other",
        }
    }
}

/// An ingredient held in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient identifier
    pub id: IngredientId,
    /// Display name
    pub name: String,
    /// Coarse kind
    pub category: IngredientCategory,
    /// Legacy type tag, matched by components that still list `types`
    #[serde(default)]
    pub item_type: Option<String>,
    /// Alchemical elements present in the ingredient
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Free-form impurity tag, usually an element key
    #[serde(default)]
    pub impurity: Option<String>,
    /// Rarity of the ingredient itself
    #[serde(default)]
    pub rarity: Rarity,
    /// Units owned
    pub quantity: u32,
    /// Marks a recipe base
    #[serde(default)]
    pub is_base: bool,
    /// Rarity a base ingredient brews at in universal recipes
    #[serde(default)]
    pub base_rarity: Option<Rarity>,
}

impl Ingredient {
    /// Creates a new ingredient builder.
    #[must_use]
    pub fn builder(id: impl Into<IngredientId>, name: impl Into<String>) -> IngredientBuilder {
        IngredientBuilder::new(id.into(), name.into())
    }

    /// Checks whether the ingredient carries an element.
    #[must_use]
    pub fn has_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }
}

/// Builder for creating ingredients.
#[derive(Debug)]
pub struct IngredientBuilder {
    inner: Ingredient,
}

impl IngredientBuilder {
    fn new(id: IngredientId, name: String) -> Self {
        Self {
            inner: Ingredient {
                id,
                name,
                category: IngredientCategory::Other,
                item_type: None,
                elements: Vec::new(),
                impurity: None,
                rarity: Rarity::Common,
                quantity: 0,
                is_base: false,
                base_rarity: None,
            },
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: IngredientCategory) -> Self {
        self.inner.category = category;
        self
    }

    /// Sets the legacy type tag.
    #[must_use]
    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.inner.item_type = Some(item_type.into());
        self
    }

    /// Adds an element.
    #[must_use]
    pub fn element(mut self, element: Element) -> Self {
        if !self.inner.elements.contains(&element) {
            self.inner.elements.push(element);
        }
        self
    }

    /// Sets the impurity tag.
    #[must_use]
    pub fn impurity(mut self, impurity: impl Into<String>) -> Self {
        self.inner.impurity = Some(impurity.into());
        self
    }

    /// Sets the rarity.
    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.inner.rarity = rarity;
        self
    }

    /// Sets the owned quantity.
    #[must_use]
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.inner.quantity = quantity;
        self
    }

    /// Marks the ingredient as a base brewing at the given rarity.
    #[must_use]
    pub fn base(mut self, base_rarity: Rarity) -> Self {
        self.inner.is_base = true;
        self.inner.base_rarity = Some(base_rarity);
        self
    }

    /// Builds the ingredient.
    #[must_use]
    pub fn build(self) -> Ingredient {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_dedupes_elements() {
        let ingredient = Ingredient::builder("ember-moss", "Ember Moss")
            .category(IngredientCategory::Plant)
            .element(Element::Fire)
            .element(Element::Fire)
            .element(Element::Plant)
            .quantity(4)
            .build();

        assert_eq!(ingredient.elements, vec![Element::Fire, Element::Plant]);
        assert!(ingredient.has_element(Element::Plant));
        assert!(!ingredient.has_element(Element::Ice));
        assert!(!ingredient.is_base);
    }

    #[test]
    fn test_base_builder() {
        let base = Ingredient::builder("spring-water", "Spring Water")
            .base(Rarity::Uncommon)
            .build();
        assert!(base.is_base);
        assert_eq!(base.base_rarity, Some(Rarity::Uncommon));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":"salt","name":"Salt","category":"mineral","quantity":3}"#;
        let ingredient: Ingredient = serde_json::from_str(json).expect("valid");
        assert_eq!(ingredient.category, IngredientCategory::Mineral);
        assert!(ingredient.elements.is_empty());
        assert_eq!(ingredient.impurity, None);
        assert_eq!(ingredient.rarity, Rarity::Common);
    }
}
