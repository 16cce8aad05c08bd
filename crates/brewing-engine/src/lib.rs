//! # Brewing Engine
//!
//! Potion brewing resolution.
//!
//! This crate turns a recipe, a set of ingredient selections, and a brewer
//! into a potion:
//! - Ingredients and the shared ingredient inventory
//! - Recipes, components, and difficulty derivation
//! - Ingredient/component compatibility matching
//! - Dice sources (seeded and scripted)
//! - Outcome resolution in `ttrpg` and `percentage` modes
//! - Flaw and excellence tables
//! - Impurity dominance and side-effects
//! - The brew transaction and the potion stash

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod brewing;
pub mod character;
pub mod compatibility;
pub mod dice;
pub mod impurity;
pub mod ingredient;
pub mod inventory;
pub mod outcome;
pub mod potion;
pub mod recipe;
pub mod tables;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::brewing::*;
    pub use crate::character::*;
    pub use crate::compatibility::*;
    pub use crate::dice::*;
    pub use crate::impurity::*;
    pub use crate::ingredient::*;
    pub use crate::inventory::*;
    pub use crate::outcome::*;
    pub use crate::potion::*;
    pub use crate::recipe::*;
    pub use crate::tables::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use brewing_common::{Element, Rarity};

    fn pantry() -> IngredientInventory {
        [
            Ingredient::builder("sunpetal", "Sunpetal")
                .category(IngredientCategory::Plant)
                .element(Element::Life)
                .element(Element::Light)
                .quantity(4)
                .build(),
            Ingredient::builder("grave-dust", "Grave Dust")
                .category(IngredientCategory::Mineral)
                .element(Element::Life)
                .impurity("necrotic")
                .quantity(4)
                .build(),
            Ingredient::builder("spring-water", "Spring Water")
                .base(Rarity::Common)
                .item_type("water")
                .quantity(2)
                .build(),
        ]
        .into_iter()
        .collect()
    }

    fn healing() -> Recipe {
        Recipe::builder("healing", "Potion of Healing")
            .rarity(Rarity::Common)
            .effect("Regain 2d4 + 2 hit points.")
            .component(RecipeComponent::base("base", "Water Base", 1).with_types(&["water"]))
            .component(RecipeComponent::elements("vital", "Vital Essence", &[Element::Life], 2))
            .build()
    }

    #[test]
    fn test_brew_healing_end_to_end() {
        let recipe = healing();
        let mut inventory = pantry();
        let selections = Selections::new()
            .with("base", "spring-water")
            .with("vital", "sunpetal");
        let brewer = Character::new("Ilse")
            .with_proficiency(2)
            .with_mode(ResolutionMode::Ttrpg);
        let mut brewery = Brewery::new(ScriptedDice::rolls(&[10]));

        let outcome = brewery
            .brew(&BrewRequest::new(&recipe, &selections), &mut inventory, &brewer)
            .expect("no data errors");

        assert!(outcome.is_success());
        assert_eq!(inventory.count(&"spring-water".into()), 1);
        assert_eq!(inventory.count(&"sunpetal".into()), 2);
        assert_eq!(brewery.potions().total(), 1);
        assert_eq!(brewery.stats().attempts, 1);
    }

    #[test]
    fn test_options_then_brew_with_impure_choice() {
        let recipe = healing();
        let mut inventory = pantry();

        let options = component_options(&recipe, &inventory, None);
        let vital: Vec<&str> = options[1].1.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(vital, vec!["grave-dust", "sunpetal"]);

        let selections = Selections::new()
            .with("base", "spring-water")
            .with("vital", "grave-dust");
        let mut brewery = Brewery::new(ScriptedDice::rolls(&[12]));
        let outcome = brewery
            .brew(
                &BrewRequest::new(&recipe, &selections),
                &mut inventory,
                &Character::new("Ilse").with_mode(ResolutionMode::Ttrpg),
            )
            .expect("no data errors");

        let report = outcome.report().expect("brewed");
        assert_eq!(
            report.impurity.as_ref().and_then(|i| i.element),
            Some(Element::Necrotic)
        );
        assert!(report.potion.is_special());
        assert!(report.message().contains("Impurity:"));
    }
}
