//! Ingredient-to-component compatibility.
//!
//! Two predicates: [`is_compatible`] answers whether an ingredient could ever
//! fill a slot and drives option lists; [`is_selectable`] adds the stock check
//! and validates a committed selection.

use crate::ingredient::Ingredient;
use crate::inventory::IngredientInventory;
use crate::recipe::{MatchContext, RecipeComponent};

/// Checks whether an ingredient may fill a component slot, ignoring stock.
#[must_use]
pub fn is_compatible(
    ingredient: &Ingredient,
    component: &RecipeComponent,
    ctx: MatchContext,
) -> bool {
    if component.base {
        return base_matches(ingredient, component, ctx);
    }

    let elements_ok = component
        .required_elements
        .iter()
        .all(|e| ingredient.has_element(*e));
    let category_ok =
        component.categories.is_empty() || component.categories.contains(&ingredient.category);

    elements_ok && category_ok && type_matches(ingredient, component)
}

/// Checks compatibility and that enough stock is held for one brew.
#[must_use]
pub fn is_selectable(
    ingredient: &Ingredient,
    component: &RecipeComponent,
    ctx: MatchContext,
) -> bool {
    ingredient.quantity >= component.quantity && is_compatible(ingredient, component, ctx)
}

/// Lists inventory ingredients compatible with a slot, in id order.
#[must_use]
pub fn compatible_ingredients<'a>(
    inventory: &'a IngredientInventory,
    component: &RecipeComponent,
    ctx: MatchContext,
) -> Vec<&'a Ingredient> {
    inventory
        .iter()
        .filter(|i| is_compatible(i, component, ctx))
        .collect()
}

fn base_matches(ingredient: &Ingredient, component: &RecipeComponent, ctx: MatchContext) -> bool {
    if !ingredient.is_base {
        return false;
    }
    if ctx.universal {
        return ingredient.base_rarity == Some(ctx.rarity);
    }
    type_matches(ingredient, component)
}

fn type_matches(ingredient: &Ingredient, component: &RecipeComponent) -> bool {
    if component.types.is_empty() {
        return true;
    }
    ingredient
        .item_type
        .as_deref()
        .is_some_and(|t| component.types.iter().any(|allowed| allowed == t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::IngredientCategory;
    use brewing_common::{Element, Rarity};

    const FIXED: MatchContext = MatchContext::fixed(Rarity::Common);

    fn ember_moss() -> Ingredient {
        Ingredient::builder("ember-moss", "Ember Moss")
            .category(IngredientCategory::Plant)
            .element(Element::Fire)
            .element(Element::Plant)
            .quantity(3)
            .build()
    }

    fn spring_water(rarity: Rarity) -> Ingredient {
        Ingredient::builder("spring-water", "Spring Water")
            .item_type("water")
            .base(rarity)
            .quantity(2)
            .build()
    }

    #[test]
    fn test_elements_are_subset_match() {
        let slot = RecipeComponent::elements("heat", "Heat", &[Element::Fire], 1);
        assert!(is_compatible(&ember_moss(), &slot, FIXED));

        let both = RecipeComponent::elements("both", "Both", &[Element::Plant, Element::Fire], 1);
        assert!(is_compatible(&ember_moss(), &both, FIXED));

        let cold = RecipeComponent::elements("cold", "Cold", &[Element::Fire, Element::Ice], 1);
        assert!(!is_compatible(&ember_moss(), &cold, FIXED));
    }

    #[test]
    fn test_empty_slot_accepts_anything_non_base() {
        let slot = RecipeComponent::elements("any", "Any", &[], 1);
        assert!(is_compatible(&ember_moss(), &slot, FIXED));
    }

    #[test]
    fn test_category_restriction() {
        let slot = RecipeComponent::elements("heat", "Heat", &[Element::Fire], 1)
            .with_categories(&[IngredientCategory::Mineral]);
        assert!(!is_compatible(&ember_moss(), &slot, FIXED));

        let slot = slot.with_categories(&[IngredientCategory::Mineral, IngredientCategory::Plant]);
        assert!(is_compatible(&ember_moss(), &slot, FIXED));
    }

    #[test]
    fn test_legacy_type_restriction() {
        let slot = RecipeComponent::elements("heat", "Heat", &[], 1).with_types(&["herb"]);
        assert!(!is_compatible(&ember_moss(), &slot, FIXED));

        let typed = Ingredient::builder("sage", "Sage")
            .item_type("herb")
            .quantity(1)
            .build();
        assert!(is_compatible(&typed, &slot, FIXED));
    }

    #[test]
    fn test_base_slot_requires_base() {
        let slot = RecipeComponent::base("base", "Base", 1);
        assert!(!is_compatible(&ember_moss(), &slot, FIXED));
        assert!(is_compatible(&spring_water(Rarity::Rare), &slot, FIXED));
    }

    #[test]
    fn test_base_slot_type_restriction() {
        let slot = RecipeComponent::base("base", "Base", 1).with_types(&["oil"]);
        assert!(!is_compatible(&spring_water(Rarity::Common), &slot, FIXED));

        let slot = RecipeComponent::base("base", "Base", 1).with_types(&["oil", "water"]);
        assert!(is_compatible(&spring_water(Rarity::Common), &slot, FIXED));
    }

    #[test]
    fn test_universal_base_matches_brewing_rarity() {
        let slot = RecipeComponent::base("base", "Base", 1).with_types(&["oil"]);
        let water = spring_water(Rarity::Rare);

        assert!(is_compatible(&water, &slot, MatchContext::universal(Rarity::Rare)));
        assert!(!is_compatible(&water, &slot, MatchContext::universal(Rarity::Common)));
    }

    #[test]
    fn test_base_ingredient_in_regular_slot() {
        let slot = RecipeComponent::elements("any", "Any", &[], 1);
        assert!(is_compatible(&spring_water(Rarity::Common), &slot, FIXED));
    }

    #[test]
    fn test_selectable_requires_stock() {
        let slot = RecipeComponent::elements("heat", "Heat", &[Element::Fire], 3);
        assert!(is_selectable(&ember_moss(), &slot, FIXED));

        let greedy = RecipeComponent::elements("heat", "Heat", &[Element::Fire], 4);
        assert!(is_compatible(&ember_moss(), &greedy, FIXED));
        assert!(!is_selectable(&ember_moss(), &greedy, FIXED));
    }

    #[test]
    fn test_compatible_ingredients_lists_matches() {
        let inventory: IngredientInventory = [ember_moss(), spring_water(Rarity::Common)]
            .into_iter()
            .collect();

        let heat = RecipeComponent::elements("heat", "Heat", &[Element::Fire], 10);
        let options = compatible_ingredients(&inventory, &heat, FIXED);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "Ember Moss");

        let base = RecipeComponent::base("base", "Base", 1);
        let options = compatible_ingredients(&inventory, &base, FIXED);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "Spring Water");
    }
}
