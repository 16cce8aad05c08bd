//! Subcommand implementations.

use anyhow::{anyhow, Context, Result};
use brewing_common::Rarity;
use brewing_engine::{
    component_options, impurity_effect, ranked_elements, BrewOutcome, BrewRequest, Brewery, Recipe,
    SeededDice, Selections, EXCELLENCE_TABLE, FLAW_TABLE,
};
use tracing::debug;

use crate::config::BrewConfig;
use crate::pantry_loader::Pantry;

/// Options for the `brew` subcommand.
#[derive(Debug, Clone)]
pub struct BrewArgs {
    /// Recipe id or name
    pub recipe: String,
    /// `(component, ingredient)` pairs
    pub selections: Vec<(String, String)>,
    /// Rarity for universal recipes
    pub rarity: Option<Rarity>,
    /// Spend the nullifier
    pub nullify: bool,
    /// Number of attempts
    pub times: u32,
    /// Seed override
    pub seed: Option<u64>,
}

fn find_recipe<'a>(pantry: &'a Pantry, key: &str) -> Result<&'a Recipe> {
    pantry.recipe(key).ok_or_else(|| {
        let known: Vec<&str> = pantry.recipes.iter().map(|r| r.id.as_str()).collect();
        anyhow!("Unknown recipe '{key}'. Known recipes: {}", known.join(", "))
    })
}

/// Prints recipes and held ingredients.
pub fn list(pantry: &Pantry) {
    println!("Recipes:");
    for recipe in &pantry.recipes {
        let rarity = if recipe.universal {
            "any rarity".to_string()
        } else {
            recipe.rarity.to_string()
        };
        println!(
            "  {:<20} {} ({}, {} components)",
            recipe.id.as_str(),
            recipe.name,
            rarity,
            recipe.components.len()
        );
    }

    println!("Ingredients:");
    for ingredient in pantry.inventory.iter() {
        let elements: Vec<&str> = ingredient.elements.iter().map(|e| e.key()).collect();
        let mut line = format!(
            "  {:<20} {} x{} {} [{}]",
            ingredient.id.as_str(),
            ingredient.name,
            ingredient.quantity,
            ingredient.category.display_name(),
            elements.join(", ")
        );
        if let Some(impurity) = &ingredient.impurity {
            line.push_str(&format!(" impurity: {impurity}"));
        }
        if ingredient.is_base {
            line.push_str(" (base)");
        }
        println!("{line}");
    }

    if !pantry.equipment.is_empty() {
        println!("Equipment:");
        for item in &pantry.equipment {
            println!("  {:<20} {} ({:+})", item.id.as_str(), item.name, item.brewing_bonus);
        }
    }
}

/// Prints compatible ingredients for every component of a recipe.
pub fn options(pantry: &Pantry, key: &str, rarity: Option<Rarity>) -> Result<()> {
    let recipe = find_recipe(pantry, key)?;
    let brew_rarity = recipe.effective_rarity(rarity);

    println!(
        "{} ({}, difficulty {})",
        recipe.name,
        brew_rarity,
        recipe.target_difficulty(brew_rarity)
    );
    for (component, candidates) in component_options(recipe, &pantry.inventory, rarity) {
        println!("  {} [{}] needs {}:", component.name, component.id, component.quantity);
        if candidates.is_empty() {
            println!("    (nothing compatible)");
        }
        for ingredient in candidates {
            let short = if ingredient.quantity < component.quantity {
                " (not enough)"
            } else {
                ""
            };
            println!("    {} x{}{}", ingredient.id, ingredient.quantity, short);
        }
    }
    Ok(())
}

/// Runs one or more brew attempts against the loaded pantry.
pub fn brew(pantry: &mut Pantry, config: &BrewConfig, args: &BrewArgs) -> Result<()> {
    let recipe = find_recipe(pantry, &args.recipe)?.clone();

    let mut selections = Selections::new();
    for (component, ingredient) in &args.selections {
        recipe
            .component(&component.as_str().into())
            .with_context(|| format!("Recipe {} has no component '{component}'", recipe.id))?;
        selections.select(component.as_str(), ingredient.as_str());
    }

    let character = config.character(&pantry.equipment);
    let dice = match args.seed.or(config.seed) {
        Some(seed) => SeededDice::with_seed(seed),
        None => SeededDice::new(),
    };
    let mut brewery = Brewery::new(dice).with_nullifier(config.nullifier.as_str());

    let mut request = BrewRequest::new(&recipe, &selections);
    if let Some(rarity) = args.rarity {
        request = request.at_rarity(rarity);
    }
    if args.nullify {
        request = request.with_nullifier();
    }

    for attempt in 1..=args.times {
        debug!("Attempt {attempt} of {}", args.times);
        let outcome = brewery.brew(&request, &mut pantry.inventory, &character)?;
        println!("[{attempt}] {}", outcome.message());
        if matches!(outcome, BrewOutcome::Rejected(_)) {
            break;
        }
    }

    let stats = brewery.stats();
    println!(
        "Attempts: {}  successes: {}  failures: {}  excellent: {}  impure: {}  units used: {}",
        stats.attempts,
        stats.successes,
        stats.failures,
        stats.excellent,
        stats.impurities,
        stats.ingredients_consumed
    );
    for potion in brewery.potions().iter() {
        println!(
            "  {} x{} ({}, {})",
            potion.name,
            potion.quantity,
            potion.rarity,
            potion.brewed_quality.display_name()
        );
    }
    Ok(())
}

/// Prints the flaw, excellence, and impurity tables.
pub fn tables(rarity: Rarity) {
    println!("Flaws (d100):");
    for entry in &FLAW_TABLE {
        println!("  {:>3}-{:<3} {}", entry.min, entry.max, entry.effect);
    }

    println!("Excellence (d100):");
    for entry in &EXCELLENCE_TABLE {
        println!("  {:>3}-{:<3} {}", entry.min, entry.max, entry.effect);
    }

    println!("Impurities at {rarity}:");
    for (element, rank) in ranked_elements() {
        println!("  [{rank}] {:<10} {}", element.key(), impurity_effect(element, rarity));
    }
}
