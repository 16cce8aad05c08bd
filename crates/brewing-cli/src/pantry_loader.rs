//! Pantry data loading.
//!
//! This module provides:
//! - Loading ingredients, recipes, and equipment from a data directory
//! - Definition validation on load
//! - Conversion of string-keyed definitions into engine records
//!
//! Expected layout:
//! - `ingredients.json`: `{ "version": "1.0.0", "ingredients": [...] }`
//! - `recipes.json`: `{ "version": "1.0.0", "recipes": [...] }`
//! - `equipment.json` (optional): `{ "version": "1.0.0", "equipment": [...] }`

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use brewing_common::{BrewError, Element, IngredientId, Rarity};
use brewing_engine::{
    Equipment, Ingredient, IngredientCategory, IngredientInventory, Recipe, RecipeComponent,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Ingredient file name.
pub const INGREDIENTS_FILE: &str = "ingredients.json";
/// Recipe file name.
pub const RECIPES_FILE: &str = "recipes.json";
/// Equipment file name.
pub const EQUIPMENT_FILE: &str = "equipment.json";

/// Errors that can occur during pantry loading.
#[derive(Debug, Error)]
pub enum PantryLoadError {
    /// File not found.
    #[error("Pantry file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read pantry file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse JSON.
    #[error("Failed to parse pantry JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Validation error.
    #[error("Pantry validation error: {0}")]
    ValidationError(String),

    /// Duplicate id.
    #[error("Duplicate {kind} ID: {id}")]
    DuplicateId {
        /// Record kind
        kind: &'static str,
        /// Offending id
        id: String,
    },

    /// Unknown rarity or element.
    #[error(transparent)]
    Data(#[from] BrewError),
}

/// Result type for pantry loading operations.
pub type PantryLoadResult<T> = Result<T, PantryLoadError>;

fn default_rarity() -> String {
    "common".to_string()
}

const fn default_quantity() -> u32 {
    1
}

fn parse_elements(keys: &[String]) -> PantryLoadResult<Vec<Element>> {
    keys.iter()
        .map(|key| key.parse::<Element>().map_err(PantryLoadError::from))
        .collect()
}

// ============================================================================
// Definitions
// ============================================================================

/// An ingredient definition from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDefinition {
    /// Unique ingredient identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Ingredient category.
    #[serde(default)]
    pub category: IngredientCategory,
    /// Legacy item type tag.
    #[serde(default)]
    pub item_type: Option<String>,
    /// Element keys.
    #[serde(default)]
    pub elements: Vec<String>,
    /// Free-form impurity tag.
    #[serde(default)]
    pub impurity: Option<String>,
    /// Rarity name.
    #[serde(default = "default_rarity")]
    pub rarity: String,
    /// Units held.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Whether this ingredient is a base.
    #[serde(default)]
    pub is_base: bool,
    /// Rarity tier the base anchors.
    #[serde(default)]
    pub base_rarity: Option<String>,
}

impl IngredientDefinition {
    /// Validates the ingredient definition.
    pub fn validate(&self) -> PantryLoadResult<()> {
        if self.id.trim().is_empty() {
            return Err(PantryLoadError::ValidationError(format!(
                "Ingredient '{}' has empty id",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(PantryLoadError::ValidationError(format!(
                "Ingredient {} has empty name",
                self.id
            )));
        }
        if self.base_rarity.is_some() && !self.is_base {
            return Err(PantryLoadError::ValidationError(format!(
                "Ingredient {} has base_rarity but is not a base",
                self.id
            )));
        }
        Ok(())
    }

    /// Converts to an engine ingredient.
    pub fn to_ingredient(&self) -> PantryLoadResult<Ingredient> {
        let mut builder = Ingredient::builder(self.id.as_str(), &self.name)
            .category(self.category)
            .rarity(self.rarity.parse::<Rarity>()?)
            .quantity(self.quantity);

        for element in parse_elements(&self.elements)? {
            builder = builder.element(element);
        }
        if let Some(item_type) = &self.item_type {
            builder = builder.item_type(item_type);
        }
        if let Some(impurity) = &self.impurity {
            builder = builder.impurity(impurity);
        }

        let mut ingredient = builder.build();
        if self.is_base {
            ingredient.is_base = true;
            ingredient.base_rarity = self
                .base_rarity
                .as_deref()
                .map(str::parse::<Rarity>)
                .transpose()?;
        }
        Ok(ingredient)
    }
}

/// A recipe component definition from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Component identifier, unique within the recipe.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether this slot takes a base.
    #[serde(default)]
    pub base: bool,
    /// Required element keys.
    #[serde(default)]
    pub elements: Vec<String>,
    /// Accepted categories (empty = any).
    #[serde(default)]
    pub categories: Vec<IngredientCategory>,
    /// Accepted item types (empty = any).
    #[serde(default)]
    pub types: Vec<String>,
    /// Units consumed on success.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// A recipe definition from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Unique recipe identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Effect text.
    #[serde(default)]
    pub effect: String,
    /// Recipe description.
    #[serde(default)]
    pub description: String,
    /// Rarity name.
    #[serde(default = "default_rarity")]
    pub rarity: String,
    /// Rarity is chosen at brew time.
    #[serde(default)]
    pub universal: bool,
    /// Cosmetic type descriptor.
    #[serde(default)]
    pub potion_type: String,
    /// Cosmetic quality descriptor.
    #[serde(default)]
    pub potion_quality: String,
    /// Component slots.
    pub components: Vec<ComponentDefinition>,
}

impl RecipeDefinition {
    /// Validates the recipe definition.
    pub fn validate(&self) -> PantryLoadResult<()> {
        if self.name.trim().is_empty() {
            return Err(PantryLoadError::ValidationError(format!(
                "Recipe {} has empty name",
                self.id
            )));
        }

        if self.components.is_empty() {
            return Err(PantryLoadError::ValidationError(format!(
                "Recipe {} has no components",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for component in &self.components {
            if component.quantity == 0 {
                return Err(PantryLoadError::ValidationError(format!(
                    "Recipe {} component {} has zero quantity",
                    self.id, component.id
                )));
            }
            if !seen.insert(component.id.as_str()) {
                return Err(PantryLoadError::DuplicateId {
                    kind: "component",
                    id: format!("{}/{}", self.id, component.id),
                });
            }
        }

        Ok(())
    }

    /// Converts to an engine recipe.
    pub fn to_recipe(&self) -> PantryLoadResult<Recipe> {
        let mut builder = Recipe::builder(self.id.as_str(), &self.name)
            .rarity(self.rarity.parse::<Rarity>()?)
            .effect(&self.effect)
            .description(&self.description)
            .descriptors(&self.potion_type, &self.potion_quality);
        if self.universal {
            builder = builder.universal();
        }

        for def in &self.components {
            let component = if def.base {
                RecipeComponent::base(def.id.as_str(), &def.name, def.quantity)
            } else {
                RecipeComponent::elements(
                    def.id.as_str(),
                    &def.name,
                    &parse_elements(&def.elements)?,
                    def.quantity,
                )
            };
            builder = builder.component(
                component
                    .with_categories(&def.categories)
                    .with_types(def.types.as_slice()),
            );
        }

        Ok(builder.build())
    }
}

#[derive(Debug, Deserialize)]
struct IngredientFile {
    ingredients: Vec<IngredientDefinition>,
}

#[derive(Debug, Deserialize)]
struct RecipeFile {
    recipes: Vec<RecipeDefinition>,
}

#[derive(Debug, Deserialize)]
struct EquipmentFile {
    equipment: Vec<Equipment>,
}

// ============================================================================
// Pantry
// ============================================================================

/// Everything loaded from a data directory.
#[derive(Debug, Clone, Default)]
pub struct Pantry {
    /// Held ingredients
    pub inventory: IngredientInventory,
    /// Known recipes, in file order
    pub recipes: Vec<Recipe>,
    /// Available equipment
    pub equipment: Vec<Equipment>,
}

impl Pantry {
    /// Finds a recipe by id, or by name (case-insensitive).
    #[must_use]
    pub fn recipe(&self, key: &str) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id.as_str() == key)
            .or_else(|| {
                let lower = key.to_lowercase();
                self.recipes.iter().find(|r| r.name.to_lowercase() == lower)
            })
    }

    fn register_recipe(&mut self, recipe: Recipe) -> PantryLoadResult<()> {
        if self.recipes.iter().any(|r| r.id == recipe.id) {
            return Err(PantryLoadError::DuplicateId {
                kind: "recipe",
                id: recipe.id.to_string(),
            });
        }
        self.recipes.push(recipe);
        Ok(())
    }

    /// Registers an ingredient. `seen` tracks every id already defined,
    /// including zero-stock records the inventory never holds.
    fn register_ingredient(
        &mut self,
        ingredient: Ingredient,
        seen: &mut HashSet<IngredientId>,
    ) -> PantryLoadResult<()> {
        if !seen.insert(ingredient.id.clone()) {
            return Err(PantryLoadError::DuplicateId {
                kind: "ingredient",
                id: ingredient.id.to_string(),
            });
        }
        self.inventory.insert(ingredient);
        Ok(())
    }
}

/// Statistics for the pantry loader.
#[derive(Debug, Default, Clone)]
pub struct PantryLoaderStats {
    /// Number of files loaded.
    pub files_loaded: u32,
    /// Number of ingredients loaded.
    pub ingredients_loaded: u32,
    /// Number of recipes loaded.
    pub recipes_loaded: u32,
    /// Number of equipment entries loaded.
    pub equipment_loaded: u32,
    /// Number of definitions skipped for errors.
    pub validation_errors: u32,
}

/// Pantry loader for a data directory.
pub struct PantryLoader {
    /// Directory holding the pantry files.
    base_path: PathBuf,
    /// Statistics.
    stats: PantryLoaderStats,
}

impl PantryLoader {
    /// Creates a new pantry loader.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        debug!("Initializing pantry loader at: {:?}", base_path);

        Self {
            base_path,
            stats: PantryLoaderStats::default(),
        }
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &PantryLoaderStats {
        &self.stats
    }

    /// Loads the pantry.
    ///
    /// Missing ingredient or recipe files are errors; a missing equipment
    /// file is not. Definitions that fail validation or repeat an id are
    /// skipped with a warning. An unknown rarity or element name aborts the
    /// load with [`PantryLoadError::Data`].
    pub fn load(&mut self) -> PantryLoadResult<Pantry> {
        let mut pantry = Pantry::default();

        let ingredients: IngredientFile = self.read_json(INGREDIENTS_FILE)?;
        let mut seen = HashSet::new();
        for def in ingredients.ingredients {
            let result = def
                .validate()
                .and_then(|()| def.to_ingredient())
                .and_then(|ingredient| pantry.register_ingredient(ingredient, &mut seen));
            match result {
                Ok(()) => self.stats.ingredients_loaded += 1,
                Err(e @ PantryLoadError::Data(_)) => return Err(e),
                Err(e) => self.skip("ingredient", &def.id, &e),
            }
        }

        let recipes: RecipeFile = self.read_json(RECIPES_FILE)?;
        for def in recipes.recipes {
            let result = def
                .validate()
                .and_then(|()| def.to_recipe())
                .and_then(|recipe| pantry.register_recipe(recipe));
            match result {
                Ok(()) => self.stats.recipes_loaded += 1,
                Err(e @ PantryLoadError::Data(_)) => return Err(e),
                Err(e) => self.skip("recipe", &def.id, &e),
            }
        }

        if self.base_path.join(EQUIPMENT_FILE).exists() {
            let equipment: EquipmentFile = self.read_json(EQUIPMENT_FILE)?;
            for item in equipment.equipment {
                if pantry.equipment.iter().any(|e| e.id == item.id) {
                    let e = PantryLoadError::DuplicateId {
                        kind: "equipment",
                        id: item.id.to_string(),
                    };
                    self.skip("equipment", item.id.as_str(), &e);
                    continue;
                }
                pantry.equipment.push(item);
                self.stats.equipment_loaded += 1;
            }
        }

        info!(
            "Loaded {} ingredients, {} recipes, {} equipment from {} files",
            self.stats.ingredients_loaded,
            self.stats.recipes_loaded,
            self.stats.equipment_loaded,
            self.stats.files_loaded
        );

        Ok(pantry)
    }

    fn read_json<T: DeserializeOwned>(&mut self, file: &str) -> PantryLoadResult<T> {
        let path = self.base_path.join(file);
        if !path.exists() {
            return Err(PantryLoadError::NotFound(path));
        }

        debug!("Loading pantry file: {:?}", path);
        let content = fs::read_to_string(&path)?;
        let parsed = serde_json::from_str(&content)?;
        self.stats.files_loaded += 1;
        Ok(parsed)
    }

    fn skip(&mut self, kind: &str, id: &str, error: &PantryLoadError) {
        warn!("Skipping {} {}: {}", kind, id, error);
        self.stats.validation_errors += 1;
    }
}

/// Loads a pantry from a directory.
pub fn load_pantry(path: &Path) -> PantryLoadResult<Pantry> {
    PantryLoader::new(path).load()
}
