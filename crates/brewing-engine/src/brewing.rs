//! The brew transaction.
//!
//! A brew attempt runs as one linear transaction:
//! 1. Validate that every component has a compatible, stocked selection
//! 2. Derive difficulty from rarity and the brewer's total bonus
//! 3. Resolve the outcome
//! 4. Resolve the dominant impurity (skipped when the nullifier is used)
//! 5. Debit the inventory: full quantities on success, half (rounded up) on failure
//! 6. Emit a potion into the stash
//! 7. Update statistics
//!
//! Player mistakes (missing selections, short stock) come back as a
//! [`BrewRejection`] and leave the inventory untouched. Data-integrity
//! problems are returned as [`BrewError`].

use brewing_common::{BrewError, BrewResult, ComponentId, IngredientId, Rarity, RecipeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::character::BrewerProfile;
use crate::compatibility::{compatible_ingredients, is_selectable};
use crate::dice::{DiceSource, SeededDice};
use crate::impurity::{resolve_impurity, ResolvedImpurity};
use crate::ingredient::Ingredient;
use crate::inventory::{IngredientInventory, SharedInventory};
use crate::outcome::{resolve, BrewedQuality, RollTrace};
use crate::potion::{Potion, PotionStash};
use crate::recipe::{MatchContext, Recipe, RecipeComponent};

/// Ingredient id of the impurity nullifier unless configured otherwise.
pub const DEFAULT_NULLIFIER_ID: &str = "nullify-impurity";

// ============================================================================
// Requests
// ============================================================================

/// The ingredient chosen for each component of one brew attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    chosen: BTreeMap<ComponentId, IngredientId>,
}

impl Selections {
    /// Creates an empty selection set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses an ingredient for a component, replacing any earlier choice.
    pub fn select(
        &mut self,
        component: impl Into<ComponentId>,
        ingredient: impl Into<IngredientId>,
    ) {
        self.chosen.insert(component.into(), ingredient.into());
    }

    /// Builder form of [`Selections::select`].
    #[must_use]
    pub fn with(
        mut self,
        component: impl Into<ComponentId>,
        ingredient: impl Into<IngredientId>,
    ) -> Self {
        self.select(component, ingredient);
        self
    }

    /// Returns the ingredient chosen for a component.
    #[must_use]
    pub fn get(&self, component: &ComponentId) -> Option<&IngredientId> {
        self.chosen.get(component)
    }

    /// Number of components with a choice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    /// Checks if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }
}

/// One brew attempt.
#[derive(Debug, Clone, Copy)]
pub struct BrewRequest<'a> {
    /// Recipe to brew
    pub recipe: &'a Recipe,
    /// Chosen ingredients
    pub selections: &'a Selections,
    /// Rarity to brew a universal recipe at
    pub brewing_rarity: Option<Rarity>,
    /// Spend one nullifier to suppress impurities
    pub use_nullifier: bool,
}

impl<'a> BrewRequest<'a> {
    /// Creates a request at the recipe's own rarity without the nullifier.
    #[must_use]
    pub fn new(recipe: &'a Recipe, selections: &'a Selections) -> Self {
        Self {
            recipe,
            selections,
            brewing_rarity: None,
            use_nullifier: false,
        }
    }

    /// Brews a universal recipe at the given rarity.
    #[must_use]
    pub fn at_rarity(mut self, rarity: Rarity) -> Self {
        self.brewing_rarity = Some(rarity);
        self
    }

    /// Spends a nullifier on this attempt.
    #[must_use]
    pub fn with_nullifier(mut self) -> Self {
        self.use_nullifier = true;
        self
    }

    /// Rarity the attempt runs at.
    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.recipe.effective_rarity(self.brewing_rarity)
    }

    /// Matcher context for the attempt.
    #[must_use]
    pub fn match_context(&self) -> MatchContext {
        self.recipe.match_context(self.brewing_rarity)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Why a brew attempt was refused before any roll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrewRejection {
    /// Components without a compatible, stocked selection
    #[error("Missing ingredients: {}", components.join(", "))]
    MissingIngredients {
        /// Names of the unmet components
        components: Vec<String>,
    },
    /// The nullifier was requested but none is held
    #[error("No {ingredient} left to nullify impurities")]
    InsufficientNullifier {
        /// Nullifier ingredient id
        ingredient: IngredientId,
    },
}

/// Everything that happened in a completed brew attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BrewReport {
    /// Recipe brewed
    pub recipe_id: RecipeId,
    /// Whether the brew succeeded
    pub success: bool,
    /// Quality achieved
    pub quality: BrewedQuality,
    /// Rarity the brew ran at
    pub rarity: Rarity,
    /// Target difficulty
    pub difficulty: i32,
    /// Roll trace
    pub trace: RollTrace,
    /// Dominant impurity, if one manifested
    pub impurity: Option<ResolvedImpurity>,
    /// Inventory lines debited
    pub consumed: Vec<(IngredientId, u32)>,
    /// The potion produced
    pub potion: Potion,
    /// Index of the stash stack holding the potion
    pub stack_index: usize,
}

impl BrewReport {
    /// Human-readable summary of the attempt.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = if self.success {
            format!(
                "Brewed {} ({} quality).",
                self.potion.name,
                self.quality.display_name().to_lowercase()
            )
        } else {
            format!("The {} brew failed.", self.potion.name)
        };

        message.push_str(&format!(
            " Rolled {} {:+} = {} against difficulty {}.",
            self.trace.natural, self.trace.bonus, self.trace.total, self.difficulty
        ));
        if let (Some(chance), Some(draw)) = (self.trace.success_chance, self.trace.percentile) {
            message.push_str(&format!(" Chance {chance:.0}%, drew {draw:.1}."));
        }
        if let Some(excellence) = &self.potion.excellence_effect {
            message.push_str(&format!(" Excellence: {excellence}"));
        }
        if let Some(flaw) = &self.potion.flaw_effect {
            message.push_str(&format!(" Flaw: {flaw}"));
        }
        if let Some(impurity) = &self.potion.impurity_effect {
            message.push_str(&format!(" Impurity: {impurity}"));
        }
        message
    }
}

/// Result of a brew attempt that did not hit a data-integrity error.
#[derive(Debug, Clone, PartialEq)]
pub enum BrewOutcome {
    /// The attempt ran; the potion may be poor.
    Brewed(Box<BrewReport>),
    /// The attempt was refused and nothing changed.
    Rejected(BrewRejection),
}

impl BrewOutcome {
    /// Checks whether the brew ran and succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Brewed(report) if report.success)
    }

    /// Returns the report if the brew ran.
    #[must_use]
    pub fn report(&self) -> Option<&BrewReport> {
        match self {
            Self::Brewed(report) => Some(report),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection if the brew was refused.
    #[must_use]
    pub fn rejection(&self) -> Option<&BrewRejection> {
        match self {
            Self::Brewed(_) => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }

    /// Human-readable message for either case.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Brewed(report) => report.message(),
            Self::Rejected(rejection) => rejection.to_string(),
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Running brewing statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewStats {
    /// Attempts that reached the roll
    pub attempts: u64,
    /// Successful brews
    pub successes: u64,
    /// Failed brews
    pub failures: u64,
    /// Natural 20 brews
    pub excellent: u64,
    /// Attempts refused before the roll
    pub rejected: u64,
    /// Ingredient units consumed
    pub ingredients_consumed: u64,
    /// Brews where an impurity manifested
    pub impurities: u64,
    /// Attempts per recipe
    pub brews_by_recipe: HashMap<RecipeId, u32>,
}

impl BrewStats {
    /// Creates new empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a brew that reached the roll.
    pub fn record_brew(&mut self, report: &BrewReport) {
        self.attempts += 1;
        if report.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        if report.quality == BrewedQuality::Excellent {
            self.excellent += 1;
        }
        if report.impurity.is_some() {
            self.impurities += 1;
        }
        self.ingredients_consumed += report
            .consumed
            .iter()
            .map(|(_, q)| u64::from(*q))
            .sum::<u64>();
        *self.brews_by_recipe.entry(report.recipe_id.clone()).or_insert(0) += 1;
    }

    /// Records a refused attempt.
    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    /// Fraction of attempts that succeeded.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.successes as f64 / self.attempts as f64
        }
    }

    /// Returns the most brewed recipe.
    #[must_use]
    pub fn most_brewed_recipe(&self) -> Option<(&RecipeId, u32)> {
        self.brews_by_recipe
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(id, count)| (id, *count))
    }
}

// ============================================================================
// Brewery
// ============================================================================

/// A validated attempt, ready to roll.
struct BrewPlan<'a> {
    /// Selected ingredient per component, in recipe order
    lines: Vec<(&'a RecipeComponent, &'a Ingredient)>,
}

/// The brewing station: dice, potion stash, and statistics.
#[derive(Debug)]
pub struct Brewery<D: DiceSource = SeededDice> {
    dice: D,
    nullifier: IngredientId,
    potions: PotionStash,
    stats: BrewStats,
}

impl Default for Brewery<SeededDice> {
    fn default() -> Self {
        Self::new(SeededDice::new())
    }
}

impl<D: DiceSource> Brewery<D> {
    /// Creates a brewery rolling with the given dice.
    #[must_use]
    pub fn new(dice: D) -> Self {
        Self {
            dice,
            nullifier: IngredientId::new(DEFAULT_NULLIFIER_ID),
            potions: PotionStash::new(),
            stats: BrewStats::new(),
        }
    }

    /// Sets the ingredient that nullifies impurities.
    #[must_use]
    pub fn with_nullifier(mut self, id: impl Into<IngredientId>) -> Self {
        self.nullifier = id.into();
        self
    }

    /// Ingredient that nullifies impurities.
    #[must_use]
    pub fn nullifier(&self) -> &IngredientId {
        &self.nullifier
    }

    /// Potions brewed so far.
    #[must_use]
    pub fn potions(&self) -> &PotionStash {
        &self.potions
    }

    /// Brewing statistics.
    #[must_use]
    pub fn stats(&self) -> &BrewStats {
        &self.stats
    }

    /// The dice in use.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Runs a brew attempt against an inventory.
    pub fn brew(
        &mut self,
        request: &BrewRequest<'_>,
        inventory: &mut IngredientInventory,
        brewer: &impl BrewerProfile,
    ) -> BrewResult<BrewOutcome> {
        let recipe = request.recipe;

        let plan = match self.validate(request, inventory) {
            Ok(plan) => plan,
            Err(rejection) => {
                warn!("Brew of {} rejected: {}", recipe.id, rejection);
                self.stats.record_rejection();
                return Ok(BrewOutcome::Rejected(rejection));
            },
        };

        let rarity = request.rarity();
        let difficulty = recipe.target_difficulty(rarity);
        let bonus = brewer.total_bonus();
        let mode = brewer.resolution_mode();

        let outcome = resolve(difficulty, bonus, mode, &mut self.dice)?;
        debug!(
            "Brew {} ({}): natural {} {:+} vs {} -> {:?}",
            recipe.id, mode, outcome.trace.natural, bonus, difficulty, outcome.quality
        );

        let impurity = if request.use_nullifier {
            None
        } else {
            resolve_impurity(plan.lines.iter().map(|(_, ingredient)| *ingredient), rarity)
        };

        let mut consumed: Vec<(IngredientId, u32)> = plan
            .lines
            .iter()
            .map(|(component, ingredient)| {
                let amount = if outcome.success {
                    component.quantity
                } else {
                    component.failure_loss()
                };
                (ingredient.id.clone(), amount)
            })
            .collect();
        if request.use_nullifier {
            consumed.push((self.nullifier.clone(), 1));
        }

        inventory.debit_all(&consumed).map_err(BrewError::from)?;
        debug!("Debited {:?}", consumed);

        let potion = Potion {
            recipe_id: recipe.id.clone(),
            name: recipe.name.clone(),
            effect: recipe.effect.clone(),
            rarity,
            potion_type: recipe.potion_type.clone(),
            brewed_quality: outcome.quality,
            flaw_effect: outcome.flaw.map(str::to_string),
            excellence_effect: outcome.excellence.map(str::to_string),
            impurity_effect: impurity.as_ref().map(|i| i.effect.clone()),
            quantity: 1,
            roll: outcome.trace,
        };
        let stack_index = self.potions.add(potion.clone());

        let report = BrewReport {
            recipe_id: recipe.id.clone(),
            success: outcome.success,
            quality: outcome.quality,
            rarity,
            difficulty,
            trace: outcome.trace,
            impurity,
            consumed,
            potion,
            stack_index,
        };
        self.stats.record_brew(&report);
        info!("{}", report.message());

        Ok(BrewOutcome::Brewed(Box::new(report)))
    }

    /// Runs a brew attempt holding the inventory lock from validation to debit.
    pub fn brew_shared(
        &mut self,
        request: &BrewRequest<'_>,
        inventory: &SharedInventory,
        brewer: &impl BrewerProfile,
    ) -> BrewResult<BrewOutcome> {
        let mut guard = inventory.lock();
        self.brew(request, &mut guard, brewer)
    }

    /// Checks selections and stock without rolling.
    pub fn check(
        &self,
        request: &BrewRequest<'_>,
        inventory: &IngredientInventory,
    ) -> Result<(), BrewRejection> {
        self.validate(request, inventory).map(|_| ())
    }

    fn validate<'a>(
        &self,
        request: &BrewRequest<'a>,
        inventory: &'a IngredientInventory,
    ) -> Result<BrewPlan<'a>, BrewRejection> {
        let ctx = request.match_context();
        let mut lines = Vec::with_capacity(request.recipe.components.len());
        let mut missing = Vec::new();

        for component in &request.recipe.components {
            let chosen = request
                .selections
                .get(&component.id)
                .and_then(|id| inventory.get(id))
                .filter(|ingredient| is_selectable(ingredient, component, ctx));
            match chosen {
                Some(ingredient) => lines.push((component, ingredient)),
                None => missing.push(component.name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(BrewRejection::MissingIngredients {
                components: missing,
            });
        }

        if request.use_nullifier && !inventory.has(&self.nullifier, 1) {
            return Err(BrewRejection::InsufficientNullifier {
                ingredient: self.nullifier.clone(),
            });
        }

        // Components sharing an ingredient must fit in its stock together.
        let mut demand: BTreeMap<&IngredientId, u32> = BTreeMap::new();
        for (component, ingredient) in &lines {
            *demand.entry(&ingredient.id).or_insert(0) += component.quantity;
        }
        if request.use_nullifier {
            *demand.entry(&self.nullifier).or_insert(0) += 1;
        }

        let short: Vec<&IngredientId> = demand
            .into_iter()
            .filter(|(id, needed)| inventory.count(id) < *needed)
            .map(|(id, _)| id)
            .collect();
        if !short.is_empty() {
            let components: Vec<String> = lines
                .iter()
                .filter(|(_, ingredient)| short.contains(&&ingredient.id))
                .map(|(component, _)| component.name.clone())
                .collect();
            if components.is_empty() {
                return Err(BrewRejection::InsufficientNullifier {
                    ingredient: self.nullifier.clone(),
                });
            }
            return Err(BrewRejection::MissingIngredients { components });
        }

        Ok(BrewPlan { lines })
    }
}

/// Compatible inventory options for every component of a recipe.
#[must_use]
pub fn component_options<'a>(
    recipe: &'a Recipe,
    inventory: &'a IngredientInventory,
    brewing_rarity: Option<Rarity>,
) -> Vec<(&'a RecipeComponent, Vec<&'a Ingredient>)> {
    let ctx = recipe.match_context(brewing_rarity);
    recipe
        .components
        .iter()
        .map(|component| (component, compatible_ingredients(inventory, component, ctx)))
        .collect()
}
