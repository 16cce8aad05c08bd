//! Error types for the brewing engine.
//!
//! These are data-integrity failures: malformed upstream records or an
//! internal roll outside its table. They are never produced by ordinary
//! player input, which is reported as a structured rejection instead.

use thiserror::Error;

/// Top-level error type for brewing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrewError {
    /// A rarity string that is not one of the six tiers
    #[error("Unknown rarity tier: {0:?}")]
    UnknownRarity(String),

    /// An element string outside the element catalog
    #[error("Unknown element: {0:?}")]
    UnknownElement(String),

    /// A roll that no entry of a range table covers
    #[error("Roll {roll} is outside the {table} table")]
    RollOutOfRange {
        /// Table that was consulted
        table: &'static str,
        /// Offending roll
        roll: u32,
    },

    /// Stock changed between validation and debit
    #[error("Stock changed for {ingredient}: need {needed}, have {have}")]
    StockChanged {
        /// Ingredient whose stock was short
        ingredient: String,
        /// Amount the debit required
        needed: u32,
        /// Amount actually held
        have: u32,
    },
}

/// Result type alias for brewing operations.
pub type BrewResult<T> = Result<T, BrewError>;
