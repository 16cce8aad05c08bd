//! # Brewing Common
//!
//! Common types shared by the brewing engine and its collaborators.
//!
//! This crate provides the vocabulary every other crate speaks:
//! - ID types (IngredientId, RecipeId, ComponentId, EquipmentId)
//! - The six-tier rarity ladder and its derived scales
//! - The closed alchemical element catalog
//! - Data-integrity error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod element;
pub mod error;
pub mod ids;
pub mod rarity;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::rarity::*;
}

pub use prelude::*;
