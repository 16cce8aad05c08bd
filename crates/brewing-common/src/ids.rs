//! ID types for ingredients, recipes, and equipment.
//!
//! Pantry data is authored by hand and keyed by strings, so every id here is a
//! thin string newtype that serializes transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from a raw string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw ID value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Unique identifier for an ingredient record in the inventory.
    IngredientId
);

string_id!(
    /// Unique identifier for a recipe.
    RecipeId
);

string_id!(
    /// Identifier for a component slot, unique within its recipe.
    ComponentId
);

string_id!(
    /// Unique identifier for a piece of brewing equipment.
    EquipmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_ordering() {
        let a = IngredientId::new("ing-ash-bloom");
        let b = IngredientId::from("ing-bone-dust");
        assert_eq!(a.to_string(), "ing-ash-bloom");
        assert!(a < b);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = RecipeId::new("healing");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"healing\"");

        let back: RecipeId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
