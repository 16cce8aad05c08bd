//! Ingredient inventory.

use brewing_common::{BrewError, IngredientId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use crate::ingredient::Ingredient;

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Not enough of an ingredient
    #[error("Not enough {ingredient}: need {needed}, have {have}")]
    NotEnough {
        /// Ingredient that is short
        ingredient: IngredientId,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
    /// Ingredient not found
    #[error("Ingredient not found: {0}")]
    NotFound(IngredientId),
}

impl From<InventoryError> for BrewError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::NotEnough {
                ingredient,
                needed,
                have,
            } => BrewError::StockChanged {
                ingredient: ingredient.to_string(),
                needed,
                have,
            },
            InventoryError::NotFound(ingredient) => BrewError::StockChanged {
                ingredient: ingredient.to_string(),
                needed: 1,
                have: 0,
            },
        }
    }
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory handle shared between threads.
///
/// Hold the lock for the whole brew so validation and debit see the same stock.
pub type SharedInventory = Arc<Mutex<IngredientInventory>>;

/// The ingredients a player holds.
///
/// A record is removed as soon as its quantity reaches zero, so every stored
/// ingredient has at least one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngredientInventory {
    /// Ingredient records by id
    items: BTreeMap<IngredientId, Ingredient>,
}

impl IngredientInventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Wraps the inventory in a shared, lockable handle.
    #[must_use]
    pub fn into_shared(self) -> SharedInventory {
        Arc::new(Mutex::new(self))
    }

    /// Returns the number of distinct ingredients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the inventory holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an ingredient by id.
    #[must_use]
    pub fn get(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.items.get(id)
    }

    /// Returns the quantity held of an ingredient.
    #[must_use]
    pub fn count(&self, id: &IngredientId) -> u32 {
        self.items.get(id).map_or(0, |i| i.quantity)
    }

    /// Checks if the inventory holds at least the given amount.
    #[must_use]
    pub fn has(&self, id: &IngredientId, amount: u32) -> bool {
        self.count(id) >= amount
    }

    /// Inserts an ingredient record.
    ///
    /// If a record with the same id exists its quantity grows by the incoming
    /// quantity; the stored definition is kept. Zero-quantity records are ignored.
    pub fn insert(&mut self, ingredient: Ingredient) {
        if ingredient.quantity == 0 {
            return;
        }
        match self.items.get_mut(&ingredient.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(ingredient.quantity);
            },
            None => {
                self.items.insert(ingredient.id.clone(), ingredient);
            },
        }
    }

    /// Adds stock to an existing ingredient.
    pub fn add(&mut self, id: &IngredientId, amount: u32) -> InventoryResult<()> {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        item.quantity = item.quantity.saturating_add(amount);
        Ok(())
    }

    /// Removes stock from an ingredient.
    pub fn remove(&mut self, id: &IngredientId, amount: u32) -> InventoryResult<()> {
        let current = self
            .items
            .get(id)
            .map(|i| i.quantity)
            .ok_or_else(|| InventoryError::NotFound(id.clone()))?;
        if current < amount {
            return Err(InventoryError::NotEnough {
                ingredient: id.clone(),
                needed: amount,
                have: current,
            });
        }
        if current == amount {
            self.items.remove(id);
        } else if let Some(item) = self.items.get_mut(id) {
            item.quantity = current - amount;
        }
        Ok(())
    }

    /// Removes several lines of stock as one operation.
    ///
    /// Lines naming the same ingredient are summed. Every line is checked
    /// before anything is removed, so on error the inventory is unchanged.
    pub fn debit_all(&mut self, lines: &[(IngredientId, u32)]) -> InventoryResult<()> {
        let mut totals: BTreeMap<&IngredientId, u32> = BTreeMap::new();
        for (id, amount) in lines {
            let total = totals.entry(id).or_insert(0);
            *total = total.saturating_add(*amount);
        }

        for (id, needed) in &totals {
            let have = self.count(id);
            if have < *needed {
                return Err(InventoryError::NotEnough {
                    ingredient: (*id).clone(),
                    needed: *needed,
                    have,
                });
            }
        }

        for (id, amount) in totals {
            if amount > 0 {
                self.remove(id, amount)?;
            }
        }
        Ok(())
    }

    /// Returns an iterator over all ingredients in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> + '_ {
        self.items.values()
    }

    /// Total units across all ingredients.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.items.values().map(|i| u64::from(i.quantity)).sum()
    }
}

impl FromIterator<Ingredient> for IngredientInventory {
    fn from_iter<T: IntoIterator<Item = Ingredient>>(iter: T) -> Self {
        let mut inventory = Self::new();
        for ingredient in iter {
            inventory.insert(ingredient);
        }
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herb(id: &str, quantity: u32) -> Ingredient {
        Ingredient::builder(id, id).quantity(quantity).build()
    }

    #[test]
    fn test_insert_merges_quantity() {
        let mut inv = IngredientInventory::new();
        inv.insert(herb("sage", 2));
        inv.insert(herb("sage", 3));
        assert_eq!(inv.count(&"sage".into()), 5);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_insert_ignores_empty_records() {
        let mut inv = IngredientInventory::new();
        inv.insert(herb("sage", 0));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_to_zero_deletes_record() {
        let mut inv: IngredientInventory = [herb("sage", 3)].into_iter().collect();
        inv.remove(&"sage".into(), 3).expect("enough stock");
        assert!(inv.get(&"sage".into()).is_none());
        assert_eq!(inv.count(&"sage".into()), 0);
    }

    #[test]
    fn test_remove_not_enough() {
        let mut inv: IngredientInventory = [herb("sage", 1)].into_iter().collect();
        let result = inv.remove(&"sage".into(), 2);
        assert!(matches!(
            result,
            Err(InventoryError::NotEnough {
                needed: 2,
                have: 1,
                ..
            })
        ));
        assert_eq!(inv.count(&"sage".into()), 1);
    }

    #[test]
    fn test_remove_unknown() {
        let mut inv = IngredientInventory::new();
        assert!(matches!(
            inv.remove(&"ghost".into(), 1),
            Err(InventoryError::NotFound(_))
        ));
    }

    #[test]
    fn test_debit_all_is_atomic() {
        let mut inv: IngredientInventory = [herb("sage", 5), herb("salt", 1)].into_iter().collect();
        let before = inv.clone();

        let result = inv.debit_all(&[("sage".into(), 2), ("salt".into(), 2)]);
        assert!(result.is_err());
        assert_eq!(inv.count(&"sage".into()), before.count(&"sage".into()));
        assert_eq!(inv.count(&"salt".into()), 1);
    }

    #[test]
    fn test_debit_all_sums_repeated_lines() {
        let mut inv: IngredientInventory = [herb("sage", 3)].into_iter().collect();

        let result = inv.debit_all(&[("sage".into(), 2), ("sage".into(), 2)]);
        assert!(matches!(
            result,
            Err(InventoryError::NotEnough {
                needed: 4,
                have: 3,
                ..
            })
        ));

        inv.debit_all(&[("sage".into(), 1), ("sage".into(), 1)])
            .expect("enough stock");
        assert_eq!(inv.count(&"sage".into()), 1);
    }

    #[test]
    fn test_inventory_errors_become_stock_changed() {
        let err = BrewError::from(InventoryError::NotEnough {
            ingredient: "sage".into(),
            needed: 3,
            have: 1,
        });
        assert_eq!(
            err,
            BrewError::StockChanged {
                ingredient: "sage".to_string(),
                needed: 3,
                have: 1,
            }
        );

        let err = BrewError::from(InventoryError::NotFound("ghost".into()));
        assert_eq!(
            err,
            BrewError::StockChanged {
                ingredient: "ghost".to_string(),
                needed: 1,
                have: 0,
            }
        );
    }

    #[test]
    fn test_failed_debit_reports_short_line() {
        let mut inv: IngredientInventory = [herb("sage", 2)].into_iter().collect();
        let err = inv
            .debit_all(&[("sage".into(), 1), ("salt".into(), 1)])
            .map_err(BrewError::from)
            .expect_err("salt is missing");
        assert_eq!(
            err,
            BrewError::StockChanged {
                ingredient: "salt".to_string(),
                needed: 1,
                have: 0,
            }
        );
    }

    #[test]
    fn test_add_and_total_units() {
        let mut inv: IngredientInventory = [herb("sage", 1), herb("salt", 2)].into_iter().collect();
        inv.add(&"sage".into(), 4).expect("known ingredient");
        assert_eq!(inv.total_units(), 7);
        assert!(inv.add(&"ghost".into(), 1).is_err());
    }

    #[test]
    fn test_shared_handle() {
        let shared = [herb("sage", 2)]
            .into_iter()
            .collect::<IngredientInventory>()
            .into_shared();
        shared.lock().remove(&"sage".into(), 1).expect("enough stock");
        assert_eq!(shared.lock().count(&"sage".into()), 1);
    }
}
