//! Filter on price.
//!
//! The budget range is inclusive on both ends.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Preferences, Product};

/// Keeps products priced within `[min, max]`.
pub struct BudgetFilter;

impl Filter for BudgetFilter {
    fn name(&self) -> &str {
        "BudgetFilter"
    }

    fn apply(&self, products: Vec<Product>, preferences: &Preferences) -> Result<Vec<Product>> {
        let filtered: Vec<Product> = products
            .into_iter()
            .filter(|product| preferences.budget.contains(product.price))
            .collect();
        Ok(filtered)
    }
}
