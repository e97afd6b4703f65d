//! Filter on the gender / age group a shoe is made for.

use crate::traits::Filter;
use anyhow::Result;
use catalog::{Preferences, Product};

/// Keeps products whose demographic equals the requested one.
pub struct DemographicFilter;

impl Filter for DemographicFilter {
    fn name(&self) -> &str {
        "DemographicFilter"
    }

    fn apply(&self, products: Vec<Product>, preferences: &Preferences) -> Result<Vec<Product>> {
        let filtered: Vec<Product> = products
            .into_iter()
            .filter(|product| product.demographic == preferences.demographic)
            .collect();
        Ok(filtered)
    }
}
