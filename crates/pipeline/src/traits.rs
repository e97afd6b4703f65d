//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a brand's product table.

use anyhow::Result;
use catalog::{Preferences, Product};

/// Core trait for filtering catalog products.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets one pipeline be shared by collectors running on
///   different threads
/// - Filters take ownership of the Vec<Product> and return a filtered Vec
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of products.
    ///
    /// # Arguments
    /// * `products` - The products to filter (takes ownership)
    /// * `preferences` - The request being served
    ///
    /// # Returns
    /// * `Ok(Vec<Product>)` - The products that passed
    /// * `Err` - If filtering fails
    fn apply(&self, products: Vec<Product>, preferences: &Preferences) -> Result<Vec<Product>>;
}
