//! # Catalog Crate
//!
//! Domain types and product data for the sneaker advisor.
//!
//! ## Main Components
//!
//! - **types**: `Brand`, `Demographic`, `BudgetRange`, `Preferences`, `Product`
//! - **tables**: the built-in per-brand product tables
//! - **index**: `CatalogIndex`, per-brand lookup and JSON catalog loading
//! - **error**: error types for catalog data
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{BudgetRange, CatalogIndex, Demographic, Preferences};
//!
//! let index = CatalogIndex::builtin();
//! let prefs = Preferences::new(Demographic::Male, BudgetRange::new(10.0, 520.0)?)
//!     .with_brands(["Nike"])
//!     .with_style("casual");
//!
//! for product in index.products(catalog::Brand::Nike) {
//!     println!("{} ${:.2}", product.name, product.price);
//! }
//! ```

pub mod error;
pub mod index;
pub mod tables;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::CatalogIndex;
pub use types::{Brand, BudgetRange, Demographic, Preferences, Product};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_builder() {
        let prefs = Preferences::new(Demographic::Male, BudgetRange::new(10.0, 520.0).unwrap())
            .with_brands(["Nike"])
            .with_style("casual")
            .with_color("black")
            .with_use_case("daily wear");

        assert_eq!(prefs.preferred_brands, vec!["Nike".to_string()]);
        assert_eq!(prefs.style.as_deref(), Some("casual"));
        assert_eq!(prefs.color.as_deref(), Some("black"));
        assert_eq!(prefs.use_case.as_deref(), Some("daily wear"));
    }

    #[test]
    fn test_preferences_serialization_shape() {
        let prefs = Preferences::new(Demographic::Kid, BudgetRange::new(0.0, 40.0).unwrap());
        let json = serde_json::to_value(&prefs).unwrap();

        assert_eq!(json["gender_age_group"], "kid");
        assert_eq!(json["budget_range"]["max"], 40.0);
        assert!(json.get("style").is_none());
        assert_eq!(json["preferred_brands"].as_array().unwrap().len(), 0);
    }
}
