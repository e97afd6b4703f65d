//! Filter implementations for the catalog pipeline.
//!
//! Together these two filters make up the per-brand catalog filter:
//! a product survives iff its demographic matches and its price is
//! inside the budget.

pub mod budget;
pub mod demographic;

// Re-export for convenience
pub use budget::BudgetFilter;
pub use demographic::DemographicFilter;
