//! Error types for the catalog crate.
//!
//! Covers building preference records and loading catalog files.
//! Lookups on a loaded `CatalogIndex` never fail; they return `Option`
//! or an empty slice.

use thiserror::Error;

/// Errors that can occur while building catalog data or preferences
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid JSON for a product list
    #[error("Failed to parse catalog file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A brand name that is not one of the supported brands
    #[error("Unsupported brand: {0}")]
    UnknownBrand(String),

    /// A demographic group outside male / female / kid
    #[error("Unknown demographic group: {0}")]
    UnknownDemographic(String),

    /// Budget bounds are negative, not finite, or reversed
    #[error("Invalid budget range: min {min}, max {max}")]
    InvalidBudget { min: f64, max: f64 },

    /// A product field had an invalid value
    #[error("Invalid value for {field} of product {product}: {value}")]
    InvalidValue {
        product: String,
        field: String,
        value: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
