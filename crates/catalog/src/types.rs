//! Core domain types for the sneaker catalog.
//!
//! Everything a request needs to describe what the user wants
//! (`Preferences`) and everything the catalog knows about a shoe
//! (`Product`). Both are plain data; the filtering logic lives in the
//! `pipeline` crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

// =============================================================================
// Brand
// =============================================================================

/// A brand the system has a catalog for.
///
/// Variant order is the canonical order used when iterating results,
/// which keeps aggregation deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brand {
    Nike,
    Adidas,
    Puma,
}

impl Brand {
    /// All supported brands, in canonical order.
    pub const ALL: [Brand; 3] = [Brand::Nike, Brand::Adidas, Brand::Puma];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Nike => "Nike",
            Brand::Adidas => "Adidas",
            Brand::Puma => "Puma",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the display name.
impl FromStr for Brand {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Brand::ALL
            .into_iter()
            .find(|brand| brand.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownBrand(s.to_string()))
    }
}

// =============================================================================
// Demographic
// =============================================================================

/// Gender / age group a shoe is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demographic {
    Male,
    Female,
    Kid,
}

impl Demographic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Demographic::Male => "male",
            Demographic::Female => "female",
            Demographic::Kid => "kid",
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Demographic {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Demographic::Male),
            "female" => Ok(Demographic::Female),
            "kid" | "kids" => Ok(Demographic::Kid),
            _ => Err(CatalogError::UnknownDemographic(s.to_string())),
        }
    }
}

// =============================================================================
// Budget
// =============================================================================

/// Inclusive price range. Always satisfies `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBudget")]
pub struct BudgetRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBudget {
    min: f64,
    max: f64,
}

impl TryFrom<RawBudget> for BudgetRange {
    type Error = CatalogError;

    fn try_from(raw: RawBudget) -> Result<Self> {
        BudgetRange::new(raw.min, raw.max)
    }
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min <= max;
        if !valid {
            return Err(CatalogError::InvalidBudget { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} - ${:.2}", self.min, self.max)
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// What the user asked for. Built once per request and never mutated.
///
/// `preferred_brands` holds raw names so that unsupported brands can be
/// reported; resolving them is the brand selector's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub preferred_brands: Vec<String>,
    #[serde(rename = "gender_age_group")]
    pub demographic: Demographic,
    #[serde(rename = "budget_range")]
    pub budget: BudgetRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
}

impl Preferences {
    pub fn new(demographic: Demographic, budget: BudgetRange) -> Self {
        Self {
            preferred_brands: Vec::new(),
            demographic,
            budget,
            style: None,
            color: None,
            use_case: None,
        }
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_use_case(mut self, use_case: impl Into<String>) -> Self {
        self.use_case = Some(use_case.into());
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog entry. Identity is the `(brand, name)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub brand: Brand,
    pub name: String,
    pub price: f64,
    pub url: String,
    #[serde(rename = "gender")]
    pub demographic: Demographic,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(
        brand: Brand,
        name: impl Into<String>,
        price: f64,
        url: impl Into<String>,
        demographic: Demographic,
        description: impl Into<String>,
    ) -> Self {
        Self {
            brand,
            name: name.into(),
            price,
            url: url.into(),
            demographic,
            description: description.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Deduplication key.
    pub fn key(&self) -> (Brand, &str) {
        (self.brand, self.name.as_str())
    }

    /// Check the invariants a catalog file cannot express in its schema.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str, value: String| CatalogError::InvalidValue {
            product: self.name.clone(),
            field: field.to_string(),
            value,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name", self.name.clone()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(invalid("price", self.price.to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(invalid("url", self.url.clone()));
        }
        Ok(())
    }
}
