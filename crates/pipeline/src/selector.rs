//! Brand selection.
//!
//! Decides which brand collectors run for a request.
//!
//! ## Algorithm
//! 1. No preferred brands: select every supported brand
//! 2. Otherwise: keep the preferred names that exactly match a supported
//!    brand (case-sensitive)
//! 3. None matched: fall back to every supported brand
//!
//! Step 3 drops the user's explicit brand constraint. This leniency is
//! intended behavior.

use catalog::Brand;
use tracing::{info, warn};

/// Resolves preferred brand names against the supported set.
#[derive(Debug, Clone)]
pub struct BrandSelector {
    supported: Vec<Brand>,
}

impl BrandSelector {
    /// Selector over all built-in brands.
    pub fn new() -> Self {
        Self::with_supported(Brand::ALL)
    }

    /// Selector over a custom supported set (e.g. brands present in a
    /// loaded catalog file). Duplicates collapse; order becomes canonical.
    pub fn with_supported(supported: impl IntoIterator<Item = Brand>) -> Self {
        let mut supported: Vec<Brand> = supported.into_iter().collect();
        supported.sort();
        supported.dedup();
        Self { supported }
    }

    pub fn supported(&self) -> &[Brand] {
        &self.supported
    }

    /// Select brands for a request. Output is in canonical brand order
    /// and empty only when the supported set is.
    pub fn select(&self, preferred: &[String]) -> Vec<Brand> {
        if preferred.is_empty() {
            info!("No specific brands preferred, selecting all supported brands");
            return self.supported.clone();
        }

        let mut selected = Vec::new();
        for name in preferred {
            match name.parse::<Brand>() {
                Ok(brand) if self.supported.contains(&brand) => selected.push(brand),
                _ => warn!("Preferred brand '{}' is not currently supported", name),
            }
        }
        selected.sort();
        selected.dedup();

        if selected.is_empty() {
            info!("None of the preferred brands are supported, falling back to all supported brands");
            return self.supported.clone();
        }

        info!("Selected brands: {:?}", selected);
        selected
    }
}

impl Default for BrandSelector {
    fn default() -> Self {
        Self::new()
    }
}
