//! Per-brand collectors.
//!
//! A `BrandCollector` stands in for a live data source for one brand:
//! it reads that brand's table from the shared `CatalogIndex` and runs
//! the catalog filter over it. Collectors for different brands read
//! disjoint tables, so any number of them can run at once.

use std::sync::Arc;

use anyhow::Result;
use catalog::{Brand, CatalogIndex, Preferences, Product};
use tracing::{debug, instrument};

use crate::filter_pipeline::FilterPipeline;

/// Collects the products of one brand that match a request.
#[derive(Clone)]
pub struct BrandCollector {
    brand: Brand,
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    data_index: Arc<CatalogIndex>,
    filters: Arc<FilterPipeline>,
}

impl BrandCollector {
    /// Create a collector using the standard catalog filter.
    pub fn new(brand: Brand, data_index: Arc<CatalogIndex>) -> Self {
        Self::with_filters(brand, data_index, Arc::new(FilterPipeline::catalog()))
    }

    /// Create a collector with a custom filter pipeline.
    pub fn with_filters(
        brand: Brand,
        data_index: Arc<CatalogIndex>,
        filters: Arc<FilterPipeline>,
    ) -> Self {
        Self {
            brand,
            data_index,
            filters,
        }
    }

    pub fn brand(&self) -> Brand {
        self.brand
    }

    /// Filter this brand's table against the preferences.
    #[instrument(skip(self, preferences), fields(brand = %self.brand))]
    pub fn collect(&self, preferences: &Preferences) -> Result<Vec<Product>> {
        let table = self.data_index.products(self.brand).to_vec();
        let table_len = table.len();

        let collected = self.filters.apply(table, preferences)?;

        debug!(
            "{} collector: {} of {} products match",
            self.brand,
            collected.len(),
            table_len
        );
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{BudgetRange, Demographic};

    fn prefs(demographic: Demographic, min: f64, max: f64) -> Preferences {
        Preferences::new(demographic, BudgetRange::new(min, max).unwrap())
    }

    #[test]
    fn test_collect_nike_male() {
        let collector = BrandCollector::new(Brand::Nike, Arc::new(CatalogIndex::builtin()));

        let products = collector.collect(&prefs(Demographic::Male, 10.0, 520.0)).unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Nike Air Max 270");
        assert_eq!(products[0].price, 150.0);
        assert_eq!(products[1].name, "Nike Air Force 1");
        assert_eq!(products[1].price, 110.0);
    }

    #[test]
    fn test_collect_only_reads_own_brand() {
        let collector = BrandCollector::new(Brand::Adidas, Arc::new(CatalogIndex::builtin()));

        let products = collector.collect(&prefs(Demographic::Kid, 0.0, 1000.0)).unwrap();

        assert_eq!(products.len(), 1);
        assert!(products.iter().all(|p| p.brand == Brand::Adidas));
    }

    #[test]
    fn test_collect_from_empty_table() {
        let collector = BrandCollector::new(Brand::Puma, Arc::new(CatalogIndex::new()));
        let products = collector.collect(&prefs(Demographic::Male, 0.0, 1000.0)).unwrap();
        assert!(products.is_empty());
    }
}
