//! # Candidate Pipeline
//!
//! The deterministic half of the workflow: brand selection, per-brand
//! collection and aggregation. No network access, so it can run without
//! credentials (see `preview`).
//!
//! Collection fans out one blocking task per selected brand and joins
//! them all before anything is aggregated.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog::{Brand, CatalogIndex, Preferences, Product};
use pipeline::{Aggregator, BrandCollector, BrandResultSet, BrandSelector, FilterPipeline};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::error::AdvisorError;
use crate::state::StageDelta;

/// What the pipeline would hand to the ranking stage.
#[derive(Debug, Clone, Serialize)]
pub struct CandidatePreview {
    pub selected_brands: Vec<Brand>,
    #[serde(skip)]
    pub results: BrandResultSet,
    pub candidates: Vec<Product>,
}

#[derive(Clone)]
pub struct CandidatePipeline {
    selector: BrandSelector,
    collectors: BTreeMap<Brand, BrandCollector>,
    aggregator: Aggregator,
}

impl CandidatePipeline {
    /// Pipeline over `data_index` with the standard catalog filter.
    pub fn new(data_index: Arc<CatalogIndex>) -> Self {
        Self::with_filters(data_index, Arc::new(FilterPipeline::catalog()))
    }

    /// Pipeline whose collectors all share `filters`.
    pub fn with_filters(data_index: Arc<CatalogIndex>, filters: Arc<FilterPipeline>) -> Self {
        let collectors = Brand::ALL
            .into_iter()
            .map(|brand| {
                let collector = BrandCollector::with_filters(brand, data_index.clone(), filters.clone());
                (brand, collector)
            })
            .collect();

        Self {
            selector: BrandSelector::new(),
            collectors,
            aggregator: Aggregator::new(),
        }
    }

    pub fn with_selector(mut self, selector: BrandSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn selector(&self) -> &BrandSelector {
        &self.selector
    }

    /// Stage 1: resolve which brands to collect from.
    pub fn select_brands(&self, preferences: &Preferences) -> StageDelta {
        StageDelta::BrandsSelected(self.selector.select(&preferences.preferred_brands))
    }

    /// Stage 2: run the selected collectors concurrently.
    ///
    /// Every task is awaited before returning. If any failed, the first
    /// failure in brand order is reported and the partial results are
    /// discarded.
    #[instrument(skip_all, fields(brands = brands.len()))]
    pub async fn collect(
        &self,
        preferences: Arc<Preferences>,
        brands: &[Brand],
    ) -> Result<Vec<StageDelta>, AdvisorError> {
        // Resolve every collector before spawning so nothing is left running
        let mut collectors = Vec::with_capacity(brands.len());
        for &brand in brands {
            let collector = self.collectors.get(&brand).cloned().ok_or_else(|| AdvisorError::CollectionFailed {
                brand,
                reason: "no collector registered for this brand".to_string(),
            })?;
            collectors.push((brand, collector));
        }

        let mut handles = Vec::with_capacity(collectors.len());
        for (brand, collector) in collectors {
            let preferences = preferences.clone();
            let handle = tokio::task::spawn_blocking(move || collector.collect(&preferences));
            handles.push((brand, handle));
        }

        let mut deltas = Vec::with_capacity(handles.len());
        let mut first_failure = None;
        for (brand, handle) in handles {
            let joined = handle.await;
            match joined {
                Ok(Ok(products)) => {
                    info!("{} collector returned {} products", brand, products.len());
                    deltas.push(StageDelta::BrandCollected { brand, products });
                }
                Ok(Err(e)) => {
                    error!("{} collector failed: {:#}", brand, e);
                    first_failure.get_or_insert(AdvisorError::CollectionFailed {
                        brand,
                        reason: format!("{:#}", e),
                    });
                }
                Err(e) => {
                    error!("{} collector task panicked: {}", brand, e);
                    first_failure.get_or_insert(AdvisorError::CollectionFailed {
                        brand,
                        reason: "collector task panicked".to_string(),
                    });
                }
            }
        }

        match first_failure {
            Some(failure) => Err(failure),
            None => Ok(deltas),
        }
    }

    /// Stage 3: flatten and deduplicate.
    pub fn aggregate(&self, results: &BrandResultSet) -> StageDelta {
        StageDelta::Aggregated(self.aggregator.aggregate(results))
    }

    /// Run stages 1 to 3 and report what ranking would receive.
    pub async fn preview(&self, preferences: Preferences) -> Result<CandidatePreview, AdvisorError> {
        let preferences = Arc::new(preferences);

        let selected_brands = self.selector.select(&preferences.preferred_brands);

        let mut results = BrandResultSet::new();
        for delta in self.collect(preferences.clone(), &selected_brands).await? {
            if let StageDelta::BrandCollected { brand, products } = delta {
                results.insert(brand, products);
            }
        }

        let candidates = self.aggregator.aggregate(&results);
        Ok(CandidatePreview {
            selected_brands,
            results,
            candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{BudgetRange, Demographic};
    use pipeline::Filter;

    fn prefs(demographic: Demographic, min: f64, max: f64) -> Preferences {
        Preferences::new(demographic, BudgetRange::new(min, max).unwrap())
    }

    struct ExplodingFilter;

    impl Filter for ExplodingFilter {
        fn name(&self) -> &str {
            "Exploding"
        }

        fn apply(&self, _products: Vec<Product>, _preferences: &Preferences) -> anyhow::Result<Vec<Product>> {
            panic!("filter exploded")
        }
    }

    #[tokio::test]
    async fn test_collect_all_brands() {
        let pipeline = CandidatePipeline::new(Arc::new(CatalogIndex::builtin()));
        let preferences = Arc::new(prefs(Demographic::Kid, 0.0, 100.0));

        let deltas = pipeline.collect(preferences, &Brand::ALL).await.unwrap();

        assert_eq!(deltas.len(), 3);
        for delta in deltas {
            match delta {
                StageDelta::BrandCollected { products, .. } => assert_eq!(products.len(), 1),
                other => panic!("unexpected delta: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_collect_panicking_task() {
        let filters = Arc::new(FilterPipeline::new().add_filter(ExplodingFilter));
        let pipeline = CandidatePipeline::with_filters(Arc::new(CatalogIndex::builtin()), filters);

        let err = pipeline
            .collect(Arc::new(prefs(Demographic::Male, 0.0, 500.0)), &[Brand::Adidas, Brand::Puma])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AdvisorError::CollectionFailed {
                brand: Brand::Adidas,
                reason: "collector task panicked".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_collect_missing_collector_spawns_nothing() {
        let index = Arc::new(CatalogIndex::builtin());
        let filters = Arc::new(FilterPipeline::new().add_filter(ExplodingFilter));
        let mut pipeline = CandidatePipeline::with_filters(index, filters);
        pipeline.collectors.remove(&Brand::Puma);

        let err = pipeline
            .collect(Arc::new(prefs(Demographic::Male, 0.0, 500.0)), &[Brand::Nike, Brand::Puma])
            .await
            .unwrap_err();

        // Nike's collector would panic if it had been started
        assert_eq!(
            err,
            AdvisorError::CollectionFailed {
                brand: Brand::Puma,
                reason: "no collector registered for this brand".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_preview_nike_male() {
        let pipeline = CandidatePipeline::new(Arc::new(CatalogIndex::builtin()));

        let preview = pipeline
            .preview(prefs(Demographic::Male, 10.0, 520.0).with_brands(["Nike"]))
            .await
            .unwrap();

        assert_eq!(preview.selected_brands, vec![Brand::Nike]);
        let names: Vec<_> = preview.candidates.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Nike Air Max 270", "Nike Air Force 1"]);
    }

    #[tokio::test]
    async fn test_preview_canonical_order() {
        let pipeline = CandidatePipeline::new(Arc::new(CatalogIndex::builtin()));

        let preview = pipeline
            .preview(prefs(Demographic::Female, 0.0, 1000.0).with_brands(["Puma", "Nike"]))
            .await
            .unwrap();

        assert_eq!(preview.selected_brands, vec![Brand::Nike, Brand::Puma]);
        let brands: Vec<_> = preview.candidates.iter().map(|p| p.brand).collect();
        assert_eq!(brands, vec![Brand::Nike, Brand::Puma]);
    }

    #[tokio::test]
    async fn test_preview_empty_budget() {
        let pipeline = CandidatePipeline::new(Arc::new(CatalogIndex::builtin()));
        let preview = pipeline.preview(prefs(Demographic::Male, 0.0, 40.0)).await.unwrap();

        assert_eq!(preview.selected_brands, Brand::ALL.to_vec());
        assert!(preview.candidates.is_empty());
        assert_eq!(preview.results.total_products(), 0);
    }
}
