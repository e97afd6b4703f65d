//! Workflow state and the deltas stages return.
//!
//! Stages never mutate `WorkflowState` directly. Each returns a
//! `StageDelta` and the orchestrator applies it, so the state has a
//! single writer.

use std::sync::Arc;

use catalog::{Brand, Preferences, Product};
use pipeline::BrandResultSet;
use serde::Serialize;

use crate::error::{AdvisorError, FailureKind};
use crate::ranking::Recommendation;

/// Nodes of the workflow graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BrandSelection,
    Collection,
    Aggregation,
    Ranking,
    ErrorHandler,
    End,
}

impl Stage {
    pub fn is_normal_path(&self) -> bool {
        !matches!(self, Stage::ErrorHandler | Stage::End)
    }
}

/// Partial update produced by one stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StageDelta {
    BrandsSelected(Vec<Brand>),
    BrandCollected { brand: Brand, products: Vec<Product> },
    Aggregated(Vec<Product>),
    Ranked(Vec<Recommendation>),
}

/// Everything one run knows. Created fresh per request.
#[derive(Debug, Clone)]
pub struct WorkflowState {
    preferences: Arc<Preferences>,
    selected_brands: Vec<Brand>,
    brand_results: BrandResultSet,
    aggregated: Vec<Product>,
    recommendations: Vec<Recommendation>,
    error: Option<AdvisorError>,
}

impl WorkflowState {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences: Arc::new(preferences),
            selected_brands: Vec::new(),
            brand_results: BrandResultSet::new(),
            aggregated: Vec::new(),
            recommendations: Vec::new(),
            error: None,
        }
    }

    /// Merge a stage's delta. Fields are last-write-wins except the
    /// per-brand results, which union. Ignored once an error is set.
    pub fn apply(&mut self, delta: StageDelta) {
        if self.error.is_some() {
            return;
        }
        match delta {
            StageDelta::BrandsSelected(brands) => self.selected_brands = brands,
            StageDelta::BrandCollected { brand, products } => self.brand_results.insert(brand, products),
            StageDelta::Aggregated(products) => self.aggregated = products,
            StageDelta::Ranked(recommendations) => self.recommendations = recommendations,
        }
    }

    /// Record a failure. The first error wins.
    pub fn fail(&mut self, error: AdvisorError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&AdvisorError> {
        self.error.as_ref()
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }

    pub fn selected_brands(&self) -> &[Brand] {
        &self.selected_brands
    }

    pub fn brand_results(&self) -> &BrandResultSet {
        &self.brand_results
    }

    pub fn aggregated(&self) -> &[Product] {
        &self.aggregated
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn clear_recommendations(&mut self) {
        self.recommendations.clear();
    }

    /// Collapse the final state into what the caller sees.
    ///
    /// Without a recorded error, an empty result is explained by the
    /// earliest stage that came up empty.
    pub fn into_outcome(self) -> WorkflowOutcome {
        if let Some(error) = &self.error {
            return WorkflowOutcome::failure(error);
        }
        if !self.recommendations.is_empty() {
            return WorkflowOutcome::success(self.recommendations);
        }

        let reason = if self.selected_brands.is_empty() {
            AdvisorError::NoBrandsSelected
        } else if self.aggregated.is_empty() {
            AdvisorError::NoCatalogMatches
        } else {
            AdvisorError::NoQualifyingRecommendation
        };
        WorkflowOutcome::failure(&reason)
    }
}

/// Result handed back across the library boundary.
///
/// Serializes as `{"recommendations": [...]}` on success and
/// `{"error": "...", "kind": "...", "recommendations": []}` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub recommendations: Vec<Recommendation>,
}

impl WorkflowOutcome {
    pub fn success(recommendations: Vec<Recommendation>) -> Self {
        Self {
            error: None,
            kind: None,
            recommendations,
        }
    }

    pub fn failure(error: &AdvisorError) -> Self {
        Self {
            error: Some(error.to_string()),
            kind: Some(error.kind()),
            recommendations: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{BudgetRange, CatalogIndex, Demographic};

    fn state() -> WorkflowState {
        WorkflowState::new(Preferences::new(
            Demographic::Male,
            BudgetRange::new(0.0, 500.0).unwrap(),
        ))
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            name: "Nike Air Force 1".into(),
            brand: Brand::Nike,
            price: 110.0,
            url: "https://nike.com/airforce1".into(),
            reason: "Classic.".into(),
            image_url: None,
        }
    }

    #[test]
    fn test_brand_collected_unions() {
        let index = CatalogIndex::builtin();
        let mut state = state();

        state.apply(StageDelta::BrandCollected {
            brand: Brand::Puma,
            products: index.products(Brand::Puma)[..1].to_vec(),
        });
        state.apply(StageDelta::BrandCollected {
            brand: Brand::Nike,
            products: index.products(Brand::Nike)[..2].to_vec(),
        });

        assert_eq!(state.brand_results().total_products(), 3);
        let brands: Vec<_> = state.brand_results().brands().collect();
        assert_eq!(brands, vec![Brand::Nike, Brand::Puma]);
    }

    #[test]
    fn test_first_error_wins_and_freezes_state() {
        let mut state = state();
        state.fail(AdvisorError::RankingService("timeout".into()));
        state.fail(AdvisorError::NoCatalogMatches);
        state.apply(StageDelta::BrandsSelected(vec![Brand::Nike]));

        assert!(matches!(state.error(), Some(AdvisorError::RankingService(_))));
        assert!(state.selected_brands().is_empty());
    }

    #[test]
    fn test_outcome_explains_empty_result() {
        let outcome = state().into_outcome();
        assert_eq!(outcome.kind, Some(FailureKind::NoBrandsSelected));

        let mut s = state();
        s.apply(StageDelta::BrandsSelected(vec![Brand::Nike]));
        assert_eq!(s.into_outcome().kind, Some(FailureKind::NoCatalogMatches));

        let mut s = state();
        s.apply(StageDelta::BrandsSelected(vec![Brand::Nike]));
        s.apply(StageDelta::Aggregated(CatalogIndex::builtin().products(Brand::Nike).to_vec()));
        assert_eq!(s.into_outcome().kind, Some(FailureKind::NoQualifyingRecommendation));
    }

    #[test]
    fn test_outcome_json_shape() {
        let mut s = state();
        s.apply(StageDelta::Ranked(vec![recommendation()]));
        let json = serde_json::to_value(s.into_outcome()).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("kind").is_none());
        assert_eq!(json["recommendations"][0]["brand"], "Nike");

        let json = serde_json::to_value(WorkflowOutcome::failure(&AdvisorError::NoCatalogMatches)).unwrap();
        assert_eq!(json["kind"], "no_catalog_matches");
        assert_eq!(
            json["error"],
            "No sneakers matched your criteria (gender, budget) from the selected brands."
        );
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_normal_path_stages() {
        assert!(Stage::Ranking.is_normal_path());
        assert!(!Stage::ErrorHandler.is_normal_path());
        assert!(!Stage::End.is_normal_path());
    }
}
