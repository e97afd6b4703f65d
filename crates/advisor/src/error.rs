//! Error types for the advisor workflow.
//!
//! Every way a run can end without recommendations is a variant here.
//! Soft variants are ordinary "nothing matched" outcomes; the rest are
//! faults. Both reach the caller as data inside `WorkflowOutcome`.

use catalog::Brand;
use llm_client::LlmClientError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    /// Missing credential or invalid settings; raised before any stage runs
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No brands were specified in your preferences. Please select at least one brand.")]
    NoBrandsSelected,

    #[error("No sneakers matched your criteria (gender, budget) from the selected brands.")]
    NoCatalogMatches,

    #[error(
        "The AI advisor reviewed the available sneakers but could not find a specific match for your detailed preferences (style, color, use case). Try broadening your criteria."
    )]
    NoQualifyingRecommendation,

    /// The service answered, but not with parseable structured data
    #[error("Could not parse recommendations from the ranking service ({reason}). Raw response: {raw}")]
    RankingParse { reason: String, raw: String },

    /// The call to the service itself failed
    #[error("Ranking service call failed: {0}")]
    RankingService(String),

    /// A brand collector returned an error or its task panicked
    #[error("Collecting {brand} products failed: {reason}")]
    CollectionFailed { brand: Brand, reason: String },
}

/// Machine-readable tag for an unsuccessful outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    NoBrandsSelected,
    NoCatalogMatches,
    NoQualifyingRecommendation,
    RankingParse,
    RankingService,
    CollectionFailed,
}

impl AdvisorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdvisorError::Configuration(_) => FailureKind::Configuration,
            AdvisorError::NoBrandsSelected => FailureKind::NoBrandsSelected,
            AdvisorError::NoCatalogMatches => FailureKind::NoCatalogMatches,
            AdvisorError::NoQualifyingRecommendation => FailureKind::NoQualifyingRecommendation,
            AdvisorError::RankingParse { .. } => FailureKind::RankingParse,
            AdvisorError::RankingService(_) => FailureKind::RankingService,
            AdvisorError::CollectionFailed { .. } => FailureKind::CollectionFailed,
        }
    }

    /// True for "nothing matched" outcomes that are not system faults.
    pub fn is_soft(&self) -> bool {
        self.kind().is_soft()
    }
}

impl FailureKind {
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            FailureKind::NoBrandsSelected | FailureKind::NoCatalogMatches | FailureKind::NoQualifyingRecommendation
        )
    }
}

impl From<LlmClientError> for AdvisorError {
    fn from(err: LlmClientError) -> Self {
        match err {
            LlmClientError::MissingApiKey | LlmClientError::ClientBuild(_) => {
                AdvisorError::Configuration(err.to_string())
            }
            other => AdvisorError::RankingService(other.to_string()),
        }
    }
}
