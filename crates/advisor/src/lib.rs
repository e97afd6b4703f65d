//! # Advisor Crate
//!
//! The sneaker recommendation workflow: brand selection, concurrent
//! per-brand collection, aggregation and LLM ranking, wired together by
//! a small state machine.
//!
//! ## Main Components
//!
//! - **candidates**: the deterministic stages (`CandidatePipeline`)
//! - **ranking**: prompt building and response validation (`RankingStage`)
//! - **state**: `WorkflowState`, `StageDelta` and `WorkflowOutcome`
//! - **orchestrator**: `SneakerAdvisor`, which drives a request to the end
//! - **config** / **error**: settings and the workflow's error type
//!
//! ## Example Usage
//!
//! ```ignore
//! use advisor::{run_sneaker_workflow, Preferences};
//! use catalog::{BudgetRange, Demographic};
//!
//! let prefs = Preferences::new(Demographic::Male, BudgetRange::new(10.0, 520.0)?)
//!     .with_brands(["Nike"])
//!     .with_style("casual");
//! let outcome = run_sneaker_workflow(prefs, &api_key).await;
//! println!("{}", serde_json::to_string_pretty(&outcome)?);
//! ```

use std::sync::Arc;

use catalog::CatalogIndex;
use tracing::error;

pub mod candidates;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ranking;
pub mod state;

pub use candidates::{CandidatePipeline, CandidatePreview};
pub use catalog::Preferences;
pub use config::{AdvisorConfig, API_KEY_ENV};
pub use llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{AdvisorError, FailureKind};
pub use orchestrator::SneakerAdvisor;
pub use ranking::{RankingStage, Recommendation, MAX_RECOMMENDATIONS};
pub use state::{Stage, StageDelta, WorkflowOutcome, WorkflowState};

/// Run the whole workflow over the built-in catalog with default Gemini
/// settings.
///
/// A blank key yields a `configuration` outcome without running any
/// stage.
pub async fn run_sneaker_workflow(preferences: Preferences, api_key: &str) -> WorkflowOutcome {
    let config = AdvisorConfig::new(api_key);
    match SneakerAdvisor::from_config(Arc::new(CatalogIndex::builtin()), &config) {
        Ok(advisor) => advisor.run(preferences).await,
        Err(e) => {
            error!("Could not start the sneaker advisor: {}", e);
            WorkflowOutcome::failure(&e)
        }
    }
}
