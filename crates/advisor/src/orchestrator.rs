//! # Sneaker Advisor Orchestrator
//!
//! Drives one request through the workflow graph:
//! 1. Brand selection
//! 2. Per-brand collection (one blocking task per brand, all joined)
//! 3. Aggregation and deduplication
//! 4. LLM ranking, only when there is something to rank
//!
//! Any stage failure routes to the error handler, which clears partial
//! recommendations and ends the run. `run` itself never fails: every
//! ending is reported through `WorkflowOutcome`.

use std::sync::Arc;
use std::time::Instant;

use catalog::{CatalogIndex, Preferences};
use llm_client::{GeminiClient, TextGenerator};
use tracing::{debug, error, info, instrument, warn};

use crate::candidates::CandidatePipeline;
use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::ranking::RankingStage;
use crate::state::{Stage, StageDelta, WorkflowOutcome, WorkflowState};

/// Main orchestrator that coordinates the recommendation workflow
#[derive(Clone)]
pub struct SneakerAdvisor {
    candidates: CandidatePipeline,
    ranking: RankingStage,
}

impl SneakerAdvisor {
    pub fn new(data_index: Arc<CatalogIndex>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            candidates: CandidatePipeline::new(data_index),
            ranking: RankingStage::new(generator),
        }
    }

    /// Gemini-backed advisor. Fails before any stage runs if the
    /// settings are unusable.
    pub fn from_config(data_index: Arc<CatalogIndex>, config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        config.validate()?;
        let client = GeminiClient::new(config.to_gemini_config())?;
        Ok(Self::new(data_index, Arc::new(client)))
    }

    /// Replace the deterministic half of the workflow.
    pub fn with_candidates(mut self, candidates: CandidatePipeline) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn candidates(&self) -> &CandidatePipeline {
        &self.candidates
    }

    /// Main entry point: get recommendations for one set of preferences.
    #[instrument(skip_all, fields(group = %preferences.demographic, budget = %preferences.budget))]
    pub async fn run(&self, preferences: Preferences) -> WorkflowOutcome {
        let start_time = Instant::now();
        let mut state = WorkflowState::new(preferences);
        let mut stage = Stage::BrandSelection;

        while stage != Stage::End {
            stage = guard_stage(stage, &state);
            debug!("Entering stage {:?}", stage);
            stage = match stage {
                Stage::BrandSelection => {
                    let delta = self.candidates.select_brands(state.preferences());
                    state.apply(delta);
                    route_after_selection(&state)
                }
                Stage::Collection => {
                    let brands = state.selected_brands().to_vec();
                    let collected = self.candidates.collect(state.preferences().clone(), &brands).await;
                    match collected {
                        Ok(deltas) => {
                            for delta in deltas {
                                state.apply(delta);
                            }
                            Stage::Aggregation
                        }
                        Err(e) => {
                            state.fail(e);
                            Stage::ErrorHandler
                        }
                    }
                }
                Stage::Aggregation => {
                    let delta = self.candidates.aggregate(state.brand_results());
                    state.apply(delta);
                    route_after_aggregation(&state)
                }
                Stage::Ranking => {
                    let ranked = self.ranking.rank(state.aggregated(), state.preferences()).await;
                    match ranked {
                        Ok(recommendations) => {
                            state.apply(StageDelta::Ranked(recommendations));
                            Stage::End
                        }
                        Err(e) => {
                            state.fail(e);
                            Stage::ErrorHandler
                        }
                    }
                }
                Stage::ErrorHandler => {
                    handle_error(&mut state);
                    Stage::End
                }
                Stage::End => Stage::End,
            };
        }

        let outcome = state.into_outcome();
        info!(
            "Workflow finished in {:.2?}: {} recommendations{}",
            start_time.elapsed(),
            outcome.recommendations.len(),
            outcome
                .error
                .as_deref()
                .map(|e| format!(" ({})", e))
                .unwrap_or_default()
        );
        outcome
    }
}

/// No normal-path stage runs once an error is recorded.
fn guard_stage(stage: Stage, state: &WorkflowState) -> Stage {
    if stage.is_normal_path() && state.has_error() {
        Stage::ErrorHandler
    } else {
        stage
    }
}

/// An empty selection skips collection; aggregation then sees nothing.
fn route_after_selection(state: &WorkflowState) -> Stage {
    if state.selected_brands().is_empty() {
        warn!("No brands selected, skipping collection");
        Stage::Aggregation
    } else {
        Stage::Collection
    }
}

/// Only call the ranking service when there is something to rank.
fn route_after_aggregation(state: &WorkflowState) -> Stage {
    if state.aggregated().is_empty() {
        info!("No sneakers left after aggregation, ending without ranking");
        Stage::End
    } else {
        Stage::Ranking
    }
}

fn handle_error(state: &mut WorkflowState) {
    state.clear_recommendations();
    match state.error() {
        Some(e) if e.is_soft() => warn!("Workflow ended early: {}", e),
        Some(e) => error!("Workflow failed: {}", e),
        None => warn!("Error handler reached without a recorded error"),
    }
}
