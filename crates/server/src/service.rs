//! Request orchestration: validate, generate, persist.

use std::sync::Arc;

use thiserror::Error;

use roadmap_core::form::{self, RoadmapForm, ValidationError};
use roadmap_core::model::{RoadmapResult, RoadmapSummary};
use roadmap_core::{new_ulid, now_ms};
use roadmap_provider::{GenerationError, Generator};

use crate::store::{Store, StoreError};

/// Submission failure taxonomy surfaced to the HTTP layer.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form did not validate; the generator was not invoked.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The provider call failed; nothing was persisted.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Generation succeeded but the record could not be stored. The full
    /// payload has been logged for manual recovery.
    #[error("failed to persist generated roadmap: {0}")]
    Persistence(StoreError),
}

/// Orchestrates one submission: validate the form, call the generator,
/// persist exactly one record, hand the stored result to rendering.
pub struct RoadmapService {
    store: Arc<dyn Store>,
    generator: Arc<dyn Generator>,
}

impl RoadmapService {
    pub fn new(store: Arc<dyn Store>, generator: Arc<dyn Generator>) -> Self {
        Self { store, generator }
    }

    /// Handle one form submission.
    pub async fn submit(&self, form: &RoadmapForm) -> Result<RoadmapResult, SubmitError> {
        let request = form::validate(form)?;
        let generated = self.generator.generate(&request).await?;

        let result = RoadmapResult {
            id: new_ulid(),
            organization: request.organization,
            size: request.size,
            industry: request.industry,
            maturity: request.maturity,
            goals: request.goals,
            phases: generated.phases,
            chart: generated.chart,
            created_at_ms: now_ms(),
        };

        if let Err(e) = self.store.save(&result) {
            // Regenerating costs another provider call; keep the whole
            // payload in the log so the record can be recovered by hand.
            let payload = serde_json::to_string(&result)
                .unwrap_or_else(|_| format!("{result:?}"));
            tracing::error!(error = %e, roadmap = %payload, "saving roadmap failed");
            return Err(SubmitError::Persistence(e));
        }

        tracing::info!(id = %result.id, organization = %result.organization, "roadmap stored");
        Ok(result)
    }

    /// Fetch one stored roadmap.
    pub fn fetch(&self, id: &str) -> Result<RoadmapResult, StoreError> {
        self.store.get(id)
    }

    /// All stored roadmaps, newest first.
    pub fn history(&self) -> Result<Vec<RoadmapSummary>, StoreError> {
        self.store.list()
    }
}
