#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Roadmap generation client for an OpenAI-compatible chat-completions API.
//!
//! The pipeline is: build a directive from the organization intake, call the
//! hosted completion endpoint, parse the structured reply into typed phases
//! plus an opaque chart string. Persistence is the caller's job.

pub mod client;
pub mod error;
pub mod mock;
pub mod prompt;
pub mod reply;

pub use client::{OpenAiGenerator, ProviderConfig};
pub use error::GenerationError;
pub use mock::MockGenerator;

use async_trait::async_trait;
use roadmap_core::model::{GenerationRequest, Phase};

/// Phases plus chart text as produced by a generator.
///
/// Identity and timestamps are assigned by the caller before persisting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRoadmap {
    /// Exactly three phases, validated by the reply parser.
    pub phases: Vec<Phase>,
    /// Opaque timeline source, passed through to rendering unchanged.
    pub chart: String,
}

/// Seam between the request orchestrator and the hosted text-generation API.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a roadmap for a validated request.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedRoadmap, GenerationError>;
}
