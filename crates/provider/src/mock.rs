//! Fixed-reply generator for orchestrator and rendering tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use roadmap_core::model::{GenerationRequest, Initiative, Phase, Priority};

use crate::error::GenerationError;
use crate::{GeneratedRoadmap, Generator};

/// Generator that returns a canned reply and counts invocations, so callers
/// can assert the provider was (or was not) reached.
pub struct MockGenerator {
    reply: Result<GeneratedRoadmap, GenerationError>,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Always succeed with `roadmap`.
    pub fn returning(roadmap: GeneratedRoadmap) -> Self {
        Self {
            reply: Ok(roadmap),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `error`.
    pub fn failing(error: GenerationError) -> Self {
        Self {
            reply: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Three phases labelled short/medium/long with one initiative each,
    /// in that order.
    pub fn staged_roadmap() -> GeneratedRoadmap {
        let phase = |label: &str, window: &str, title: &str, priority: Priority| Phase {
            label: label.to_string(),
            window: window.to_string(),
            initiatives: vec![Initiative {
                title: title.to_string(),
                description: format!("{title} for the pilot team."),
                priority,
            }],
        };
        GeneratedRoadmap {
            phases: vec![
                phase("Short-term", "0-6 months", "Run a short pilot", Priority::High),
                phase(
                    "Medium-term",
                    "6-12 months",
                    "Expand the medium rollout",
                    Priority::Medium,
                ),
                phase(
                    "Long-term",
                    "12-24 months",
                    "Institutionalize the long program",
                    Priority::Low,
                ),
            ],
            chart: "gantt\n    title AI Roadmap Timeline\n    dateFormat  YYYY-MM-DD".to_string(),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedRoadmap, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}
