use thiserror::Error;

/// Failure modes of a roadmap generation call.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Transient transport condition: timeout, connect failure, 5xx, 429.
    /// Resubmitting the same request may succeed.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Non-retryable rejection: bad credentials or an invalid request.
    #[error("provider rejected the request: {0}")]
    ProviderRejected(String),

    /// The reply did not decode into a three-phase roadmap.
    #[error("malformed provider reply: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// True when resubmitting the same request may succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable(_))
    }
}
