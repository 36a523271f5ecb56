//! HTTP client for an OpenAI-compatible `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use roadmap_core::model::GenerationRequest;

use crate::error::GenerationError;
use crate::{prompt, reply, GeneratedRoadmap, Generator};

/// Matches the original service's completion budget.
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// Cap on the reply body; anything larger is treated as malformed.
const MAX_REPLY_BYTES: usize = 1 << 20;

/// Pause before the single retry of a transient failure.
const RETRY_PAUSE: Duration = Duration::from_millis(500);

/// Connection settings for the hosted completion API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer credential.
    pub api_key: String,
    /// API root, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model id, e.g. `gpt-4o`.
    pub model: String,
    /// Bound on a single request, surfaced as `ProviderUnavailable` on expiry.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    /// Default model id.
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Generation client for an OpenAI-compatible completion API.
///
/// The underlying HTTP handle is built lazily on first use and reused for
/// the process lifetime.
pub struct OpenAiGenerator {
    config: ProviderConfig,
    http: OnceCell<reqwest::Client>,
}

impl OpenAiGenerator {
    /// Create a client; no connection is made until the first call.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: OnceCell::new(),
        }
    }

    async fn http(&self) -> Result<&reqwest::Client, GenerationError> {
        self.http
            .get_or_try_init(|| async {
                reqwest::Client::builder()
                    .timeout(self.config.timeout)
                    .build()
                    .map_err(|e| {
                        GenerationError::ProviderUnavailable(format!("building http client: {e}"))
                    })
            })
            .await
    }

    async fn call_once(&self, body: &ChatRequest<'_>) -> Result<String, GenerationError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut resp = self
            .http()
            .await?
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if let Some(len) = resp.content_length() {
            if len > MAX_REPLY_BYTES as u64 {
                return Err(GenerationError::MalformedResponse(format!(
                    "reply body of {len} bytes exceeds the {MAX_REPLY_BYTES} byte cap"
                )));
            }
        }

        // Read incrementally so an oversized reply is dropped at the cap
        // instead of being buffered whole.
        let mut buf = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(transport_error)? {
            if buf.len() + chunk.len() > MAX_REPLY_BYTES {
                return Err(GenerationError::MalformedResponse(format!(
                    "reply body exceeds the {MAX_REPLY_BYTES} byte cap"
                )));
            }
            buf.extend_from_slice(&chunk);
        }
        let text = String::from_utf8(buf).map_err(|e| {
            GenerationError::MalformedResponse(format!("reply is not valid utf-8: {e}"))
        })?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            GenerationError::MalformedResponse(format!("completion envelope: {e}"))
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::MalformedResponse("reply contained no content".to_string())
            })
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedRoadmap, GenerationError> {
        let user = prompt::user_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            max_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let content = with_single_retry(|| self.call_once(&body)).await?;

        let (phases, chart) = reply::parse_reply(&content)?;
        Ok(GeneratedRoadmap { phases, chart })
    }
}

/// Run `call`, retrying once after a short pause when the failure is
/// transient. Rejections and malformed replies never retry.
async fn with_single_retry<T, F, Fut>(mut call: F) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, GenerationError>>,
{
    match call().await {
        Ok(value) => Ok(value),
        Err(e) if e.retryable() => {
            tracing::warn!(error = %e, "provider call failed; retrying once");
            tokio::time::sleep(RETRY_PAUSE).await;
            call().await
        }
        Err(e) => Err(e),
    }
}

fn transport_error(e: reqwest::Error) -> GenerationError {
    GenerationError::ProviderUnavailable(e.to_string())
}

fn status_error(status: StatusCode, body: &str) -> GenerationError {
    let detail = snippet(body);
    match status.as_u16() {
        401 | 403 => {
            GenerationError::ProviderRejected(format!("auth failed ({status}): {detail}"))
        }
        408 | 429 => {
            GenerationError::ProviderUnavailable(format!("throttled ({status}): {detail}"))
        }
        500..=599 => {
            GenerationError::ProviderUnavailable(format!("server error ({status}): {detail}"))
        }
        _ => GenerationError::ProviderRejected(format!("request rejected ({status}): {detail}")),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn auth_failures_are_rejections() {
        for code in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = status_error(code, "nope");
            assert!(matches!(err, GenerationError::ProviderRejected(_)));
            assert!(!err.retryable());
        }
    }

    #[test]
    fn throttling_and_server_errors_are_retryable() {
        for code in [
            StatusCode::REQUEST_TIMEOUT,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
        ] {
            let err = status_error(code, "later");
            assert!(matches!(err, GenerationError::ProviderUnavailable(_)));
            assert!(err.retryable());
        }
    }

    #[test]
    fn other_client_errors_are_rejections() {
        let err = status_error(StatusCode::BAD_REQUEST, "bad body");
        assert!(matches!(err, GenerationError::ProviderRejected(_)));
    }

    #[test]
    fn snippet_bounds_the_detail() {
        let long = "x".repeat(1000);
        assert_eq!(snippet(&long).len(), 200);
    }

    #[tokio::test]
    async fn transient_failures_are_retried_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = with_single_retry(|| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>(GenerationError::ProviderUnavailable("boom".into()))
            }
        })
        .await;
        assert!(matches!(
            result,
            Err(GenerationError::ProviderUnavailable(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rejections_are_never_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = with_single_retry(|| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<String, _>(GenerationError::ProviderRejected("bad key".into()))
            }
        })
        .await;
        assert!(matches!(result, Err(GenerationError::ProviderRejected(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn a_retry_can_succeed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = with_single_retry(|| {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(GenerationError::ProviderUnavailable("blip".into()))
                } else {
                    Ok("content".to_string())
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "content");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
