//! Single-shot LLM calls used for wording and name extraction.

use std::time::Duration;

use tracing::{Instrument, debug, info_span, warn};

use credpoints_types::llm::{CompletionRequest, LlmError, Message};

use super::box_provider::BoxLlmProvider;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// A provider pinned to one model and sampling setup.
///
/// Shared (behind an `Arc`) by the name extractor and the response composer.
pub struct PhrasingBackend {
    provider: BoxLlmProvider,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
}

impl PhrasingBackend {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>, temperature: f64, max_tokens: u32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Bound every call to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one system + user exchange and return the trimmed reply text.
    ///
    /// An empty reply is reported as [`LlmError::EmptyResponse`], a call
    /// running past the timeout as [`LlmError::Timeout`].
    pub async fn ask(&self, operation: &'static str, system: &str, user: String) -> Result<String, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(user)],
            system: Some(system.to_string()),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            stop_sequences: None,
        };

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = operation,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
        );

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&request).instrument(span))
            .await
            .map_err(|_| {
                warn!(operation, timeout = ?self.timeout, "phrasing backend timed out");
                LlmError::Timeout(self.timeout)
            })??;
        debug!(
            operation,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = %response.stop_reason,
            "phrasing backend replied"
        );

        let text = response.content.trim().trim_matches('"').trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}
