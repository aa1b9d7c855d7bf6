//! Type-erased [`LlmProvider`].
//!
//! The provider is picked from config at startup, so the phrasing backend
//! cannot be generic over it. `LlmProvider::complete` returns an opaque
//! future, which rules out `dyn LlmProvider`; [`ErasedProvider`] boxes that
//! future instead and is implemented for every provider.

use std::future::Future;
use std::pin::Pin;

use credpoints_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

use super::provider::LlmProvider;

type CompletionFuture<'a> = Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

trait ErasedProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    fn provider_capabilities(&self) -> &ProviderCapabilities;

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn provider_name(&self) -> &str {
        self.name()
    }

    fn provider_capabilities(&self) -> &ProviderCapabilities {
        self.capabilities()
    }

    fn complete_erased<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// Owned provider chosen at runtime.
pub struct BoxLlmProvider {
    inner: Box<dyn ErasedProvider>,
}

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.provider_name()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.provider_capabilities()
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_erased(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credpoints_types::llm::Message;

    use crate::testing::ScriptedLlm;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "test-model".to_string(),
            messages: vec![Message::user("hi")],
            system: None,
            max_tokens: 16,
            temperature: None,
            stop_sequences: None,
        }
    }

    #[tokio::test]
    async fn test_boxed_provider_delegates() {
        let provider = BoxLlmProvider::new(ScriptedLlm::replying("hello"));
        assert_eq!(provider.name(), "scripted");
        assert_eq!(provider.capabilities().max_output_tokens, 256);

        let response = provider.complete(&request()).await.unwrap();
        assert_eq!(response.content, "hello");
        assert_eq!(response.model, "test-model");
    }

    #[tokio::test]
    async fn test_boxed_provider_passes_errors_through() {
        let provider = BoxLlmProvider::new(ScriptedLlm::failing());
        let err = provider.complete(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
    }
}
