//! In-memory fakes shared by the unit tests of this crate.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use credpoints_types::badge::BadgeSnapshot;
use credpoints_types::error::FetchError;
use credpoints_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use crate::badge::{BadgeFetcher, extract_badge_id};
use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::phrasing::PhrasingBackend;
use crate::llm::provider::LlmProvider;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Badge fetcher answering from a fixed table. Unknown ids are HTTP 404.
#[derive(Default)]
pub(crate) struct FakeFetcher {
    badges: HashMap<String, Result<BadgeSnapshot, FetchError>>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_badge(mut self, badge_id: &str, cert_name: &str, expires_on: Option<NaiveDate>) -> Self {
        self.badges.insert(
            badge_id.to_string(),
            Ok(BadgeSnapshot {
                badge_id: badge_id.to_string(),
                cert_name: cert_name.to_string(),
                issued_on: date(2022, 1, 10),
                expires_on,
            }),
        );
        self
    }

    pub(crate) fn failing_with(mut self, badge_id: &str, err: FetchError) -> Self {
        self.badges.insert(badge_id.to_string(), Err(err));
        self
    }
}

impl BadgeFetcher for FakeFetcher {
    async fn fetch(&self, badge_url_or_id: &str) -> Result<BadgeSnapshot, FetchError> {
        let badge_id = extract_badge_id(badge_url_or_id)?;
        self.badges
            .get(&badge_id)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

/// LLM provider that plays back canned replies in order.
///
/// `None` entries fail with a provider error. The last entry repeats.
pub(crate) struct ScriptedLlm {
    replies: Mutex<VecDeque<Option<String>>>,
    capabilities: ProviderCapabilities,
    delay: Option<Duration>,
}

impl ScriptedLlm {
    pub(crate) fn script(replies: Vec<Option<&str>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| r.map(str::to_string)).collect()),
            capabilities: ProviderCapabilities {
                max_context_tokens: 8192,
                max_output_tokens: 256,
            },
            delay: None,
        }
    }

    /// Replies with `text`, but only after `delay`.
    pub(crate) fn stalling(text: &str, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::replying(text)
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::script(vec![Some(text)])
    }

    pub(crate) fn failing() -> Self {
        Self::script(vec![None])
    }

    fn next_reply(&self) -> Option<String> {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().flatten()
        } else {
            replies.front().cloned().flatten()
        }
    }
}

impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.next_reply() {
            Some(content) => Ok(CompletionResponse {
                id: "scripted-1".to_string(),
                content,
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            }),
            None => Err(LlmError::Provider {
                message: "scripted failure".to_string(),
            }),
        }
    }
}

pub(crate) fn backend(llm: ScriptedLlm) -> Arc<PhrasingBackend> {
    Arc::new(PhrasingBackend::new(BoxLlmProvider::new(llm), "test-model", 0.0, 256))
}

/// Like [`backend`], with a short call timeout.
pub(crate) fn backend_with_timeout(llm: ScriptedLlm, timeout: Duration) -> Arc<PhrasingBackend> {
    Arc::new(PhrasingBackend::new(BoxLlmProvider::new(llm), "test-model", 0.0, 256).with_timeout(timeout))
}
