//! Response composer: structured results -> natural-language replies.
//!
//! Every reply starts as a template. With a phrasing backend configured the
//! template is handed to the LLM for rewording; the reworded text is used
//! only if its numbers are exactly the template's, with every point figure
//! present. Expired results keep the template. Any backend error keeps the
//! template too, so composing never fails.

pub mod template;

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::warn;

use credpoints_types::catalog::Points;
use credpoints_types::error::ResolutionError;
use credpoints_types::query::QueryResult;

use crate::llm::phrasing::PhrasingBackend;

/// One line of a combined (cumulative) reply.
#[derive(Debug, Clone, PartialEq)]
pub enum CombinedEntry {
    Resolved {
        result: QueryResult,
        /// Taken from an earlier turn rather than scored in this one.
        earlier: bool,
    },
    Failed {
        reference: String,
        error: ResolutionError,
    },
}

impl CombinedEntry {
    pub fn points(&self) -> Points {
        match self {
            CombinedEntry::Resolved { result, .. } => result.points,
            CombinedEntry::Failed { .. } => Points::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedOutcome {
    pub entries: Vec<CombinedEntry>,
    pub total: Points,
}

impl CombinedOutcome {
    pub fn new(entries: Vec<CombinedEntry>) -> Self {
        let total = entries.iter().map(CombinedEntry::points).sum();
        Self { entries, total }
    }
}

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number pattern is valid"));

fn numbers(text: &str) -> HashSet<&str> {
    NUMBER.find_iter(text).map(|m| m.as_str()).collect()
}

/// Whether `text` states every figure as a standalone number and adds no
/// number that `draft` lacks.
fn keeps_figures(text: &str, draft: &str, figures: &[String]) -> bool {
    let found = numbers(text);
    figures.iter().all(|f| found.contains(f.as_str())) && found.is_subset(&numbers(draft))
}

const REPHRASE_SYSTEM_PROMPT: &str = "You are a friendly assistant that tells employees how many \
credit points their certifications are worth. Rewrite the draft reply so it reads naturally. \
Keep every certification name and every number exactly as written. Do not add facts. \
Respond with the reply only.";

/// Produces the reply text for a turn.
#[derive(Clone, Default)]
pub struct ResponseComposer {
    backend: Option<Arc<PhrasingBackend>>,
}

impl ResponseComposer {
    /// Templates only, no LLM.
    pub fn templated() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Arc<PhrasingBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn uses_llm(&self) -> bool {
        self.backend.is_some()
    }

    #[tracing::instrument(name = "compose.reply", skip_all, fields(cert_name = %result.cert_name))]
    pub async fn compose(&self, result: &QueryResult) -> String {
        let draft = template::reply_for(result);
        if result.is_expired() {
            return draft;
        }
        let figures = vec![result.points.to_string()];
        let facts = serde_json::to_string_pretty(result).unwrap_or_default();
        self.rephrase(draft, &facts, &figures).await
    }

    /// The apology for a failed turn. Never reworded.
    pub fn compose_failure(&self, err: &ResolutionError) -> String {
        template::failure_reply(err)
    }

    #[tracing::instrument(name = "compose.combined", skip_all, fields(entries = outcome.entries.len(), total = %outcome.total))]
    pub async fn compose_combined(&self, outcome: &CombinedOutcome) -> String {
        if outcome.entries.is_empty() {
            return template::nothing_to_total();
        }
        let draft = template::combined_reply(outcome);
        let mut figures = vec![outcome.total.to_string()];
        figures.extend(
            outcome
                .entries
                .iter()
                .filter_map(|e| match e {
                    CombinedEntry::Resolved { result, .. } => Some(result.points.to_string()),
                    CombinedEntry::Failed { .. } => None,
                }),
        );
        self.rephrase(draft.clone(), &draft, &figures).await
    }

    async fn rephrase(&self, draft: String, facts: &str, figures: &[String]) -> String {
        let Some(backend) = &self.backend else {
            return draft;
        };

        let prompt = format!("Draft reply:\n{draft}\n\nFacts:\n{facts}");
        match backend.ask("compose_reply", REPHRASE_SYSTEM_PROMPT, prompt).await {
            Ok(text) if keeps_figures(&text, &draft, figures) => text,
            Ok(_) => {
                warn!("reworded reply changed a point figure, using template");
                draft
            }
            Err(e) => {
                warn!(error = %e, "phrasing backend failed, using template");
                draft
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credpoints_types::catalog::Category;
    use credpoints_types::error::FetchError;
    use credpoints_types::query::QuerySource;

    use std::time::Duration;

    use crate::testing::{ScriptedLlm, backend, backend_with_timeout};

    fn valid_result() -> QueryResult {
        QueryResult {
            cert_name: "AWS AI Practitioner".to_string(),
            category: Category::Other,
            points: Points::from_halves(5),
            nominal_points: Points::from_halves(5),
            is_valid: Some(true),
            rationale: "still valid".to_string(),
            source: QuerySource::Badge {
                badge_id: "abc".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_templated_compose() {
        let reply = ResponseComposer::templated().compose(&valid_result()).await;
        assert!(reply.contains("2.5 credit points"));
        assert!(reply.contains("still valid"));
    }

    #[tokio::test]
    async fn test_llm_rewording_used_when_figures_kept() {
        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::replying(
            "Good news! Your AWS AI Practitioner badge is valid and worth 2.5 credit points.",
        )));
        let reply = composer.compose(&valid_result()).await;
        assert!(reply.starts_with("Good news!"));
    }

    #[tokio::test]
    async fn test_llm_rewording_rejected_when_figure_dropped() {
        let composer =
            ResponseComposer::with_backend(backend(ScriptedLlm::replying("Nice badge, congratulations!")));
        let reply = composer.compose(&valid_result()).await;
        assert_eq!(reply, template::reply_for(&valid_result()));
    }

    #[tokio::test]
    async fn test_expired_result_is_never_reworded() {
        let mut expired = valid_result();
        expired.cert_name = "Terraform Associate".to_string();
        expired.points = Points::ZERO;
        expired.nominal_points = Points::whole(5);
        expired.is_valid = Some(false);

        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::replying(
            "Great news, your badge is valid and you get 50 credit points!",
        )));
        let reply = composer.compose(&expired).await;
        assert_eq!(reply, template::reply_for(&expired));
        assert!(reply.starts_with("Sorry, your cert has expired."));
    }

    #[tokio::test]
    async fn test_llm_rewording_rejected_when_figure_only_embedded() {
        let mut terraform = valid_result();
        terraform.points = Points::whole(5);
        terraform.nominal_points = Points::whole(5);

        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::replying(
            "Your badge is valid and you get 50 credit points!",
        )));
        assert_eq!(composer.compose(&terraform).await, template::reply_for(&terraform));
    }

    #[tokio::test]
    async fn test_llm_rewording_rejected_when_number_added() {
        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::replying(
            "Your badge is worth 2.5 credit points, plus 10 bonus points!",
        )));
        assert_eq!(composer.compose(&valid_result()).await, template::reply_for(&valid_result()));
    }

    #[test]
    fn test_keeps_figures_matches_whole_numbers() {
        let draft = "You will get 5 credit points for Terraform Associate (003).";
        let figures = vec!["5".to_string()];
        assert!(keeps_figures("Terraform Associate (003) earns you 5 credit points.", draft, &figures));
        assert!(!keeps_figures("That is 50 credit points.", draft, &figures));
        assert!(!keeps_figures("That is 5.5 credit points.", draft, &figures));
    }

    #[tokio::test]
    async fn test_stalled_llm_falls_back_to_template() {
        let slow = ScriptedLlm::stalling("Your badge is worth 2.5 credit points.", Duration::from_secs(5));
        let composer = ResponseComposer::with_backend(backend_with_timeout(slow, Duration::from_millis(50)));

        let started = std::time::Instant::now();
        let reply = composer.compose(&valid_result()).await;
        assert_eq!(reply, template::reply_for(&valid_result()));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_llm_error_falls_back_to_template() {
        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::failing()));
        let reply = composer.compose(&valid_result()).await;
        assert_eq!(reply, template::reply_for(&valid_result()));
    }

    #[tokio::test]
    async fn test_failure_is_never_reworded() {
        let composer = ResponseComposer::with_backend(backend(ScriptedLlm::replying("whatever")));
        let reply = composer.compose_failure(&ResolutionError::Fetch(FetchError::Unreachable(
            "connection refused".to_string(),
        )));
        assert!(reply.starts_with("Sorry, I could not retrieve certification details"));
    }

    #[tokio::test]
    async fn test_combined_total() {
        let mut other = valid_result();
        other.cert_name = "Terraform Associate".to_string();
        other.points = Points::whole(5);
        let outcome = CombinedOutcome::new(vec![
            CombinedEntry::Resolved {
                result: valid_result(),
                earlier: false,
            },
            CombinedEntry::Resolved {
                result: other,
                earlier: false,
            },
            CombinedEntry::Failed {
                reference: "bad".to_string(),
                error: ResolutionError::Fetch(FetchError::Status(500)),
            },
        ]);
        assert_eq!(outcome.total, Points::from_halves(15));

        let reply = ResponseComposer::templated().compose_combined(&outcome).await;
        assert!(reply.ends_with("That makes 7.5 credit points in total."));
    }

    #[tokio::test]
    async fn test_combined_empty() {
        let reply = ResponseComposer::templated()
            .compose_combined(&CombinedOutcome::new(vec![]))
            .await;
        assert!(reply.contains("don't have any certifications"));
    }
}
