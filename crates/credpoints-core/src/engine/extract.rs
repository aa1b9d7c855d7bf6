//! Certification name extraction from free-text questions.
//!
//! The keyword extractor removes question phrasing ("if I clear", "how many
//! points will I get", "cert") and keeps the longest remaining fragment.
//! When a phrasing backend is configured it is asked first, and any failure
//! or empty answer falls back to the keyword extractor.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::llm::phrasing::PhrasingBackend;

static QUESTION_PHRASES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)\b(?:
            if\s+i\s+(?:were\s+to\s+)?(?:clear|pass|get|earn|complete|obtain|achieve|take|do|cleared|passed|earned|completed|obtained)
          | how\s+many\s+(?:credit\s+)?points?
          | how\s+much
          | what\s+(?:will|would|do|does|can|could|is|are)\s+i\s+(?:get|earn|receive|obtain)
          | (?:will|would|do|can|could|shall|should)\s+i\s+(?:get|earn|receive|obtain|be\s+granted|be\s+awarded)
          | what\s+about | how\s+about | what\s+if | tell\s+me
          | (?:credit\s+)?points? | credits?
          | certifications? | certificates? | certs? | exams? | badges?
        )\b",
    )
    .expect("question phrase pattern is valid")
});

static FRAGMENT_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[|?!;]").expect("fragment pattern is valid"));

/// Words trimmed from both ends of a fragment.
const EDGE_WORDS: &[&str] = &[
    "a", "about", "after", "also", "an", "and", "are", "be", "both", "for", "get", "i", "if", "in",
    "is", "it", "its", "me", "my", "now", "of", "on", "once", "so", "that", "the", "then", "this",
    "to", "was", "what", "when", "will", "with", "worth", "would",
];

/// Words that on their own never make a certification name.
const FILLER_WORDS: &[&str] = &[
    "add", "adds", "all", "already", "altogether", "another", "any", "combined", "come", "comes",
    "count", "cumulative", "do", "does", "earn", "earned", "far", "give", "gives", "got", "had",
    "has", "have", "how", "many", "much", "one", "ones", "sum", "together", "total", "totals", "two",
    "up", "we", "you",
];

fn is_edge_word(word: &str) -> bool {
    EDGE_WORDS.contains(&word.to_lowercase().as_str())
}

fn is_filler_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    EDGE_WORDS.contains(&lower.as_str()) || FILLER_WORDS.contains(&lower.as_str())
}

fn trim_edge_words(fragment: &str) -> String {
    let words: Vec<&str> = fragment
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| matches!(c, ',' | '.' | '"' | '\'' | '(' | ')')))
        .filter(|w| !w.is_empty())
        .collect();

    let start = words.iter().position(|w| !is_edge_word(w));
    let end = words.iter().rposition(|w| !is_edge_word(w));
    match (start, end) {
        (Some(start), Some(end)) => words[start..=end].join(" "),
        _ => String::new(),
    }
}

/// Best-effort certification name from a question, without any LLM.
///
/// Returns an empty string when nothing name-like is left.
pub fn keyword_extract(query: &str) -> String {
    let stripped = QUESTION_PHRASES.replace_all(query, "|");
    FRAGMENT_BREAK
        .split(&stripped)
        .map(trim_edge_words)
        .filter(|fragment| is_meaningful_name(fragment))
        .max_by_key(|fragment| fragment.len())
        .unwrap_or_default()
}

/// Whether `name` contains at least one word that is not question filler.
pub fn is_meaningful_name(name: &str) -> bool {
    name.split_whitespace()
        .any(|w| w.chars().any(char::is_alphanumeric) && !is_filler_word(w))
}

const EXTRACT_SYSTEM_PROMPT: &str = "Extract the certification name mentioned in the user's question. \
The user may be asking about a certification they hope to earn (for example \"if I clear ...\" or \
\"how many points will I get for ...\"). Respond with just the certification name and nothing else. \
If no certification is mentioned, respond with NONE.";

/// Pulls the certification name out of a hypothetical question.
#[derive(Clone, Default)]
pub struct NameExtractor {
    backend: Option<Arc<PhrasingBackend>>,
}

impl NameExtractor {
    /// Rule-based extraction only.
    pub fn keyword_only() -> Self {
        Self { backend: None }
    }

    /// Ask the phrasing backend first, falling back to rules.
    pub fn with_backend(backend: Arc<PhrasingBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub async fn extract(&self, query: &str) -> String {
        if let Some(backend) = &self.backend {
            match backend
                .ask("extract_certification", EXTRACT_SYSTEM_PROMPT, format!("User question: \"{query}\""))
                .await
            {
                Ok(answer) => {
                    let name = answer.lines().next().unwrap_or_default().trim().to_string();
                    if !name.eq_ignore_ascii_case("none") && is_meaningful_name(&name) {
                        debug!(cert_name = %name, "extracted certification name with LLM");
                        return name;
                    }
                    debug!(answer = %answer, "LLM found no certification name");
                }
                Err(e) => {
                    warn!(error = %e, "LLM name extraction failed, using keyword extraction");
                }
            }
        }
        keyword_extract(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::testing::{ScriptedLlm, backend, backend_with_timeout};

    #[test]
    fn test_extract_if_i_clear() {
        assert_eq!(
            keyword_extract("If I clear AWS Solution Architect Professional how many points will I get?"),
            "AWS Solution Architect Professional"
        );
    }

    #[test]
    fn test_extract_how_many_points_for() {
        assert_eq!(
            keyword_extract("How many points for Terraform Associate?"),
            "Terraform Associate"
        );
    }

    #[test]
    fn test_extract_drops_articles_and_cert_word() {
        assert_eq!(
            keyword_extract("What would I get for the Google Cloud Digital Leader cert"),
            "Google Cloud Digital Leader"
        );
    }

    #[test]
    fn test_extract_keeps_certified_and_punctuation_inside_name() {
        assert_eq!(
            keyword_extract("How many credit points will I get for HashiCorp Certified: Terraform Associate?"),
            "HashiCorp Certified: Terraform Associate"
        );
    }

    #[test]
    fn test_extract_trailing_worth() {
        assert_eq!(
            keyword_extract("How many points is AWS Cloud Practitioner worth?"),
            "AWS Cloud Practitioner"
        );
    }

    #[test]
    fn test_extract_plain_name() {
        assert_eq!(keyword_extract("Azure Solutions Architect Expert"), "Azure Solutions Architect Expert");
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(keyword_extract("how many points will I get?"), "");
        assert_eq!(keyword_extract(""), "");
    }

    #[test]
    fn test_meaningful_name() {
        assert!(is_meaningful_name("Terraform Associate"));
        assert!(!is_meaningful_name("what is my total"));
        assert!(!is_meaningful_name("   "));
    }

    #[tokio::test]
    async fn test_extractor_prefers_llm_answer() {
        let extractor = NameExtractor::with_backend(backend(ScriptedLlm::replying(
            "AWS Certified Solutions Architect - Professional\n",
        )));
        let name = extractor.extract("if I clear SA pro?").await;
        assert_eq!(name, "AWS Certified Solutions Architect - Professional");
    }

    #[tokio::test]
    async fn test_extractor_falls_back_on_llm_error() {
        let extractor = NameExtractor::with_backend(backend(ScriptedLlm::failing()));
        let name = extractor.extract("How many points for Terraform Associate?").await;
        assert_eq!(name, "Terraform Associate");
    }

    #[tokio::test]
    async fn test_extractor_falls_back_on_timeout() {
        let slow = ScriptedLlm::stalling("Something Else", Duration::from_secs(5));
        let extractor = NameExtractor::with_backend(backend_with_timeout(slow, Duration::from_millis(50)));
        let name = extractor.extract("How many points for Terraform Associate?").await;
        assert_eq!(name, "Terraform Associate");
    }

    #[tokio::test]
    async fn test_extractor_falls_back_on_none_answer() {
        let extractor = NameExtractor::with_backend(backend(ScriptedLlm::replying("NONE")));
        let name = extractor.extract("What about CKA?").await;
        assert_eq!(name, "CKA");
    }
}
