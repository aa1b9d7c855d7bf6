//! Locating badge URLs and identifiers inside free text.
//!
//! Badge URLs look like `https://www.credly.com/badges/<identifier>`. A bare
//! identifier in UUID form is accepted on its own as well.

use std::sync::LazyLock;

use regex::Regex;

use credpoints_types::error::FetchError;

static BADGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?credly\.com/badges/([A-Za-z0-9][A-Za-z0-9\-]*)")
        .expect("badge URL pattern is valid")
});

static BARE_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\b")
        .expect("uuid pattern is valid")
});

/// A badge mentioned in a user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeReference {
    /// The exact text that referenced the badge (URL or identifier).
    pub matched: String,
    pub badge_id: String,
}

/// Every badge URL or bare identifier in `text`, in order of appearance.
///
/// Identifiers already covered by a URL are not reported twice.
pub fn find_badge_references(text: &str) -> Vec<BadgeReference> {
    let mut found: Vec<(usize, BadgeReference)> = BADGE_URL
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some((
                whole.start(),
                BadgeReference {
                    matched: whole.as_str().to_string(),
                    badge_id: id.as_str().to_string(),
                },
            ))
        })
        .collect();

    for m in BARE_UUID.find_iter(text) {
        let inside_url = found
            .iter()
            .any(|(start, r)| m.start() >= *start && m.end() <= start + r.matched.len());
        if !inside_url {
            found.push((
                m.start(),
                BadgeReference {
                    matched: m.as_str().to_string(),
                    badge_id: m.as_str().to_string(),
                },
            ));
        }
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, r)| r).collect()
}

/// Extract the badge identifier from a URL, or validate a bare identifier.
///
/// Query strings and fragments are ignored. Any path segment after
/// `/badges/` is accepted, so other hosts serving the same layout work too.
pub fn extract_badge_id(badge_url_or_id: &str) -> Result<String, FetchError> {
    let input = badge_url_or_id.trim();
    let candidate = match input.find("/badges/") {
        Some(pos) => input[pos + "/badges/".len()..]
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default(),
        None => input,
    };

    let valid = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(candidate.to_string())
    } else {
        Err(FetchError::InvalidIdentifier(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "e192db17-f8c5-46aa-8f99-8a565223f1d6";

    #[test]
    fn test_find_url_in_question() {
        let text = format!("How many credit points can I get for https://www.credly.com/badges/{ID}?");
        let refs = find_badge_references(&text);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].badge_id, ID);
        assert!(refs[0].matched.starts_with("https://www.credly.com/badges/"));
    }

    #[test]
    fn test_find_url_without_www() {
        let refs = find_badge_references("what about http://credly.com/badges/abc-123 ?");
        assert_eq!(refs[0].badge_id, "abc-123");
    }

    #[test]
    fn test_find_bare_uuid() {
        let refs = find_badge_references(&format!("badge {ID} please"));
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].matched, ID);
    }

    #[test]
    fn test_uuid_inside_url_not_duplicated() {
        let text = format!(
            "https://www.credly.com/badges/{ID} and 90ee2ee9-f6cf-4d9b-8a52-f631d8644d58"
        );
        let refs = find_badge_references(&text);
        let ids: Vec<&str> = refs.iter().map(|r| r.badge_id.as_str()).collect();
        assert_eq!(ids, vec![ID, "90ee2ee9-f6cf-4d9b-8a52-f631d8644d58"]);
    }

    #[test]
    fn test_no_reference_in_hypothetical() {
        assert!(find_badge_references("If I clear AWS Solution Architect Professional?").is_empty());
    }

    #[test]
    fn test_extract_from_url_with_query() {
        let id = extract_badge_id(&format!("https://www.credly.com/badges/{ID}?source=linkedin")).unwrap();
        assert_eq!(id, ID);
    }

    #[test]
    fn test_extract_from_url_with_trailing_path() {
        let id = extract_badge_id(&format!("https://www.credly.com/badges/{ID}/public_url")).unwrap();
        assert_eq!(id, ID);
    }

    #[test]
    fn test_extract_bare_identifier() {
        assert_eq!(extract_badge_id(&format!("  {ID} ")).unwrap(), ID);
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert!(matches!(
            extract_badge_id("not a badge"),
            Err(FetchError::InvalidIdentifier(_))
        ));
        assert!(extract_badge_id("https://www.credly.com/badges/").is_err());
        assert!(extract_badge_id("").is_err());
    }
}
