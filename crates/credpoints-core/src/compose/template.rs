//! Fixed reply sentences built from structured results.

use credpoints_types::error::{FetchError, ResolutionError};
use credpoints_types::query::QueryResult;

use super::{CombinedEntry, CombinedOutcome};

/// Single-result reply.
pub fn reply_for(result: &QueryResult) -> String {
    match result.is_valid {
        Some(false) => format!(
            "Sorry, your cert has expired. So you won't get any credit points. \
             But otherwise you would have stood to obtain {} credit points for your {}.",
            result.nominal_points, result.cert_name
        ),
        Some(true) => format!(
            "I see that this is a {}. And it is still valid. So you can be granted {} credit points for it.",
            result.cert_name, result.points
        ),
        None => format!(
            "You will get {} credit points for {}.",
            result.points, result.cert_name
        ),
    }
}

fn failure_reason(err: &ResolutionError) -> String {
    match err {
        ResolutionError::Fetch(FetchError::InvalidIdentifier(_)) => {
            "the link does not contain a valid badge identifier".to_string()
        }
        ResolutionError::Fetch(e) => e.to_string(),
    }
}

/// Apology for a turn whose badge could not be retrieved.
pub fn failure_reply(err: &ResolutionError) -> String {
    format!(
        "Sorry, I could not retrieve certification details for that badge ({}). \
         Please check the link and try again.",
        failure_reason(err)
    )
}

fn status(result: &QueryResult) -> String {
    match result.is_valid {
        Some(true) => "valid".to_string(),
        Some(false) => format!("expired, {} forfeited", result.nominal_points),
        None => "once earned".to_string(),
    }
}

/// One line per certification followed by the total.
pub fn combined_reply(outcome: &CombinedOutcome) -> String {
    let mut lines = vec!["Here is the breakdown:".to_string()];
    for entry in &outcome.entries {
        let line = match entry {
            CombinedEntry::Resolved { result, earlier } => format!(
                "- {}: {} credit points ({}{})",
                result.cert_name,
                result.points,
                status(result),
                if *earlier { ", from earlier in this conversation" } else { "" }
            ),
            CombinedEntry::Failed { reference, error } => format!(
                "- {}: Sorry, I could not retrieve certification details ({}), so it counts as 0.",
                reference,
                failure_reason(error)
            ),
        };
        lines.push(line);
    }
    lines.push(format!("That makes {} credit points in total.", outcome.total));
    lines.join("\n")
}

/// Reply to a totals question when nothing has been scored yet.
pub fn nothing_to_total() -> String {
    "I don't have any certifications in this conversation to add up yet. \
     Ask me about a badge link or a certification first."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use credpoints_types::catalog::{Category, Points};
    use credpoints_types::query::QuerySource;

    fn result(name: &str, points: Points, nominal: Points, is_valid: Option<bool>) -> QueryResult {
        QueryResult {
            cert_name: name.to_string(),
            category: Category::Other,
            points,
            nominal_points: nominal,
            is_valid,
            rationale: String::new(),
            source: QuerySource::Hypothetical,
        }
    }

    #[test]
    fn test_expired_reply_mentions_forfeited_points() {
        let r = result("Terraform Associate", Points::ZERO, Points::whole(5), Some(false));
        let reply = reply_for(&r);
        assert!(reply.starts_with("Sorry, your cert has expired."));
        assert!(reply.contains("5 credit points for your Terraform Associate"));
    }

    #[test]
    fn test_valid_reply() {
        let r = result("AWS AI Practitioner", Points::from_halves(5), Points::from_halves(5), Some(true));
        assert_eq!(
            reply_for(&r),
            "I see that this is a AWS AI Practitioner. And it is still valid. So you can be granted 2.5 credit points for it."
        );
    }

    #[test]
    fn test_hypothetical_reply() {
        let r = result("CKA", Points::from_halves(5), Points::from_halves(5), None);
        assert_eq!(reply_for(&r), "You will get 2.5 credit points for CKA.");
    }

    #[test]
    fn test_failure_reply_names_reason() {
        let reply = failure_reply(&ResolutionError::Fetch(FetchError::Status(404)));
        assert!(reply.starts_with("Sorry, I could not retrieve certification details"));
        assert!(reply.contains("HTTP 404"));
    }

    #[test]
    fn test_combined_reply_lists_total() {
        let outcome = CombinedOutcome {
            entries: vec![
                CombinedEntry::Resolved {
                    result: result("A Professional", Points::whole(10), Points::whole(10), None),
                    earlier: false,
                },
                CombinedEntry::Resolved {
                    result: result("B Associate", Points::ZERO, Points::whole(5), Some(false)),
                    earlier: true,
                },
                CombinedEntry::Failed {
                    reference: "https://www.credly.com/badges/x".to_string(),
                    error: ResolutionError::Fetch(FetchError::Timeout(10)),
                },
            ],
            total: Points::whole(10),
        };
        let reply = combined_reply(&outcome);
        assert!(reply.contains("- A Professional: 10 credit points (once earned)"));
        assert!(reply.contains("- B Associate: 0 credit points (expired, 5 forfeited, from earlier in this conversation)"));
        assert!(reply.contains("timed out after 10s"));
        assert!(reply.ends_with("That makes 10 credit points in total."));
    }
}
