//! Detecting and decomposing "how many points in total" questions.

use std::sync::LazyLock;

use regex::Regex;

use crate::badge::find_badge_references;
use crate::engine::{is_meaningful_name, keyword_extract};

static TOTAL_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:both|totals?|altogether|combined|cumulative|in\s+all|sum|together)\b")
        .expect("total cue pattern is valid")
});

static BOTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bboth\b").expect("both pattern is valid"));

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:,|&|\+|\band\b|\bplus\b)\s*").expect("separator pattern is valid")
});

/// Which earlier results a totals question pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorScope {
    None,
    /// Results of the last `n` turns that produced any.
    Last(usize),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPlan {
    /// An ordinary one-certification question.
    Single,
    /// Sum the sub-queries plus the selected earlier results.
    Combined {
        subqueries: Vec<String>,
        prior: PriorScope,
    },
}

/// Decide how to answer `query`.
///
/// Without a totals cue ("both", "total", "altogether", ...) the query is a
/// single question. With one, badge references and the parts separated by
/// "and", "plus", "&", "+" or commas become sub-queries. With two or more
/// sub-queries only those are summed. With one, the last earlier result
/// ("both") or every earlier result joins it. With none, the last two
/// ("both") or all earlier results are summed.
pub fn plan_turn(query: &str) -> TurnPlan {
    if !TOTAL_CUE.is_match(query) {
        return TurnPlan::Single;
    }

    let subqueries = split_subqueries(query);
    let both = BOTH.is_match(query);
    let prior = match (subqueries.len(), both) {
        (0, true) => PriorScope::Last(2),
        (1, true) => PriorScope::Last(1),
        (0 | 1, false) => PriorScope::All,
        _ => PriorScope::None,
    };
    TurnPlan::Combined { subqueries, prior }
}

fn split_subqueries(query: &str) -> Vec<String> {
    let mut subqueries = Vec::new();
    let mut rest = query.to_string();
    for reference in find_badge_references(query) {
        rest = rest.replacen(&reference.matched, " ", 1);
        subqueries.push(reference.matched);
    }

    let rest = TOTAL_CUE.replace_all(&rest, " ");
    subqueries.extend(
        SEPARATOR
            .split(&rest)
            .map(str::trim)
            .filter(|part| is_meaningful_name(&keyword_extract(part)))
            .map(str::to_string),
    );
    subqueries
}
