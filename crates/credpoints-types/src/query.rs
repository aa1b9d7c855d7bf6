//! Per-query decision results.

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Points};

/// How a query was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuerySource {
    /// Details were fetched from a badge page.
    Badge { badge_id: String },
    /// The certification has not been earned yet; no expiry applies.
    Hypothetical,
}

/// Structured outcome of one decision.
///
/// `is_valid` is `None` for hypothetical queries. For an expired badge
/// `points` is zero and `nominal_points` keeps the forfeited award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub cert_name: String,
    pub category: Category,
    pub points: Points,
    pub nominal_points: Points,
    pub is_valid: Option<bool>,
    pub rationale: String,
    pub source: QuerySource,
}

impl QueryResult {
    pub fn is_hypothetical(&self) -> bool {
        matches!(self.source, QuerySource::Hypothetical)
    }

    pub fn is_expired(&self) -> bool {
        self.is_valid == Some(false)
    }
}
