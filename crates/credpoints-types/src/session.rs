//! Conversation state for one interactive session.
//!
//! A [`ConversationState`] is owned by whoever drives the conversation and is
//! passed by `&mut` into each turn. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Points;
use crate::query::{QueryResult, QuerySource};

/// One completed user turn.
///
/// `results` is empty when the turn failed or only reported totals, and has
/// several entries when a combined question was decomposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub query: String,
    pub results: Vec<QueryResult>,
    pub reply: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn points(&self) -> Points {
        self.results.iter().map(|r| r.points).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationState {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    turns: Vec<Turn>,
    cumulative_points: Points,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            turns: Vec::new(),
            cumulative_points: Points::ZERO,
        }
    }

    /// Append a finished turn and add its points to the running total.
    pub fn record(&mut self, turn: Turn) {
        self.cumulative_points += turn.points();
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn cumulative_points(&self) -> Points {
        self.cumulative_points
    }

    /// Results of the most recent `n` turns that produced any, oldest first.
    pub fn recent_results(&self, n: usize) -> Vec<&QueryResult> {
        let mut turns: Vec<&Turn> = self
            .turns
            .iter()
            .rev()
            .filter(|t| !t.results.is_empty())
            .take(n)
            .collect();
        turns.reverse();
        turns.iter().flat_map(|t| t.results.iter()).collect()
    }

    /// Every result recorded in this session, oldest first.
    pub fn all_results(&self) -> Vec<&QueryResult> {
        self.turns.iter().flat_map(|t| t.results.iter()).collect()
    }

    /// Most recent result for a certification named like `name`.
    ///
    /// Names match case-insensitively when either one contains the other, so
    /// "AWS Solutions Architect" finds "AWS Solutions Architect Professional".
    pub fn find_result(&self, name: &str) -> Option<&QueryResult> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.results_newest_first().find(|r| {
            let known = normalize_name(&r.cert_name);
            !known.is_empty() && (known.contains(&wanted) || wanted.contains(&known))
        })
    }

    /// Most recent result fetched from the badge `badge_id`.
    pub fn find_badge_result(&self, badge_id: &str) -> Option<&QueryResult> {
        self.results_newest_first()
            .find(|r| matches!(&r.source, QuerySource::Badge { badge_id: id } if id == badge_id))
    }

    fn results_newest_first(&self) -> impl Iterator<Item = &QueryResult> {
        self.turns.iter().rev().flat_map(|t| t.results.iter().rev())
    }

    /// Forget all turns, keeping the session id.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.cumulative_points = Points::ZERO;
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
