//! Decision engine: query classification, name extraction and scoring.

pub mod decision;
pub mod extract;

use crate::badge::{BadgeReference, find_badge_references};

pub use decision::{DecisionEngine, resolve_badge, resolve_hypothetical};
pub use extract::{NameExtractor, is_meaningful_name, keyword_extract};

/// What kind of question a user message asks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The message carries a badge URL or identifier (the first one wins).
    Badge(BadgeReference),
    /// The message names a certification the user has not earned yet.
    Hypothetical,
}

pub fn classify(query: &str) -> Classification {
    find_badge_references(query)
        .into_iter()
        .next()
        .map_or(Classification::Hypothetical, Classification::Badge)
}
