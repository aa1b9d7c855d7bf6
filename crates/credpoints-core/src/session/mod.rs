//! Session orchestrator: one user turn in, one reply out.

pub mod cumulative;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info};

use credpoints_types::query::QueryResult;
use credpoints_types::session::{ConversationState, Turn};

use crate::badge::{BadgeFetcher, find_badge_references};
use crate::catalog::PointCatalog;
use crate::compose::{CombinedEntry, CombinedOutcome, ResponseComposer};
use crate::engine::{DecisionEngine, keyword_extract};

pub use cumulative::{PriorScope, TurnPlan, plan_turn};

/// Drives turns through the decision engine and the composer.
///
/// Holds no conversation data itself; every call receives the session's
/// [`ConversationState`], so one orchestrator can serve many sessions.
pub struct SessionOrchestrator<C: PointCatalog, F: BadgeFetcher> {
    engine: DecisionEngine<C, F>,
    composer: ResponseComposer,
}

impl<C: PointCatalog, F: BadgeFetcher> SessionOrchestrator<C, F> {
    pub fn new(engine: DecisionEngine<C, F>, composer: ResponseComposer) -> Self {
        Self { engine, composer }
    }

    pub fn engine(&self) -> &DecisionEngine<C, F> {
        &self.engine
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    /// Answer one user message, dated by the local calendar.
    pub async fn handle_turn(&self, state: &mut ConversationState, query: &str) -> String {
        self.handle_turn_on(state, query, Local::now().date_naive()).await
    }

    /// Answer one user message as of `today` and record it in `state`.
    ///
    /// Always returns a reply: failures become apologies and the session
    /// stays usable.
    #[tracing::instrument(
        name = "session.turn",
        skip(self, state, query),
        fields(session_id = %state.id, turn = state.turns().len() + 1)
    )]
    pub async fn handle_turn_on(&self, state: &mut ConversationState, query: &str, today: NaiveDate) -> String {
        let query = query.trim();
        let (results, reply) = match plan_turn(query) {
            TurnPlan::Single => match self.engine.decide(query, today).await {
                Ok(result) => {
                    let reply = self.composer.compose(&result).await;
                    (vec![result], reply)
                }
                Err(e) => (Vec::new(), self.composer.compose_failure(&e)),
            },
            TurnPlan::Combined { subqueries, prior } => {
                self.handle_combined(state, &subqueries, prior, today).await
            }
        };

        state.record(Turn {
            query: query.to_string(),
            results,
            reply: reply.clone(),
            at: Utc::now(),
        });
        info!(
            cumulative_points = %state.cumulative_points(),
            "turn complete"
        );
        reply
    }

    async fn handle_combined(
        &self,
        state: &ConversationState,
        subqueries: &[String],
        prior: PriorScope,
        today: NaiveDate,
    ) -> (Vec<QueryResult>, String) {
        debug!(subqueries = subqueries.len(), ?prior, "combined turn");

        let earlier: Vec<&QueryResult> = match prior {
            PriorScope::None => Vec::new(),
            PriorScope::Last(n) => state.recent_results(n),
            PriorScope::All => state.all_results(),
        };
        let mut entries: Vec<CombinedEntry> = earlier
            .iter()
            .map(|result| CombinedEntry::Resolved {
                result: (*result).clone(),
                earlier: true,
            })
            .collect();

        // One sub-query at a time, in order.
        let mut scored = Vec::new();
        for subquery in subqueries {
            if let Some(result) = earlier_result(state, subquery) {
                if !earlier.iter().any(|e| std::ptr::eq(*e, result)) {
                    debug!(subquery = %subquery, cert = %result.cert_name, "reusing earlier result");
                    entries.push(CombinedEntry::Resolved {
                        result: result.clone(),
                        earlier: true,
                    });
                }
                continue;
            }
            match self.engine.decide(subquery, today).await {
                Ok(result) => {
                    scored.push(result.clone());
                    entries.push(CombinedEntry::Resolved { result, earlier: false });
                }
                Err(error) => entries.push(CombinedEntry::Failed {
                    reference: subquery.clone(),
                    error,
                }),
            }
        }

        let outcome = CombinedOutcome::new(entries);
        let reply = self.composer.compose_combined(&outcome).await;
        (scored, reply)
    }
}

/// A result this session already holds for `subquery`, matched by badge id
/// or by certification name.
fn earlier_result<'a>(state: &'a ConversationState, subquery: &str) -> Option<&'a QueryResult> {
    match find_badge_references(subquery).first() {
        Some(reference) => state.find_badge_result(&reference.badge_id),
        None => state.find_result(&keyword_extract(subquery)),
    }
}
