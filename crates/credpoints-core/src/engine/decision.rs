//! Turning a query into a scored [`QueryResult`].

use chrono::NaiveDate;
use tracing::{debug, warn};

use credpoints_types::badge::BadgeSnapshot;
use credpoints_types::catalog::{CertificationRecord, Points};
use credpoints_types::error::ResolutionError;
use credpoints_types::query::{QueryResult, QuerySource};

use crate::badge::BadgeFetcher;
use crate::catalog::PointCatalog;

use super::extract::NameExtractor;
use super::{Classification, classify};

/// Classifies a query, gathers the facts it needs, and scores it.
pub struct DecisionEngine<C: PointCatalog, F: BadgeFetcher> {
    catalog: C,
    fetcher: F,
    extractor: NameExtractor,
}

impl<C: PointCatalog, F: BadgeFetcher> DecisionEngine<C, F> {
    pub fn new(catalog: C, fetcher: F, extractor: NameExtractor) -> Self {
        Self {
            catalog,
            fetcher,
            extractor,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Score one query as of `today`.
    ///
    /// Badge queries fail only when the badge page cannot be retrieved or
    /// read. Hypothetical queries always produce a result.
    #[tracing::instrument(name = "engine.decide", skip(self, query), fields(%today))]
    pub async fn decide(&self, query: &str, today: NaiveDate) -> Result<QueryResult, ResolutionError> {
        match classify(query) {
            Classification::Badge(reference) => {
                debug!(badge_id = %reference.badge_id, "badge query");
                self.decide_badge(&reference.matched, today).await
            }
            Classification::Hypothetical => {
                let cert_name = self.extractor.extract(query).await;
                debug!(cert_name = %cert_name, "hypothetical query");
                Ok(self.decide_hypothetical(&cert_name).await)
            }
        }
    }

    /// Fetch a badge and score it against its expiry date.
    pub async fn decide_badge(
        &self,
        badge_url_or_id: &str,
        today: NaiveDate,
    ) -> Result<QueryResult, ResolutionError> {
        let snapshot = self.fetcher.fetch(badge_url_or_id).await.map_err(|e| {
            warn!(error = %e, "badge fetch failed");
            ResolutionError::from(e)
        })?;
        let record = self.catalog.lookup(&snapshot.cert_name).await;
        Ok(resolve_badge(&snapshot, &record, today))
    }

    /// Score a certification the user has not earned yet.
    pub async fn decide_hypothetical(&self, cert_name: &str) -> QueryResult {
        let record = self.catalog.lookup(cert_name).await;
        resolve_hypothetical(&record)
    }
}

/// Score a fetched badge. An expired badge earns zero points.
pub fn resolve_badge(snapshot: &BadgeSnapshot, record: &CertificationRecord, today: NaiveDate) -> QueryResult {
    let is_valid = snapshot.is_valid_on(today);
    let points = if is_valid { record.points } else { Points::ZERO };

    let rationale = match (is_valid, snapshot.expires_on) {
        (false, Some(expired_on)) => format!(
            "{} expired on {}; it would otherwise have earned {} credit points ({}), which are forfeited.",
            record.name, expired_on, record.points, record.tier_label
        ),
        (true, Some(expires_on)) => format!(
            "{} is still valid (expires {}); it earns {} credit points ({}).",
            record.name, expires_on, record.points, record.tier_label
        ),
        // A badge without an expiry date is always valid.
        (_, None) => format!(
            "{} is still valid (no expiration date); it earns {} credit points ({}).",
            record.name, record.points, record.tier_label
        ),
    };

    QueryResult {
        cert_name: record.name.clone(),
        category: record.category,
        points,
        nominal_points: record.points,
        is_valid: Some(is_valid),
        rationale,
        source: QuerySource::Badge {
            badge_id: snapshot.badge_id.clone(),
        },
    }
}

/// Score a certification that has not been earned yet. No expiry applies.
pub fn resolve_hypothetical(record: &CertificationRecord) -> QueryResult {
    QueryResult {
        cert_name: record.name.clone(),
        category: record.category,
        points: record.points,
        nominal_points: record.points,
        is_valid: None,
        rationale: format!(
            "{} would earn {} credit points ({}) once earned.",
            record.name, record.points, record.tier_label
        ),
        source: QuerySource::Hypothetical,
    }
}
