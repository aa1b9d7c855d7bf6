//! Catalog backed by persisted tier rules.

use tracing::warn;

use credpoints_types::catalog::CertificationRecord;

use crate::repository::tier::TierRuleRepository;

use super::{PointCatalog, TierPolicy};

/// Looks certification names up against the tier rules in storage.
///
/// Rules are re-read on every lookup. When the store is unreadable, empty,
/// or holds an inconsistent policy, the built-in default policy answers
/// instead so that lookups stay total.
pub struct CatalogService<R: TierRuleRepository> {
    repo: R,
}

impl<R: TierRuleRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The policy currently in effect.
    pub async fn policy(&self) -> TierPolicy {
        let rules = match self.repo.list_rules().await {
            Ok(rules) if !rules.is_empty() => rules,
            Ok(_) => {
                warn!("catalog has no tier rules, using built-in policy");
                return TierPolicy::default();
            }
            Err(e) => {
                warn!(error = %e, "could not read tier rules, using built-in policy");
                return TierPolicy::default();
            }
        };

        TierPolicy::from_rules(rules).unwrap_or_else(|e| {
            warn!(error = %e, "stored tier rules are inconsistent, using built-in policy");
            TierPolicy::default()
        })
    }
}

impl<R: TierRuleRepository> PointCatalog for CatalogService<R> {
    #[tracing::instrument(name = "catalog.lookup", skip(self))]
    async fn lookup(&self, cert_name: &str) -> CertificationRecord {
        let record = self.policy().await.classify(cert_name);
        tracing::debug!(category = %record.category, points = %record.points, "catalog match");
        record
    }
}
