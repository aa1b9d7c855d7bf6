//! Point catalog: certification name -> tier and credit points.
//!
//! - `TierPolicy`: ordered keyword rules, pure and testable
//! - `PointCatalog`: the lookup port used by the decision engine
//! - `CatalogService`: `PointCatalog` backed by a `TierRuleRepository`
//! - `StaticCatalog`: `PointCatalog` over an in-memory policy

pub mod policy;
pub mod service;

use credpoints_types::catalog::CertificationRecord;

pub use policy::{PolicyError, TierPolicy};
pub use service::CatalogService;

/// Total lookup from a certification name to its catalog record.
///
/// Never fails: names that match no rule resolve to the `Other` tier.
pub trait PointCatalog: Send + Sync {
    fn lookup(
        &self,
        cert_name: &str,
    ) -> impl std::future::Future<Output = CertificationRecord> + Send;
}

/// Catalog over a fixed, in-memory policy.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    policy: TierPolicy,
}

impl StaticCatalog {
    pub fn new(policy: TierPolicy) -> Self {
        Self { policy }
    }
}

impl PointCatalog for StaticCatalog {
    async fn lookup(&self, cert_name: &str) -> CertificationRecord {
        self.policy.classify(cert_name)
    }
}
