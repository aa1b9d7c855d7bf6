//! Tier rule repository trait definition.

use credpoints_types::catalog::TierRule;
use credpoints_types::error::RepositoryError;

/// Read-only access to the persisted tier rules.
///
/// Rows are created by the catalog migration; nothing at runtime writes them.
pub trait TierRuleRepository: Send + Sync {
    /// All rules, ordered by ascending priority.
    fn list_rules(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TierRule>, RepositoryError>> + Send;
}
