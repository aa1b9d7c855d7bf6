//! SQLite tier rule repository.
//!
//! Reads the `certification_tiers` table seeded by the catalog migration.

use credpoints_core::repository::tier::TierRuleRepository;
use credpoints_types::catalog::{Category, Points, TierRule};
use credpoints_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

pub struct SqliteTierRuleRepository {
    pool: DatabasePool,
}

impl SqliteTierRuleRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

fn row_to_rule(row: &sqlx::sqlite::SqliteRow) -> Result<TierRule, RepositoryError> {
    let category: String = row
        .try_get("category")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let label: String = row
        .try_get("label")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let points: f64 = row
        .try_get("points")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let keywords: String = row
        .try_get("keywords")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let priority: i64 = row
        .try_get("priority")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(TierRule {
        category: category
            .parse::<Category>()
            .map_err(RepositoryError::Query)?,
        label,
        points: Points::try_from(points).map_err(RepositoryError::Query)?,
        keywords: split_keywords(&keywords),
        priority: u32::try_from(priority)
            .map_err(|_| RepositoryError::Query(format!("invalid priority: {priority}")))?,
    })
}

impl TierRuleRepository for SqliteTierRuleRepository {
    async fn list_rules(&self) -> Result<Vec<TierRule>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT category, label, points, keywords, priority
             FROM certification_tiers
             ORDER BY priority ASC, id ASC",
        )
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_error)?;

        rows.iter().map(row_to_rule).collect()
    }
}
