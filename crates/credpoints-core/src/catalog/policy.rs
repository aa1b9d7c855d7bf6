//! Keyword-based tier policy.
//!
//! Rules are checked in ascending priority and the first rule with a keyword
//! contained in the lowercased certification name wins. With the default
//! rules a name containing both "professional" and "hashicorp" is therefore
//! a Professional certification.

use credpoints_types::catalog::{Category, CertificationRecord, Points, TierRule};

/// Name used when no certification name could be extracted at all.
pub const UNKNOWN_CERTIFICATION: &str = "Unknown certification";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PolicyError {
    #[error("tier '{category}' awards {actual} points, expected {expected}")]
    PointsMismatch {
        category: Category,
        expected: Points,
        actual: Points,
    },

    #[error("tier '{0}' has no keywords")]
    NoKeywords(Category),
}

/// Ordered keyword rules plus the catch-all `Other` tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierPolicy {
    rules: Vec<TierRule>,
    fallback: TierRule,
}

impl TierPolicy {
    /// Build a policy from persisted rules.
    ///
    /// Rules are sorted by priority. An `Other` row only supplies the label
    /// of the fallback tier; its keywords are ignored. Every rule must award
    /// the nominal points of its category.
    pub fn from_rules(rules: Vec<TierRule>) -> Result<Self, PolicyError> {
        let mut fallback = default_fallback();
        let mut matching = Vec::with_capacity(rules.len());

        for mut rule in rules {
            let expected = rule.category.nominal_points();
            if rule.points != expected {
                return Err(PolicyError::PointsMismatch {
                    category: rule.category,
                    expected,
                    actual: rule.points,
                });
            }

            if rule.category == Category::Other {
                fallback.label = rule.label;
                continue;
            }

            rule.keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if rule.keywords.is_empty() {
                return Err(PolicyError::NoKeywords(rule.category));
            }
            matching.push(rule);
        }

        matching.sort_by_key(|r| r.priority);
        Ok(Self {
            rules: matching,
            fallback,
        })
    }

    pub fn rules(&self) -> &[TierRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &TierRule {
        &self.fallback
    }

    /// Resolve a certification name to its catalog record.
    pub fn classify(&self, cert_name: &str) -> CertificationRecord {
        let trimmed = cert_name.trim();
        let lowered = trimmed.to_lowercase();

        let rule = self
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .unwrap_or(&self.fallback);

        CertificationRecord {
            name: if trimmed.is_empty() {
                UNKNOWN_CERTIFICATION.to_string()
            } else {
                trimmed.to_string()
            },
            category: rule.category,
            tier_label: rule.label.clone(),
            points: rule.points,
        }
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        let rule = |category: Category, keywords: &[&str], priority: u32| TierRule {
            category,
            label: category.label().to_string(),
            points: category.nominal_points(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            priority,
        };

        Self {
            rules: vec![
                rule(Category::Professional, &["professional"], 10),
                rule(Category::Specialty, &["specialty"], 20),
                rule(Category::Associate, &["associate"], 30),
                rule(Category::Hashicorp, &["hashicorp", "terraform"], 40),
            ],
            fallback: default_fallback(),
        }
    }
}

fn default_fallback() -> TierRule {
    TierRule {
        category: Category::Other,
        label: Category::Other.label().to_string(),
        points: Category::Other.nominal_points(),
        keywords: Vec::new(),
        priority: u32::MAX,
    }
}
