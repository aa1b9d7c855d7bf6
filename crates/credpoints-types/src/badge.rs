//! Badge data as retrieved from the certification provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Certification details extracted from one badge page.
///
/// `expires_on == None` means the badge never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeSnapshot {
    pub badge_id: String,
    pub cert_name: String,
    pub issued_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

impl BadgeSnapshot {
    /// Whether the badge is still valid on `today`.
    ///
    /// The expiry day itself still counts as valid.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        match self.expires_on {
            Some(expires_on) => expires_on >= today,
            None => true,
        }
    }
}
