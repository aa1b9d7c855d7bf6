//! Badge fetcher port and badge identifier parsing.

pub mod identifier;

use credpoints_types::badge::BadgeSnapshot;
use credpoints_types::error::FetchError;

pub use identifier::{BadgeReference, extract_badge_id, find_badge_references};

/// Retrieves certification details for one badge.
///
/// `badge_url_or_id` is either a full badge URL or a bare identifier.
/// Implementations must not cache and must bound the time spent on the
/// network, reporting an overrun as [`FetchError::Timeout`].
pub trait BadgeFetcher: Send + Sync {
    fn fetch(
        &self,
        badge_url_or_id: &str,
    ) -> impl std::future::Future<Output = Result<BadgeSnapshot, FetchError>> + Send;
}
