//! Whether the user's own data is ready for matching

use crate::models::Collection;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stored collections older than this are reported as stale
pub const STALE_DATA_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupStatus {
    pub needs_attention: bool,
    pub is_stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn check_setup_status(
    profile_url: Option<&str>,
    collection: Option<&Collection>,
    now: DateTime<Utc>,
    stale_after_hours: i64,
) -> SetupStatus {
    if profile_url.map_or(true, |url| url.trim().is_empty()) {
        return SetupStatus {
            needs_attention: true,
            is_stale: false,
            reason: Some("No profile URL set".to_string()),
        };
    }

    let Some(collection) = collection else {
        return SetupStatus {
            needs_attention: true,
            is_stale: false,
            reason: Some("No collection data".to_string()),
        };
    };

    let hours_ago = (now - collection.last_update).num_hours();
    let is_stale = hours_ago >= stale_after_hours;

    SetupStatus {
        needs_attention: is_stale,
        is_stale,
        reason: is_stale.then(|| "Collection data is stale".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const URL: Option<&str> = Some("https://ptcgp-tracker.com/u/abc");

    #[test]
    fn test_missing_pieces() {
        let now = Utc::now();
        let status = check_setup_status(None, None, now, STALE_DATA_HOURS);
        assert!(status.needs_attention);
        assert_eq!(status.reason.as_deref(), Some("No profile URL set"));

        let status = check_setup_status(URL, None, now, STALE_DATA_HOURS);
        assert!(status.needs_attention);
        assert_eq!(status.reason.as_deref(), Some("No collection data"));
    }

    #[test]
    fn test_staleness_boundary() {
        let now = Utc::now();
        let fresh = Collection::new(now - Duration::hours(STALE_DATA_HOURS - 1));
        let stale = Collection::new(now - Duration::hours(STALE_DATA_HOURS));

        let status = check_setup_status(URL, Some(&fresh), now, STALE_DATA_HOURS);
        assert!(!status.needs_attention);
        assert_eq!(status.reason, None);

        let status = check_setup_status(URL, Some(&stale), now, STALE_DATA_HOURS);
        assert!(status.needs_attention && status.is_stale);
        assert_eq!(status.reason.as_deref(), Some("Collection data is stale"));
    }
}
