//! Tracker URL helpers: page detection, profile URL normalization

use crate::error::{Result, TradeToolsError};
use url::Url;

/// Reduce a profile URL to `host/path` without query, fragment or trailing
/// slash. Returns `None` for anything that does not parse as an absolute URL.
pub fn normalize_profile_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    let path = url.path().trim_end_matches('/');
    Some(format!("{host}{path}"))
}

/// URL-equality fallback for identifying the same profile
pub fn same_profile_url(a: &str, b: &str) -> bool {
    match (normalize_profile_url(a), normalize_profile_url(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

/// Whether `page_url` lives on the tracker site rooted at `base_url`
pub fn is_tracker_url(page_url: &str, base_url: &str) -> bool {
    let (Ok(page), Ok(base)) = (Url::parse(page_url), Url::parse(base_url)) else {
        return false;
    };
    page.scheme() == base.scheme() && page.host_str() == base.host_str()
}

/// Profile URLs saved from the popup must point at a user page
pub fn validate_profile_url(url: &str, prefix: &str) -> Result<()> {
    if !url.starts_with(prefix) {
        return Err(TradeToolsError::InvalidProfileUrl {
            url: url.to_string(),
            reason: format!("URL must start with {prefix}"),
        });
    }
    if url[prefix.len()..].trim_matches('/').is_empty() {
        return Err(TradeToolsError::InvalidProfileUrl {
            url: url.to_string(),
            reason: "missing user id".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://ptcgp-tracker.com/u/";

    #[test]
    fn test_normalize_strips_noise() {
        assert_eq!(
            normalize_profile_url("https://PTCGP-tracker.com/u/abc/?tab=1#top").as_deref(),
            Some("ptcgp-tracker.com/u/abc")
        );
        assert_eq!(normalize_profile_url("not a url"), None);
    }

    #[test]
    fn test_same_profile_url() {
        assert!(same_profile_url("https://ptcgp-tracker.com/u/abc", "https://ptcgp-tracker.com/u/abc/"));
        assert!(!same_profile_url("https://ptcgp-tracker.com/u/abc", "https://ptcgp-tracker.com/u/abd"));
    }

    #[test]
    fn test_is_tracker_url() {
        assert!(is_tracker_url("https://ptcgp-tracker.com/u/abc", "https://ptcgp-tracker.com"));
        assert!(!is_tracker_url("https://example.com/u/abc", "https://ptcgp-tracker.com"));
        assert!(!is_tracker_url("chrome://extensions", "https://ptcgp-tracker.com"));
    }

    #[test]
    fn test_validate_profile_url() {
        assert!(validate_profile_url("https://ptcgp-tracker.com/u/abc", PREFIX).is_ok());
        assert!(validate_profile_url("https://ptcgp-tracker.com/", PREFIX).is_err());
        assert!(validate_profile_url("https://ptcgp-tracker.com/u/", PREFIX).is_err());
    }
}
