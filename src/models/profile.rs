//! Who a collection belongs to, and what a single page reveals

use super::collection::Collection;
use crate::utils::url::same_profile_url;
use serde::{Deserialize, Serialize};

/// Identifies a tracker user.
///
/// `uid` is stable and only known from the page's embedded JSON. The
/// profile URL is the fallback for markup-only pages and for the user's own
/// stored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

impl ProfileIdentity {
    pub fn from_uid(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            profile_url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            uid: None,
            profile_url: Some(url.into()),
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.profile_url = url;
        self
    }

    /// Same user: by uid when both sides have one, otherwise by profile URL.
    /// Two identities with nothing comparable are never the same user.
    pub fn is_same_user(&self, other: &ProfileIdentity) -> bool {
        match (&self.uid, &other.uid) {
            (Some(mine), Some(theirs)) if !mine.is_empty() && !theirs.is_empty() => mine == theirs,
            _ => match (&self.profile_url, &other.profile_url) {
                (Some(mine), Some(theirs)) => same_profile_url(mine, theirs),
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub identity: ProfileIdentity,
    pub collection: Collection,
}

/// Everything one page load yields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    /// The profile being displayed
    pub viewed: Option<ProfileSnapshot>,
    /// The logged-in user, when the page embeds it
    pub viewer: Option<ProfileSnapshot>,
}

impl PageSnapshot {
    pub fn is_empty(&self) -> bool {
        self.viewed.is_none() && self.viewer.is_none()
    }

    /// The logged-in user's identity. The embedded viewer wins; `stored`
    /// fills in whatever the page leaves out, and stands in entirely on
    /// markup-only pages.
    pub fn viewer_identity(&self, stored: &ProfileIdentity) -> ProfileIdentity {
        match &self.viewer {
            Some(viewer) => ProfileIdentity {
                uid: viewer.identity.uid.clone().or_else(|| stored.uid.clone()),
                profile_url: viewer
                    .identity
                    .profile_url
                    .clone()
                    .or_else(|| stored.profile_url.clone()),
            },
            None => stored.clone(),
        }
    }

    /// Whether the displayed profile belongs to the logged-in user.
    /// Compared by uid when both sides carry one, by profile URL otherwise.
    pub fn is_own_profile(&self, stored: &ProfileIdentity) -> bool {
        self.viewed
            .as_ref()
            .is_some_and(|viewed| self.viewer_identity(stored).is_same_user(&viewed.identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_wins_over_url() {
        let a = ProfileIdentity::from_uid("42").with_url(Some("https://ptcgp-tracker.com/u/a".into()));
        let b = ProfileIdentity::from_uid("42").with_url(Some("https://ptcgp-tracker.com/u/b".into()));
        let c = ProfileIdentity::from_uid("43").with_url(Some("https://ptcgp-tracker.com/u/a".into()));

        assert!(a.is_same_user(&b));
        assert!(!a.is_same_user(&c));
    }

    #[test]
    fn test_url_fallback() {
        let stored = ProfileIdentity::from_url("https://ptcgp-tracker.com/u/abc/");
        let page = ProfileIdentity::from_uid("42").with_url(Some("https://ptcgp-tracker.com/u/abc?tab=trade".into()));
        assert!(stored.is_same_user(&page));
    }

    fn snapshot(identity: ProfileIdentity) -> ProfileSnapshot {
        ProfileSnapshot {
            identity,
            collection: Collection::default(),
        }
    }

    #[test]
    fn test_embedded_uids_beat_stored_url() {
        let url = "https://ptcgp-tracker.com/u/abc";
        let page = PageSnapshot {
            viewer: Some(snapshot(ProfileIdentity::from_uid("7"))),
            viewed: Some(snapshot(ProfileIdentity::from_uid("9").with_url(Some(url.into())))),
        };
        let stored = ProfileIdentity::from_url(url);

        assert!(!page.is_own_profile(&stored));
        assert_eq!(page.viewer_identity(&stored).profile_url.as_deref(), Some(url));
    }

    #[test]
    fn test_stored_url_identifies_markup_pages() {
        let url = "https://ptcgp-tracker.com/u/abc";
        let page = PageSnapshot {
            viewer: None,
            viewed: Some(snapshot(ProfileIdentity::from_url(format!("{url}/")))),
        };

        assert!(page.is_own_profile(&ProfileIdentity::from_url(url)));
        assert!(!page.is_own_profile(&ProfileIdentity::from_url("https://ptcgp-tracker.com/u/other")));
        assert!(!page.is_own_profile(&ProfileIdentity::default()));
    }

    #[test]
    fn test_nothing_comparable_is_not_same_user() {
        assert!(!ProfileIdentity::default().is_same_user(&ProfileIdentity::default()));
        assert!(!ProfileIdentity::from_uid("1").is_same_user(&ProfileIdentity::from_url("x")));
    }
}
