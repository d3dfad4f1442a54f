//! Utility functions and helpers

pub mod url;

pub use self::url::{is_tracker_url, normalize_profile_url, same_profile_url, validate_profile_url};
