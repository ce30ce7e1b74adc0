//! Configuration options for post extraction.
//!
//! `Options` is built once at startup and shared read-only by every
//! extraction; nothing in the crate mutates it.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::patterns;

/// Receives best-effort alerts, e.g. when a deny-listed author is requested.
///
/// Implementations must return promptly; delivery (webhook, queue) happens on
/// the implementor's side and its outcome is never observed by extraction.
pub trait BanNotifier: Send + Sync {
    /// Deliver `message` without blocking the caller.
    fn notify(&self, message: &str);
}

/// Substring test deciding whether a raw JSON block has a wanted shape.
///
/// Matches when every `all_of` needle occurs and, if `any_of` is non-empty,
/// at least one of its needles occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub all_of: Vec<String>,
    pub any_of: Vec<String>,
}

impl Fingerprint {
    /// Fingerprint requiring every needle.
    #[must_use]
    pub fn all<S: AsRef<str>>(needles: &[S]) -> Self {
        Self {
            all_of: needles.iter().map(|s| s.as_ref().to_string()).collect(),
            any_of: Vec::new(),
        }
    }

    /// Fingerprint requiring at least one needle.
    #[must_use]
    pub fn any<S: AsRef<str>>(needles: &[S]) -> Self {
        Self {
            all_of: Vec::new(),
            any_of: needles.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|n| text.contains(n.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|n| text.contains(n.as_str())))
    }
}

/// Block fingerprints used by each extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprints {
    /// Generic post data block.
    pub post_data: Fingerprint,
    /// Group info block (group name header).
    pub group_info: Fingerprint,
    /// Block holding the feedback summary renderer.
    pub interactions: Fingerprint,
    /// Single-photo content block.
    pub photo_content: Fingerprint,
    /// Single-photo prefetch block.
    pub photo_prefetch: Fingerprint,
    /// Reel content block.
    pub reel_content: Fingerprint,
    /// Any block carrying a native video URL.
    pub video_urls: Fingerprint,
    /// Reel reaction blocks.
    pub reel_reactions: Fingerprint,
    /// Watch-page owner block.
    pub watch_owner: Fingerprint,
    /// Watch-page content block.
    pub watch_content: Fingerprint,
    /// Block carrying a creation time.
    pub creation_time: Fingerprint,
}

impl Default for Fingerprints {
    fn default() -> Self {
        Self {
            post_data: Fingerprint::all(&[patterns::FP_POST_DATA]),
            group_info: Fingerprint::all(&patterns::FP_GROUP_INFO),
            interactions: Fingerprint::all(&[patterns::KEY_FEEDBACK_SUMMARY]),
            photo_content: Fingerprint::all(&patterns::FP_PHOTO_CONTENT),
            photo_prefetch: Fingerprint::all(&[patterns::FP_PHOTO_PREFETCH]),
            reel_content: Fingerprint::all(&patterns::FP_REEL_CONTENT),
            video_urls: Fingerprint::any(&patterns::VIDEO_URL_KEYS),
            reel_reactions: Fingerprint::all(&[patterns::FP_REEL_REACTIONS]),
            watch_owner: Fingerprint::all(&[patterns::FP_WATCH_OWNER]),
            watch_content: Fingerprint::all(&patterns::FP_WATCH_CONTENT),
            creation_time: Fingerprint::all(&[patterns::KEY_CREATION_TIME]),
        }
    }
}

/// Configuration options for post extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_facebed::Options;
///
/// let options = Options {
///     banned_users: [100_004_000_000_001].into_iter().collect(),
///     timezone_offset: 0,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Options {
    /// Numeric author ids whose posts are replaced by the banned sentinel.
    ///
    /// Default: empty
    pub banned_users: HashSet<u64>,

    /// Alert sink told about requests for deny-listed authors.
    ///
    /// Default: `None` (the event is only logged)
    pub notifier: Option<Arc<dyn BanNotifier>>,

    /// Display offset from UTC in whole hours, -12 to 14.
    ///
    /// Default: `7`
    pub timezone_offset: i32,

    /// Block fingerprints.
    ///
    /// Default: [`Fingerprints::default`]
    pub fingerprints: Fingerprints,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            banned_users: HashSet::new(),
            notifier: None,
            timezone_offset: 7,
            fingerprints: Fingerprints::default(),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("banned_users", &self.banned_users)
            .field("notifier", &self.notifier.as_ref().map(|_| "<notifier>"))
            .field("timezone_offset", &self.timezone_offset)
            .field("fingerprints", &self.fingerprints)
            .finish()
    }
}

impl Options {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(-12..=14).contains(&self.timezone_offset) {
            return Err(Error::InvalidOptions(format!(
                "timezone offset {} outside -12..=14",
                self.timezone_offset
            )));
        }
        Ok(())
    }

    /// Whether `author_id` is on the deny-list.
    ///
    /// Ids arrive as decimal strings; anything unparsable is never banned.
    #[must_use]
    pub fn is_banned(&self, author_id: &str) -> bool {
        author_id
            .trim()
            .parse::<u64>()
            .is_ok_and(|id| self.banned_users.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.banned_users.is_empty());
        assert!(options.notifier.is_none());
        assert_eq!(options.timezone_offset, 7);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_timezone_range() {
        for bad in [-13, 15] {
            let options = Options { timezone_offset: bad, ..Options::default() };
            assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
        }
        for good in [-12, 0, 14] {
            let options = Options { timezone_offset: good, ..Options::default() };
            assert!(options.validate().is_ok());
        }
    }

    #[test]
    fn test_is_banned_parses_ids() {
        let options = Options {
            banned_users: [42].into_iter().collect(),
            ..Options::default()
        };
        assert!(options.is_banned("42"));
        assert!(options.is_banned(" 42 "));
        assert!(!options.is_banned("43"));
        assert!(!options.is_banned("pfbid42"));
    }

    #[test]
    fn test_fingerprint_modes() {
        let all = Fingerprint::all(&["a", "b"]);
        assert!(all.matches("xaxbx"));
        assert!(!all.matches("xax"));

        let any = Fingerprint::any(&["hd_url", "sd_url"]);
        assert!(any.matches("..sd_url.."));
        assert!(!any.matches("..url.."));

        assert!(Fingerprint::default().matches("anything"));
    }

    #[test]
    fn test_default_fingerprints_use_reverse_engineered_markers() {
        let fp = Fingerprints::default();
        assert!(fp.post_data.matches(r#"{"i18n_reaction_count":"12"}"#));
        assert!(fp.reel_content.matches(r#"{"browser_native_hd_url":1,"creation_story":{}}"#));
        assert!(!fp.reel_content.matches(r#"{"creation_story":{}}"#));
    }
}
