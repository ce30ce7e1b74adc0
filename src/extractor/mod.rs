//! Page-shape specific extraction pipelines.
//!
//! Each pipeline knows which blocks its page shape spreads the post over and
//! how to read them, and all of them produce the same [`ParsedPost`].
//!
//! # Module Structure
//!
//! - `post`: text, photo-album and group posts (root-node resolution)
//! - `reel`: short-form videos, plus the native video link lookup
//! - `single_photo`: the standalone photo viewer
//! - `watch`: the watch-page video player
//!
//! # Usage
//!
//! ```rust
//! use rs_facebed::blocks::BlockSet;
//! use rs_facebed::extractor::post;
//! use rs_facebed::{Error, Options};
//!
//! let blocks = BlockSet::from_html("<html><body></body></html>");
//! let result = post::parse_post(&blocks, &Options::default());
//! assert!(matches!(result, Err(Error::BlockNotFound(_))));
//! ```

pub mod post;
pub mod reel;
pub mod single_photo;
pub mod watch;

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::Error;
use crate::options::Options;
use crate::result::ParsedPost;

/// The page shapes with a dedicated pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Profile, page and group posts.
    Post,
    /// `/reel/<id>`.
    Reel,
    /// `/photo/?fbid=...`.
    SinglePhoto,
    /// `/watch/?v=...`.
    Watch,
}

impl PageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Reel => "reel",
            Self::SinglePhoto => "photo",
            Self::Watch => "watch",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "reel" => Ok(Self::Reel),
            "photo" | "single_photo" => Ok(Self::SinglePhoto),
            "watch" => Ok(Self::Watch),
            other => Err(Error::InvalidOptions(format!("unknown page kind `{other}`"))),
        }
    }
}

/// The banned sentinel when `author_id` is deny-listed.
///
/// Alerts the notifier, if any, without waiting on it.
pub(crate) fn deny_listed(author_id: &str, url: &str, options: &Options) -> Option<ParsedPost> {
    if !options.is_banned(author_id) {
        return None;
    }
    warn!(author_id, url, "banned embed attempted");
    if let Some(notifier) = &options.notifier {
        notifier.notify(&format!("banned embed attempted \"{url}\""));
    }
    Some(ParsedPost::banned())
}
