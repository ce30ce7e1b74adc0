//! Result types for extraction output.
//!
//! Every extractor produces the same [`ParsedPost`] record, whatever the page
//! shape it started from.

use serde::{Deserialize, Serialize};

use crate::format;

/// Interaction counts as display strings.
///
/// `None` means the page shape does not expose that count at all, which is
/// different from a count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub likes: Option<String>,
    pub comments: Option<String>,
    pub shares: Option<String>,
}

/// Uniform post record produced by every extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPost {
    /// Display name, possibly decorated with a group name or platform marker.
    pub author_name: String,

    /// Profile picture address, empty when none was found.
    pub author_picture: String,

    /// Post text, including a rendered quoted story when there is one.
    pub text: String,

    /// Canonical post URL.
    pub url: String,

    /// Creation time in epoch seconds; `None` when unknown.
    pub date: Option<i64>,

    /// Likes, possibly abbreviated.
    pub likes: Option<String>,

    /// Comments, possibly abbreviated.
    pub comments: Option<String>,

    /// Shares, possibly abbreviated.
    pub shares: Option<String>,

    /// Unique image addresses in first-seen order.
    pub image_links: Vec<String>,

    /// Unique video addresses in first-seen order.
    pub video_links: Vec<String>,
}

pub const BANNED_AUTHOR: &str = "Banned";
pub const BANNED_TEXT: &str = "This user is banned by the operators of this embed server";
pub const BANNED_URL: &str = "https://banned.facebook.com";

impl ParsedPost {
    /// Fixed record served in place of posts by deny-listed authors.
    ///
    /// Carries nothing from the live page.
    #[must_use]
    pub fn banned() -> Self {
        Self {
            author_name: BANNED_AUTHOR.to_string(),
            text: BANNED_TEXT.to_string(),
            url: BANNED_URL.to_string(),
            ..Self::default()
        }
    }

    /// Build a record from its parts.
    #[must_use]
    pub(crate) fn from_parts(
        author_name: String,
        author_picture: String,
        text: String,
        url: String,
        date: Option<i64>,
        counts: Counts,
    ) -> Self {
        Self {
            author_name,
            author_picture,
            text,
            url,
            date,
            likes: counts.likes,
            comments: counts.comments,
            shares: counts.shares,
            image_links: Vec::new(),
            video_links: Vec::new(),
        }
    }

    #[must_use]
    pub(crate) fn with_images(mut self, image_links: Vec<String>) -> Self {
        self.image_links = image_links;
        self
    }

    #[must_use]
    pub(crate) fn with_videos(mut self, video_links: Vec<String>) -> Self {
        self.video_links = video_links;
        self
    }

    #[must_use]
    pub fn is_banned_sentinel(&self) -> bool {
        *self == Self::banned()
    }

    /// Counts joined for display, e.g. `❤️ 12 • 💬 3`.
    #[must_use]
    pub fn reactions(&self) -> String {
        format::format_reactions(
            self.likes.as_deref(),
            self.comments.as_deref(),
            self.shares.as_deref(),
        )
    }

    /// Creation time for display in the given UTC offset; empty when unknown.
    #[must_use]
    pub fn date_formatted(&self, timezone_offset: i32) -> String {
        format::format_timestamp(self.date, timezone_offset)
    }
}
