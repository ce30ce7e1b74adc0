//! Key names, default fingerprints and compiled patterns.
//!
//! The payload format is reverse engineered and shifts without notice. Block
//! fingerprints below are only the defaults for [`crate::Fingerprints`] and
//! can be overridden per call; the JSON key names are what the extraction
//! code navigates by.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Block Fingerprints (defaults)
// =============================================================================

/// Present in the block carrying the main post data.
pub const FP_POST_DATA: &str = "i18n_reaction_count";

/// Both present in the block carrying group info.
pub const FP_GROUP_INFO: [&str; 2] = ["group_member_profiles", "formatted_count_text"];

/// Both present in the single-photo content block.
pub const FP_PHOTO_CONTENT: [&str; 2] = ["message_preferred_body", "container_story"];

/// Present in the single-photo prefetch block.
pub const FP_PHOTO_PREFETCH: &str = "prefetch_uris_v2";

/// Both present in the reel content block.
pub const FP_REEL_CONTENT: [&str; 2] = ["browser_native_", "creation_story"];

/// Present in reel reaction blocks.
pub const FP_REEL_REACTIONS: &str = "unified_reactors";

/// Present in the watch-page owner block.
pub const FP_WATCH_OWNER: &str = "is_additional_profile_plus";

/// Both present in the watch-page content block.
pub const FP_WATCH_CONTENT: [&str; 2] = ["comment_rendering_instance", "video_view_count_renderer"];

// =============================================================================
// JSON Keys
// =============================================================================

/// Feedback-and-actions summary renderer; also the single-photo content marker.
pub const KEY_FEEDBACK_SUMMARY: &str = "comet_ufi_summary_and_actions_renderer";

pub const KEY_DATA: &str = "data";
pub const KEY_COMET_SECTIONS: &str = "comet_sections";
pub const KEY_GROUP_FEED: &str = "group_hoisted_feed";
pub const KEY_CREATION_TIME: &str = "creation_time";
pub const KEY_ATTACHMENT: &str = "attachment";
pub const KEY_SUBATTACHMENTS_SUFFIX: &str = "subattachments";
pub const KEY_VIEWER_IMAGE: &str = "viewer_image";
pub const KEY_PHOTO_IMAGE: &str = "photo_image";
pub const KEY_RESOLUTION_RENDERER: &str = "comet_photo_attachment_resolution_renderer";
pub const KEY_VIDEO_DELIVERY: &str = "videoDeliveryLegacyFields";

/// Native video URLs, best quality first.
pub const VIDEO_URL_KEYS: [&str; 2] = ["browser_native_hd_url", "browser_native_sd_url"];

/// Marker of cross-platform feedback inside a reel feedback node.
pub const CROSS_PLATFORM_FEEDBACK: &str = "cross_universe_feedback_info";

/// Owner `__typename` prefix of secondary-platform accounts.
pub const CROSS_PLATFORM_OWNER_PREFIX: &str = "InstagramUser";

// =============================================================================
// Profile Picture Fields
// =============================================================================

/// Actor fields probed for a direct picture value, in priority order.
pub const PICTURE_FIELDS: [&str; 7] = [
    "displayPicture",
    "profile_picture_uri",
    "profile_picture",
    "picture",
    "profilePicture",
    "profile_pic_uri",
    "profile_pic",
];

/// Actor fields probed for a nested picture object, in priority order.
pub const NESTED_PICTURE_FIELDS: [&str; 5] = [
    "displayPicture",
    "profilePicture",
    "profile_picture",
    "picture",
    "profile_pic",
];

/// Members of a nested picture object holding the address.
pub const PICTURE_URI_FIELDS: [&str; 3] = ["uri", "url", "src"];

// =============================================================================
// Text Patterns
// =============================================================================

/// Plain non-negative integer, as counts appear when serialized as strings.
pub static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("DIGITS regex"));

/// Actor member names that may hold a picture.
pub static PICTURE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)picture|photo").expect("PICTURE_KEY regex"));

/// Absolute http(s) address.
pub static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("HTTP_URL regex"));
