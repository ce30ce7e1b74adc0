//! Reel pipeline and native video link lookup.
//!
//! Reel pages spread a post over several blocks: the creation story, a block
//! with the native video URLs and one or more reaction blocks. Reaction
//! blocks must be scanned in document order; the largest one is often a
//! different video's.

use serde_json::Value;
use tracing::debug;

use crate::blocks::{BlockOrder, BlockSet};
use crate::error::{Error, Result};
use crate::extractor::deny_listed;
use crate::format::abbreviate_value;
use crate::options::Options;
use crate::patterns::{
    CROSS_PLATFORM_FEEDBACK, CROSS_PLATFORM_OWNER_PREFIX, KEY_CREATION_TIME, KEY_VIDEO_DELIVERY,
    VIDEO_URL_KEYS,
};
use crate::result::{Counts, ParsedPost};
use crate::story::profile_picture;
use crate::tree;

/// Author prefix for accounts living on the secondary platform.
pub const CROSS_PLATFORM_MARKER: &str = "📷 @";

/// Best native video URL under `node`: HD first, then SD.
pub fn video_link_in(node: &Value) -> Result<String> {
    let delivery = tree::first(node, KEY_VIDEO_DELIVERY)?;
    VIDEO_URL_KEYS
        .iter()
        .filter_map(|key| tree::first(delivery, key).ok())
        .find(|link| tree::is_truthy(link))
        .and_then(tree::scalar_text)
        .ok_or_else(|| Error::missing(VIDEO_URL_KEYS.join("|")))
}

/// Video URL from the first block, in document order, that mentions one.
pub fn get_video_link(blocks: &BlockSet, options: &Options) -> Result<String> {
    let block = blocks.find(&options.fingerprints.video_urls, BlockOrder::Document, "video url")?;
    video_link_in(&block)
}

/// Reaction counts of video `video_id`.
///
/// Picks the first reaction block that mentions the id, then reads its first
/// and last `feedback` nodes. The one carrying cross-platform info is used for
/// comments and shares, the other one for likes.
pub fn get_reaction_counts(
    blocks: &BlockSet,
    options: &Options,
    cross_platform: bool,
    video_id: &Value,
) -> Result<Counts> {
    let block = blocks
        .matching(&options.fingerprints.reel_reactions, BlockOrder::Document)
        .filter_map(|block| block.parse().ok())
        .find(|json| tree::iterate(json, "id").any(|id| id == video_id))
        .ok_or(Error::BlockNotFound("reel reactions"))?;

    let mut first_fb = tree::first(&block, "feedback")?;
    let mut last_fb = tree::last(&block, "feedback")?;
    if first_fb.to_string().contains(CROSS_PLATFORM_FEEDBACK) {
        std::mem::swap(&mut first_fb, &mut last_fb);
    }

    let likes = tree::path(first_fb, &["unified_reactors", "count"])?;
    let comments = if cross_platform {
        tree::path(last_fb, &[CROSS_PLATFORM_FEEDBACK, "ig_comment_count"])?
    } else {
        tree::path(last_fb, &["total_comment_count"])?
    };
    let shares = tree::path(last_fb, &["share_count_reduced"])?;

    Ok(Counts {
        likes: abbreviate_value(likes),
        comments: abbreviate_value(comments),
        shares: abbreviate_value(shares),
    })
}

/// Extract a reel from the data blocks of its page.
pub fn parse_reel(blocks: &BlockSet, options: &Options) -> Result<ParsedPost> {
    let content_block = blocks.find(&options.fingerprints.reel_content, BlockOrder::Sorted, "reel content")?;
    let content = tree::first(&content_block, "creation_story")?;
    let video_link = get_video_link(blocks, options)?;

    let video_id = tree::path(content, &["id"])?;
    let owner = tree::path(content, &["short_form_video_context", "video_owner"])?;
    let cross_platform = owner
        .get("__typename")
        .and_then(Value::as_str)
        .is_some_and(|t| t.starts_with(CROSS_PLATFORM_OWNER_PREFIX));
    let author_name = if cross_platform {
        format!("{CROSS_PLATFORM_MARKER}{}", tree::str_path(owner, &["username"])?)
    } else {
        tree::str_path(owner, &["name"])?.to_string()
    };
    let url = tree::str_path(content, &["short_form_video_context", "shareable_url"])?.to_string();
    let date = tree::as_epoch(tree::path(content, &[KEY_CREATION_TIME])?)
        .ok_or_else(|| Error::missing(KEY_CREATION_TIME))?;
    let text = tree::optional_text(content, "message");

    let owner_id = owner.get("id").and_then(tree::scalar_text).unwrap_or_default();
    if let Some(banned) = deny_listed(&owner_id, &url, options) {
        return Ok(banned);
    }

    let counts = get_reaction_counts(blocks, options, cross_platform, video_id)?;
    debug!(cross_platform, "parsed reel");

    Ok(
        ParsedPost::from_parts(author_name, profile_picture(owner), text, url, Some(date), counts)
            .with_videos(vec![video_link]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_video_link_prefers_hd() {
        let node = json!({"media": {"videoDeliveryLegacyFields": {
            "browser_native_sd_url": "sd", "browser_native_hd_url": "hd"
        }}});
        assert_eq!(video_link_in(&node).ok().as_deref(), Some("hd"));
    }

    #[test]
    fn test_video_link_falls_back_to_sd() {
        let node = json!({"videoDeliveryLegacyFields": {
            "browser_native_hd_url": "", "browser_native_sd_url": "sd"
        }});
        assert_eq!(video_link_in(&node).ok().as_deref(), Some("sd"));
    }

    #[test]
    fn test_video_link_missing() {
        assert!(matches!(video_link_in(&json!({})), Err(Error::EmptyResult(_))));
        let node = json!({"videoDeliveryLegacyFields": {"browser_native_hd_url": null}});
        assert!(matches!(video_link_in(&node), Err(Error::FieldMissing(_))));
    }
}
