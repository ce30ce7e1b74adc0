//! Watch-page pipeline.
//!
//! Owner and content come from two different blocks. The page never shows a
//! share count, so shares stay absent rather than zero.

use crate::blocks::{BlockOrder, BlockSet};
use crate::error::{Error, Result};
use crate::extractor::{deny_listed, reel};
use crate::format::abbreviate_value;
use crate::options::Options;
use crate::patterns::KEY_CREATION_TIME;
use crate::result::{Counts, ParsedPost};
use crate::story::profile_picture;
use crate::tree;
use crate::url_utils::ensure_full_url;

/// Epoch seconds from the first block mentioning a creation time.
pub fn get_date(blocks: &BlockSet, options: &Options) -> Result<i64> {
    let block = blocks.find(&options.fingerprints.creation_time, BlockOrder::Sorted, "creation time")?;
    tree::as_epoch(tree::first(&block, KEY_CREATION_TIME)?).ok_or_else(|| Error::missing(KEY_CREATION_TIME))
}

/// Extract a watch-page video; `path` is the request path, used as the post URL.
pub fn parse_watch(blocks: &BlockSet, path: &str, options: &Options) -> Result<ParsedPost> {
    let content_block = blocks.find(&options.fingerprints.watch_content, BlockOrder::Sorted, "watch content")?;
    let content = tree::path(tree::first(&content_block, "result")?, &["data"])?;
    let video_link = reel::get_video_link(blocks, options)?;
    let url = ensure_full_url(path);

    let owner_block = blocks.find(&options.fingerprints.watch_owner, BlockOrder::Document, "watch owner")?;
    let owner = tree::first(&owner_block, "owner")?;
    let author_name = tree::str_path(owner, &["name"])?.to_string();
    let text = tree::optional_text(content, "title");

    let owner_id = owner.get("id").and_then(tree::scalar_text).unwrap_or_default();
    if let Some(banned) = deny_listed(&owner_id, &url, options) {
        return Ok(banned);
    }

    let counts = Counts {
        likes: abbreviate_value(tree::path(content, &["feedback", "reaction_count", "count"])?),
        comments: abbreviate_value(tree::path(content, &["feedback", "total_comment_count"])?),
        shares: None,
    };
    let date = get_date(blocks, options)?;

    Ok(
        ParsedPost::from_parts(author_name, profile_picture(owner), text, url, Some(date), counts)
            .with_videos(vec![video_link]),
    )
}
