//! Single-photo viewer pipeline.

use crate::blocks::{BlockOrder, BlockSet};
use crate::error::{Error, Result};
use crate::extractor::deny_listed;
use crate::options::Options;
use crate::patterns::{FP_PHOTO_PREFETCH, KEY_DATA};
use crate::resolver;
use crate::result::ParsedPost;
use crate::story::profile_picture;
use crate::tree;
use crate::url_utils::ensure_full_url;

/// The photo itself, from the first prefetched URI.
pub fn get_single_image(blocks: &BlockSet, options: &Options) -> Result<String> {
    let block = blocks.find(&options.fingerprints.photo_prefetch, BlockOrder::Sorted, "photo prefetch")?;
    let prefetch = tree::first(&block, FP_PHOTO_PREFETCH)?;
    let entry = prefetch
        .get(0)
        .ok_or_else(|| Error::missing(format!("{FP_PHOTO_PREFETCH}.0")))?;
    Ok(tree::str_path(entry, &["uri"])?.to_string())
}

/// Extract a photo post; `path` is the request path, used as the post URL.
pub fn parse_single_photo(blocks: &BlockSet, path: &str, options: &Options) -> Result<ParsedPost> {
    let content_block = blocks.find(&options.fingerprints.photo_content, BlockOrder::Sorted, "photo content")?;
    let content = tree::first(&content_block, KEY_DATA)?;
    let interactions = blocks.find(&options.fingerprints.interactions, BlockOrder::Sorted, "photo interactions")?;

    let text = tree::optional_text(content, "message");
    let owner = tree::path(content, &["owner"])?;
    let author_name = tree::str_path(owner, &["name"])?.to_string();
    let date = tree::as_epoch(tree::path(content, &["created_time"])?)
        .ok_or_else(|| Error::missing("created_time"))?;
    let url = ensure_full_url(path);

    let owner_id = owner.get("id").and_then(tree::scalar_text).unwrap_or_default();
    if let Some(banned) = deny_listed(&owner_id, &url, options) {
        return Ok(banned);
    }

    let counts = resolver::get_interaction_counts(&interactions)?;
    let image = get_single_image(blocks, options)?;

    Ok(
        ParsedPost::from_parts(author_name, profile_picture(owner), text.trim().to_string(), url, Some(date), counts)
            .with_images(vec![image]),
    )
}
