//! Generic post pipeline: text posts, photo albums, shares and group posts.

use tracing::debug;

use crate::blocks::BlockSet;
use crate::error::Result;
use crate::extractor::deny_listed;
use crate::options::Options;
use crate::resolver;
use crate::result::ParsedPost;
use crate::story::Story;
use crate::tree;

/// Extract a post from the data blocks of its page.
///
/// The author header gets the group name appended when the post lives in a
/// group. Deny-listed authors yield [`ParsedPost::banned`] as soon as the
/// story is known.
pub fn parse_post(blocks: &BlockSet, options: &Options) -> Result<ParsedPost> {
    let post_json = resolver::get_post_json(blocks, options)?;
    let root = resolver::get_root_node(&post_json)?;
    let story = Story::from_json(tree::path(root.node, &["content", "story"])?)?;

    if let Some(banned) = deny_listed(&story.author_id, &story.url, options) {
        return Ok(banned);
    }

    let counts = resolver::get_interaction_counts(root.node)?;
    let date = resolver::get_creation_time(root.node)?;

    let group_name = resolver::get_group_name(blocks, options);
    let header = if group_name.is_empty() {
        story.author_name.clone()
    } else {
        format!("{} • {group_name}", story.author_name)
    };
    debug!(
        strategy = root.strategy.name(),
        images = story.image_links.len(),
        videos = story.video_links.len(),
        "parsed post"
    );

    let text = story.combined_text().trim().to_string();
    Ok(
        ParsedPost::from_parts(header, story.author_picture, text, story.url, Some(date), counts)
            .with_images(story.image_links)
            .with_videos(story.video_links),
    )
}
