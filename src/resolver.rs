//! Locating a post's content subtree inside its data block.
//!
//! The post data block comes in several shapes depending on where the post
//! lives (profile, page, group) and which layout version served it. Root
//! resolution tries one strategy per known shape, in a fixed order, and the
//! first one that finds its keys wins.

use serde_json::Value;
use tracing::debug;

use crate::blocks::{BlockOrder, BlockSet};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::{
    KEY_COMET_SECTIONS, KEY_CREATION_TIME, KEY_DATA, KEY_FEEDBACK_SUMMARY, KEY_GROUP_FEED,
};
use crate::result::Counts;
use crate::tree;

/// Which shape the root node was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootStrategy {
    /// `data.node.comet_sections`, or `data` itself for single photos.
    NormalPost,
    /// `comet_sections` below the group's hoisted feed.
    GroupPost,
    /// `data.node_v2.comet_sections`.
    GroupPostV2,
}

impl RootStrategy {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NormalPost => "normal post",
            Self::GroupPost => "group post",
            Self::GroupPostV2 => "group post v2",
        }
    }
}

/// A resolved content subtree and the strategy that found it.
#[derive(Debug, Clone, Copy)]
pub struct RootNode<'a> {
    pub strategy: RootStrategy,
    pub node: &'a Value,
}

type Strategy = fn(&Value) -> Option<&Value>;

const STRATEGIES: [(RootStrategy, Strategy); 3] = [
    (RootStrategy::NormalPost, normal_post),
    (RootStrategy::GroupPost, group_post),
    (RootStrategy::GroupPostV2, group_post_v2),
];

fn normal_post(post_json: &Value) -> Option<&Value> {
    let data = tree::first(post_json, KEY_DATA).ok()?;
    if data.get(KEY_FEEDBACK_SUMMARY).is_some() {
        return Some(data);
    }
    data.get("node")?.get(KEY_COMET_SECTIONS)
}

fn group_post(post_json: &Value) -> Option<&Value> {
    let feed = tree::first(post_json, KEY_GROUP_FEED).ok()?;
    tree::first(feed, KEY_COMET_SECTIONS).ok()
}

fn group_post_v2(post_json: &Value) -> Option<&Value> {
    tree::first(post_json, KEY_DATA)
        .ok()?
        .get("node_v2")?
        .get(KEY_COMET_SECTIONS)
}

/// Parse the largest block carrying post data.
pub fn get_post_json(blocks: &BlockSet, options: &Options) -> Result<Value> {
    blocks.find(&options.fingerprints.post_data, BlockOrder::Sorted, "post data")
}

/// Resolve the content subtree of `post_json`.
///
/// Strategies yielding nothing, `null` or an empty object fall through to the
/// next one.
pub fn get_root_node(post_json: &Value) -> Result<RootNode<'_>> {
    STRATEGIES
        .iter()
        .find_map(|(strategy, resolve)| {
            resolve(post_json)
                .filter(|node| tree::is_truthy(node))
                .map(|node| RootNode { strategy: *strategy, node })
        })
        .inspect(|root| debug!(strategy = root.strategy.name(), "resolved root node"))
        .ok_or(Error::StrategyExhausted)
}

/// Likes, comments and shares from the first feedback summary under `node`.
pub fn get_interaction_counts(node: &Value) -> Result<Counts> {
    let summary = tree::first(node, KEY_FEEDBACK_SUMMARY)?;
    let feedback = tree::path(summary, &["feedback"])
        .map_err(|_| Error::missing(format!("{KEY_FEEDBACK_SUMMARY}.feedback")))?;

    let likes = tree::path(feedback, &["i18n_reaction_count"])?;
    let shares = tree::path(feedback, &["i18n_share_count"])?;
    let comments = tree::path(feedback, &["comment_rendering_instance", "comments", "total_count"])?;

    Ok(Counts {
        likes: tree::scalar_text(likes),
        comments: tree::scalar_text(comments),
        shares: tree::scalar_text(shares),
    })
}

/// Epoch seconds from the first `creation_time` under the post metadata section.
pub fn get_creation_time(root: &Value) -> Result<i64> {
    let metadata = tree::path(root, &["context_layout", "story", KEY_COMET_SECTIONS, "metadata"])?;
    let raw = tree::first(metadata, KEY_CREATION_TIME)?;
    tree::as_epoch(raw).ok_or_else(|| Error::missing(KEY_CREATION_TIME))
}

/// Name of the group a post was made in, or empty.
///
/// Blocks that fail to parse are skipped; the name is cosmetic.
#[must_use]
pub fn get_group_name(blocks: &BlockSet, options: &Options) -> String {
    for block in blocks.matching(&options.fingerprints.group_info, BlockOrder::Sorted) {
        let Ok(group_json) = block.parse() else {
            debug!("skipping unparsable group block");
            continue;
        };
        let name = tree::iterate(&group_json, "group")
            .find_map(|group| group.get("name").and_then(Value::as_str))
            .map(str::to_string);
        if let Some(name) = name {
            return name;
        }
    }
    String::new()
}
