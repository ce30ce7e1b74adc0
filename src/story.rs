//! Post normalization: turning a story subtree into a [`Story`].
//!
//! A story subtree has a stable core (`actors`, `message`, `wwwURL`) and a
//! very unstable media section. Media discovery is therefore a list of
//! strategies tried in order, each of which may simply come up empty.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::extractor::reel;
use crate::patterns::{
    HTTP_URL, KEY_ATTACHMENT, KEY_PHOTO_IMAGE, KEY_RESOLUTION_RENDERER, KEY_SUBATTACHMENTS_SUFFIX,
    KEY_VIEWER_IMAGE, NESTED_PICTURE_FIELDS, PICTURE_FIELDS, PICTURE_KEY, PICTURE_URI_FIELDS,
};
use crate::tree;

/// Marker placed before a quoted story in combined text.
pub const QUOTE_MARKER: &str = "╰┈➤";

/// One post as found in the page, with its quoted post if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Story {
    pub author_name: String,
    pub author_id: String,
    pub author_picture: String,
    pub text: String,
    pub url: String,
    pub image_links: Vec<String>,
    pub video_links: Vec<String>,
    pub attached_story: Option<Box<Story>>,
}

impl Story {
    /// Build a story from its subtree.
    ///
    /// Requires `actors[0].name`, `actors[0].id` and `wwwURL`; media and picture discovery
    /// never fail. A quoted story is followed when `attached_story` carries
    /// its own `actors`, and its media is merged into this story's lists.
    pub fn from_json(story: &Value) -> Result<Self> {
        let actor = tree::path(story, &["actors"])?
            .get(0)
            .ok_or_else(|| Error::missing("actors.0"))?;
        let author_name = tree::str_path(actor, &["name"])
            .map_err(|_| Error::missing("actors.0.name"))?
            .to_string();
        let author_id = actor
            .get("id")
            .and_then(tree::scalar_text)
            .ok_or_else(|| Error::missing("actors.0.id"))?;
        let url = tree::str_path(story, &["wwwURL"])?.to_string();

        let mut built = Self {
            author_name,
            author_id,
            author_picture: profile_picture(actor),
            text: tree::optional_text(story, "message"),
            url,
            image_links: image_links(story),
            video_links: video_links(story),
            attached_story: None,
        };

        if let Some(attached) = story
            .get("attached_story")
            .filter(|a| a.get("actors").is_some())
        {
            let attached = Self::from_json(attached)?;
            merge_unique(&mut built.image_links, &attached.image_links);
            merge_unique(&mut built.video_links, &attached.video_links);
            built.attached_story = Some(Box::new(attached));
        }

        Ok(built)
    }

    /// Post text with the quoted story rendered beneath it.
    #[must_use]
    pub fn combined_text(&self) -> String {
        match &self.attached_story {
            Some(quoted) => format!(
                "{}\n{QUOTE_MARKER} {}\n{}",
                self.text, quoted.author_name, quoted.text
            ),
            None => self.text.clone(),
        }
    }
}

/// Append the entries of `extra` that `links` does not have yet.
pub fn merge_unique(links: &mut Vec<String>, extra: &[String]) {
    for link in extra {
        if !links.contains(link) {
            links.push(link.clone());
        }
    }
}

fn unique(links: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    for link in links {
        if !out.contains(&link) {
            out.push(link);
        }
    }
    out
}

fn uris<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<String> {
    unique(
        values
            .into_iter()
            .filter_map(|v| v.get("uri").and_then(Value::as_str))
            .map(str::to_string),
    )
}

// === Images ===

type SetStrategy = fn(&Value) -> Vec<String>;

/// Tried in order on each attachment set.
const SET_STRATEGIES: [SetStrategy; 2] = [images_from_subattachments, images_from_single_media];

/// Image addresses of a story.
///
/// Attachment sets are visited in traversal order and the first set that
/// yields images wins, so an earlier single photo beats a later album. The
/// resolution renderer is only consulted when no set yields anything.
#[must_use]
pub fn image_links(story: &Value) -> Vec<String> {
    attachment_sets(story)
        .find_map(|set| {
            SET_STRATEGIES
                .iter()
                .map(|strategy| strategy(set))
                .find(|images| !images.is_empty())
        })
        .unwrap_or_else(|| images_from_resolution_renderer(story))
}

fn attachment_sets(story: &Value) -> impl Iterator<Item = &Value> {
    tree::iterate(story, KEY_ATTACHMENT).filter(|set| set.is_object())
}

/// Albums: the largest subattachment group that actually carries images.
fn images_from_subattachments(set: &Value) -> Vec<String> {
    let Some(set) = set.as_object() else {
        return Vec::new();
    };
    let groups: Vec<(&Value, usize)> = set
        .iter()
        .filter(|(key, _)| key.ends_with(KEY_SUBATTACHMENTS_SUFFIX))
        .filter_map(|(_, group)| {
            let nodes = group.get("nodes")?;
            Some((group, nodes.as_array().map_or(0, Vec::len)))
        })
        .collect();
    let Some(max_nodes) = groups.iter().map(|(_, n)| *n).max() else {
        return Vec::new();
    };

    groups
        .iter()
        .filter(|(_, n)| *n == max_nodes)
        .map(|(group, _)| tree::all(group, KEY_VIEWER_IMAGE))
        .find(|viewer_images| !viewer_images.is_empty())
        .map(uris)
        .unwrap_or_default()
}

fn is_sticker(set: &Value) -> bool {
    tree::objects(set).any(|obj| obj.get("__typename").and_then(Value::as_str) == Some("Sticker"))
}

/// A single media attachment that is not a sticker.
fn images_from_single_media(set: &Value) -> Vec<String> {
    if set.get("media").is_none() || is_sticker(set) {
        return Vec::new();
    }
    uris(tree::all(set, KEY_PHOTO_IMAGE))
}

/// Last resort for single-image posts whose attachment shape changed.
fn images_from_resolution_renderer(story: &Value) -> Vec<String> {
    tree::first(story, KEY_RESOLUTION_RENDERER)
        .ok()
        .and_then(|renderer| tree::str_path(renderer, &["image", "uri"]).ok())
        .map(|uri| vec![uri.to_string()])
        .unwrap_or_default()
}

// === Videos ===

/// Native video addresses of every attachment that has one.
#[must_use]
pub fn video_links(story: &Value) -> Vec<String> {
    unique(tree::iterate(story, KEY_ATTACHMENT).filter_map(|set| reel::video_link_in(set).ok()))
}

// === Profile picture ===

type PictureProbe = fn(&Map<String, Value>) -> Option<String>;

const PICTURE_PROBES: [PictureProbe; 3] = [direct_picture, nested_picture, scanned_picture];

/// Profile picture address of an actor or owner node, or empty.
#[must_use]
pub fn profile_picture(actor: &Value) -> String {
    let Some(actor) = actor.as_object() else {
        return String::new();
    };
    PICTURE_PROBES
        .iter()
        .find_map(|probe| probe(actor))
        .unwrap_or_default()
}

fn nested_uri(value: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|f| value.get(*f).and_then(Value::as_str))
        .map(str::to_string)
}

fn direct_picture(actor: &Map<String, Value>) -> Option<String> {
    PICTURE_FIELDS.iter().find_map(|field| {
        match actor.get(*field).filter(|v| tree::is_truthy(v))? {
            Value::String(s) => Some(s.clone()),
            Value::Object(nested) => nested_uri(nested, &["uri", "url"]),
            _ => None,
        }
    })
}

fn nested_picture(actor: &Map<String, Value>) -> Option<String> {
    NESTED_PICTURE_FIELDS.iter().find_map(|field| {
        actor
            .get(*field)
            .and_then(Value::as_object)
            .and_then(|nested| nested_uri(nested, &PICTURE_URI_FIELDS))
    })
}

fn scanned_picture(actor: &Map<String, Value>) -> Option<String> {
    actor
        .iter()
        .filter(|(key, _)| PICTURE_KEY.is_match(key))
        .find_map(|(_, value)| match value {
            Value::String(s) if HTTP_URL.is_match(s) => Some(s.clone()),
            Value::Object(nested) => nested_uri(nested, &PICTURE_URI_FIELDS),
            _ => None,
        })
}
