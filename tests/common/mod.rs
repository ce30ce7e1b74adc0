//! Page builders shared by the integration tests.
//!
//! Real pages are too large and too personal to check in, so every test
//! assembles a page from the handful of blocks its extractor reads plus some
//! decoys.

#![allow(dead_code)] // each test binary uses a different subset

use serde_json::{json, Value};

pub const CREATED: i64 = 1_714_000_000;

/// A data-carrier script with its real serialized length declared.
pub fn script(payload: &Value) -> String {
    let body = payload.to_string();
    script_with_len(body.len(), payload)
}

/// A data-carrier script with an arbitrary declared length.
pub fn script_with_len(declared_len: usize, payload: &Value) -> String {
    format!(
        r#"<script type="application/json" data-content-len="{declared_len}" data-sjs>{payload}</script>"#
    )
}

/// A page made of `blocks`, in document order, plus markup noise.
pub fn page(blocks: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Post</title>\
         <script>window.__noise = 1;</script>{}</head>\
         <body><div id=\"mount\"></div></body></html>",
        blocks.concat()
    )
}

/// Block that never matches any extractor.
pub fn decoy(n: usize) -> String {
    script(&json!({"require": [["Bootloader", "handle", null, [{
        "module": format!("Decoy{n}"),
        "deps": [{"id": n, "name": "noise"}]
    }]]]}))
}

pub fn actor(id: &str, name: &str) -> Value {
    json!({"__typename": "User", "id": id, "name": name})
}

/// `comet_sections` of a post around `story`, with counts and a creation time.
pub fn sections(story: Value) -> Value {
    json!({
        "content": {"story": story},
        "feedback": {"story": {"comet_ufi_summary_and_actions_renderer": {"feedback": {
            "i18n_reaction_count": "1.2K",
            "i18n_share_count": "31",
            "comment_rendering_instance": {"comments": {"total_count": 57}}
        }}}},
        "context_layout": {"story": {"comet_sections": {"metadata": [
            {"__typename": "CometFeedStoryMinimizedTimestampStrategy", "story": {"creation_time": CREATED}}
        ]}}}
    })
}

/// Post data block in the profile/page layout.
pub fn post_block(story: Value) -> Value {
    json!({"require": [["ScheduledServerJS", "handle", null, [{"__bbox": {"result": {
        "data": {"node": {"comet_sections": sections(story)}}
    }}}]]]})
}

/// Post data block in the group feed layout.
pub fn group_post_block(story: Value) -> Value {
    json!({
        "data": {"viewer": {"actor": {"id": "1"}}},
        "extensions": {"group_hoisted_feed": {"edges": [
            {"node": {"comet_sections": sections(story)}}
        ]}}
    })
}

/// Group info block naming `group`.
pub fn group_block(group: &str) -> Value {
    json!({"data": {"group": {
        "id": "555",
        "name": group,
        "group_member_profiles": {"formatted_count_text": "12K members"}
    }}})
}

/// Simple text post by Alice (id 100001).
pub fn text_story() -> Value {
    json!({
        "actors": [{
            "__typename": "User",
            "id": "100001",
            "name": "Alice",
            "profile_picture": {"uri": "https://p/alice.jpg"}
        }],
        "message": {"text": "  Hello from the fixture  "},
        "wwwURL": "https://www.facebook.com/alice/posts/1",
        "attachments": [{"styles": {"attachment": {
            "media": {"__typename": "Photo", "photo_image": {"uri": "https://i/1.jpg"}}
        }}}]
    })
}

pub fn photo_node(uri: &str) -> Value {
    json!({"media": {"__typename": "Photo", "viewer_image": {"uri": uri}}})
}
