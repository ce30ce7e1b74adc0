//! End-to-end extraction of reels, single photos and watch videos.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

mod common;

use common::{decoy, page, script, script_with_len, CREATED};
use rs_facebed::{
    extract, extract_reel, extract_single_photo, extract_watch, Error, Options, PageKind, ParsedPost,
};
use serde_json::{json, Value};

// === Reels ===

fn reel_content(owner: Value) -> Value {
    json!({"data": {"video": {"creation_story": {
        "id": "777",
        "message": {"text": "reel text"},
        "creation_time": CREATED,
        "short_form_video_context": {
            "video_owner": owner,
            "shareable_url": "https://www.facebook.com/reel/777"
        },
        "attachments": [{"media": {"videoDeliveryLegacyFields": {
            "browser_native_hd_url": "https://v/reel_hd.mp4",
            "browser_native_sd_url": "https://v/reel_sd.mp4"
        }}}]
    }}}})
}

fn instagram_owner() -> Value {
    json!({
        "__typename": "InstagramUser",
        "id": "5",
        "username": "insta_bob",
        "profile_picture": {"uri": "https://p/bob.jpg"}
    })
}

/// Reactions of a different reel, earlier in the page.
fn foreign_reactions() -> Value {
    json!({"data": {"video": {"id": "888", "feedback": {
        "unified_reactors": {"count": 1},
        "total_comment_count": 0,
        "share_count_reduced": "0"
    }}}})
}

#[test]
fn test_cross_platform_reel() {
    let reactions = json!({"data": {"video": {
        "id": "777",
        "feedback": {
            "id": "fb-ig",
            "cross_universe_feedback_info": {"ig_comment_count": 42},
            "share_count_reduced": "12"
        },
        "viewer_feedback": {"feedback": {"id": "fb-native", "unified_reactors": {"count": 15_300}}}
    }}});

    let html = page(&[
        script(&reel_content(instagram_owner())),
        decoy(1),
        script(&foreign_reactions()),
        script(&reactions),
    ]);
    let post = extract_reel(&html, &Options::default()).expect("reel");

    assert_eq!(
        post,
        ParsedPost {
            author_name: "📷 @insta_bob".to_string(),
            author_picture: "https://p/bob.jpg".to_string(),
            text: "reel text".to_string(),
            url: "https://www.facebook.com/reel/777".to_string(),
            date: Some(CREATED),
            likes: Some("15.3K".to_string()),
            comments: Some("42".to_string()),
            shares: Some("12".to_string()),
            image_links: Vec::new(),
            video_links: vec!["https://v/reel_hd.mp4".to_string()],
        }
    );
}

#[test]
fn test_native_reel() {
    let owner = json!({"__typename": "User", "id": "6", "name": "Carol"});
    let reactions = json!({"data": {"video": {"id": "777", "feedback": {
        "unified_reactors": {"count": 999},
        "total_comment_count": 3,
        "share_count_reduced": null
    }}}});

    let html = page(&[script(&reel_content(owner)), script(&reactions)]);
    let post = extract(&html, PageKind::Reel, "reel/777", &Options::default()).expect("reel");

    assert_eq!(post.author_name, "Carol");
    assert_eq!(post.author_picture, "");
    assert_eq!(post.likes.as_deref(), Some("999"));
    assert_eq!(post.comments.as_deref(), Some("3"));
    assert_eq!(post.shares, None);
    assert_eq!(post.reactions(), "❤️ 999 • 💬 3");
}

#[test]
fn test_reel_reactions_scanned_in_document_order() {
    let owner = json!({"__typename": "User", "id": "6", "name": "Carol"});
    let earlier = json!({"data": {"video": {"id": "777", "feedback": {
        "unified_reactors": {"count": 10},
        "total_comment_count": 1,
        "share_count_reduced": "2"
    }}}});
    let later = json!({"data": {"video": {"id": "777", "feedback": {
        "unified_reactors": {"count": 5_000},
        "total_comment_count": 600,
        "share_count_reduced": "70"
    }}}});

    let html = page(&[
        script(&reel_content(owner)),
        script_with_len(10, &earlier),
        script_with_len(90_000, &later),
    ]);
    let post = extract_reel(&html, &Options::default()).expect("reel");

    assert_eq!(post.likes.as_deref(), Some("10"));
    assert_eq!(post.comments.as_deref(), Some("1"));
    assert_eq!(post.shares.as_deref(), Some("2"));
}

#[test]
fn test_reel_without_its_reactions() {
    let html = page(&[script(&reel_content(instagram_owner())), script(&foreign_reactions())]);
    assert!(matches!(
        extract_reel(&html, &Options::default()),
        Err(Error::BlockNotFound(_))
    ));
}

#[test]
fn test_banned_reel_owner() {
    let options = Options {
        banned_users: [5].into_iter().collect(),
        ..Options::default()
    };
    // Reactions are never looked up for a banned owner.
    let html = page(&[script(&reel_content(instagram_owner()))]);
    let post = extract_reel(&html, &options).expect("sentinel");
    assert_eq!(post, ParsedPost::banned());
}

// === Single photos ===

fn photo_page() -> String {
    let content = json!({"data": {
        "message": {"text": " photo caption "},
        "message_preferred_body": null,
        "container_story": null,
        "owner": {
            "__typename": "User",
            "id": "100003",
            "name": "Dana",
            "profile_picture": {"uri": "https://p/dana.jpg"}
        },
        "created_time": CREATED
    }});
    let interactions = json!({"data": {"comet_ufi_summary_and_actions_renderer": {"feedback": {
        "i18n_reaction_count": "7",
        "i18n_share_count": "0",
        "comment_rendering_instance": {"comments": {"total_count": 2}}
    }}}});
    let prefetch = json!({"extra": {"prefetch_uris_v2": [
        {"uri": "https://i/full.jpg", "label": "full"},
        {"uri": "https://i/next.jpg", "label": "next"}
    ]}});

    page(&[script(&content), decoy(1), script(&interactions), script(&prefetch)])
}

#[test]
fn test_single_photo() {
    let post = extract_single_photo(&photo_page(), "/photo/?fbid=1", &Options::default()).expect("photo");

    assert_eq!(
        post,
        ParsedPost {
            author_name: "Dana".to_string(),
            author_picture: "https://p/dana.jpg".to_string(),
            text: "photo caption".to_string(),
            url: "https://www.facebook.com/photo/?fbid=1".to_string(),
            date: Some(CREATED),
            likes: Some("7".to_string()),
            comments: Some("2".to_string()),
            shares: Some("0".to_string()),
            image_links: vec!["https://i/full.jpg".to_string()],
            video_links: Vec::new(),
        }
    );
}

#[test]
fn test_single_photo_banned_owner() {
    let options = Options {
        banned_users: [100_003].into_iter().collect(),
        ..Options::default()
    };
    let post = extract(&photo_page(), PageKind::SinglePhoto, "photo/?fbid=1", &options).expect("sentinel");
    assert!(post.is_banned_sentinel());
}

#[test]
fn test_single_photo_without_content_block() {
    let html = page(&[decoy(1)]);
    assert!(matches!(
        extract_single_photo(&html, "photo/?fbid=1", &Options::default()),
        Err(Error::BlockNotFound(_))
    ));
}

// === Watch ===

fn watch_page() -> String {
    let content = json!({"result": {"data": {
        "title": {"text": "Watch title"},
        "feedback": {
            "reaction_count": {"count": 2500},
            "total_comment_count": "12",
            "comment_rendering_instance": {}
        },
        "video_view_count_renderer": {"count": "10K views"}
    }}});
    let video = json!({"video": {"videoDeliveryLegacyFields": {
        "browser_native_hd_url": null,
        "browser_native_sd_url": "https://v/watch_sd.mp4"
    }}});
    let owner = json!({"data": {"owner": {
        "__typename": "Page",
        "id": "100004",
        "name": "Eve",
        "is_additional_profile_plus": false,
        "displayPicture": "https://p/eve.jpg"
    }}});
    let created = json!({"meta": {"creation_time": CREATED}});

    page(&[script(&content), script(&video), script(&owner), script(&created)])
}

#[test]
fn test_watch_video() {
    let post = extract_watch(&watch_page(), "watch/?v=123", &Options::default()).expect("watch");

    assert_eq!(
        post,
        ParsedPost {
            author_name: "Eve".to_string(),
            author_picture: "https://p/eve.jpg".to_string(),
            text: "Watch title".to_string(),
            url: "https://www.facebook.com/watch/?v=123".to_string(),
            date: Some(CREATED),
            likes: Some("2.5K".to_string()),
            comments: Some("12".to_string()),
            shares: None,
            image_links: Vec::new(),
            video_links: vec!["https://v/watch_sd.mp4".to_string()],
        }
    );
    assert_eq!(post.reactions(), "❤️ 2.5K • 💬 12");
}

#[test]
fn test_watch_banned_owner() {
    let options = Options {
        banned_users: [100_004].into_iter().collect(),
        ..Options::default()
    };
    let post = extract_watch(&watch_page(), "watch/?v=123", &options).expect("sentinel");
    assert_eq!(post, ParsedPost::banned());
}
