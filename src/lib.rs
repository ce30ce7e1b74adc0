//! # rs-facebed
//!
//! Post metadata extraction from the JSON fragments a social platform embeds
//! in its pages.
//!
//! The platform ships post data as dozens of `<script type="application/json">`
//! blocks with no documented schema. This library picks the right block by
//! fingerprint, locates the post inside it with ordered fallback strategies,
//! and normalizes what it finds into one [`ParsedPost`] record.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_facebed::{extract_post, Error, Options};
//!
//! // A page without any data blocks.
//! let html = "<html><body><p>Log in to continue</p></body></html>";
//! let result = extract_post(html, &Options::default());
//! assert!(matches!(result, Err(Error::BlockNotFound(_))));
//! ```
//!
//! ## Scope
//!
//! - **In**: an already fetched, decoded HTML document
//! - **Out**: a complete [`ParsedPost`] or a typed [`Error`], never a partial record
//! - Fetching, routing URLs to a [`PageKind`] and rendering embeds belong to
//!   the caller
//!
//! Extraction is synchronous, performs no I/O and shares nothing between
//! calls except the read-only [`Options`].

mod error;
mod options;
mod patterns;
mod result;

/// Generic search over untyped JSON trees.
pub mod tree;

/// Embedded JSON block selection.
pub mod blocks;

/// Root-node resolution and interaction counts for generic posts.
pub mod resolver;

/// Story normalization and media discovery.
pub mod story;

/// Page-shape specific extraction pipelines.
pub mod extractor;

/// Display formatting for counts, reactions and timestamps.
pub mod format;

/// URL utilities.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::PageKind;
pub use options::{BanNotifier, Fingerprint, Fingerprints, Options};
pub use result::{Counts, ParsedPost};

use blocks::BlockSet;
use tracing::debug;

/// Extracts a post from a page of the given kind.
///
/// `path` is the request path the page was fetched from; photo and watch
/// pages use it as the post URL.
///
/// # Example
///
/// ```rust
/// use rs_facebed::{extract, Error, Options, PageKind};
///
/// let result = extract("<html></html>", PageKind::Watch, "watch/?v=1", &Options::default());
/// assert!(matches!(result, Err(Error::BlockNotFound(_))));
/// ```
pub fn extract(html: &str, kind: PageKind, path: &str, options: &Options) -> Result<ParsedPost> {
    let blocks = BlockSet::from_html(html);
    debug!(%kind, path, blocks = blocks.len(), "extracting");
    match kind {
        PageKind::Post => extractor::post::parse_post(&blocks, options),
        PageKind::Reel => extractor::reel::parse_reel(&blocks, options),
        PageKind::SinglePhoto => extractor::single_photo::parse_single_photo(&blocks, path, options),
        PageKind::Watch => extractor::watch::parse_watch(&blocks, path, options),
    }
}

/// Extracts a profile, page or group post.
pub fn extract_post(html: &str, options: &Options) -> Result<ParsedPost> {
    extractor::post::parse_post(&BlockSet::from_html(html), options)
}

/// Extracts a reel.
pub fn extract_reel(html: &str, options: &Options) -> Result<ParsedPost> {
    extractor::reel::parse_reel(&BlockSet::from_html(html), options)
}

/// Extracts a single photo; `path` becomes the post URL.
pub fn extract_single_photo(html: &str, path: &str, options: &Options) -> Result<ParsedPost> {
    extractor::single_photo::parse_single_photo(&BlockSet::from_html(html), path, options)
}

/// Extracts a watch-page video; `path` becomes the post URL.
pub fn extract_watch(html: &str, path: &str, options: &Options) -> Result<ParsedPost> {
    extractor::watch::parse_watch(&BlockSet::from_html(html), path, options)
}
