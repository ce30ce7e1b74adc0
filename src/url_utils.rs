//! URL utilities.

use url::Url;

/// Origin every request path is relative to.
pub const BASE_URL: &str = "https://www.facebook.com";

/// Make a request path absolute on [`BASE_URL`].
///
/// Paths already on the base origin are returned unchanged. Otherwise one
/// leading slash is dropped, the path is appended to the base and the result
/// is normalized by the `url` parser, so characters such as spaces come back
/// percent-encoded. Unparsable joins are returned as joined.
///
/// # Examples
///
/// ```
/// use rs_facebed::url_utils::ensure_full_url;
///
/// assert_eq!(ensure_full_url("/reel/123"), "https://www.facebook.com/reel/123");
/// assert_eq!(
///     ensure_full_url("https://www.facebook.com/watch/?v=9"),
///     "https://www.facebook.com/watch/?v=9"
/// );
/// ```
#[must_use]
pub fn ensure_full_url(path: &str) -> String {
    if path.starts_with(BASE_URL) {
        return path.to_string();
    }
    let joined = format!("{BASE_URL}/{}", path.strip_prefix('/').unwrap_or(path));
    Url::parse(&joined).map_or(joined, String::from)
}
