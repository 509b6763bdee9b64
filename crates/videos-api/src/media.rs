//! URLs derived from the external media identifier.
//!
//! Playback is delegated to the video platform's embedded player; thumbnails
//! are served by the platform's image host. Nothing here performs I/O.

use std::sync::LazyLock;

use regex::Regex;

pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";
pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";
pub const AUTOPLAY_PARAM: &str = "autoplay";

pub static MEDIA_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]+)",
    )
    .unwrap()
});

pub fn thumbnail_url(media_id: &str) -> String {
    format!(
        "{THUMBNAIL_BASE_URL}/{}/hqdefault.jpg",
        urlencoding::encode(media_id)
    )
}

pub fn embed_url(media_id: &str, autoplay: bool) -> String {
    let mut url = format!("{EMBED_BASE_URL}/{}", urlencoding::encode(media_id));
    if autoplay {
        url.push('?');
        url.push_str(AUTOPLAY_PARAM);
        url.push_str("=1");
    }
    url
}

/// Removes the autoplay directive from an embed source, keeping every other
/// query parameter and the fragment untouched.
pub fn without_autoplay(src: &str) -> String {
    let (head, fragment) = match src.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (src, None),
    };
    let Some((path, query)) = head.split_once('?') else {
        return src.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.split('=').next() != Some(AUTOPLAY_PARAM))
        .collect();

    let mut out = path.to_string();
    if !kept.is_empty() {
        out.push('?');
        out.push_str(&kept.join("&"));
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Extracts the media identifier from user input.
///
/// Accepts a bare identifier or a watch / short link / embed URL of the
/// platform. Blank input and anything that still looks like a path is rejected.
pub fn parse_media_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(id) = MEDIA_URL_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
    {
        return Some(id.to_string());
    }
    if input
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '&'))
    {
        return None;
    }
    Some(input.to_string())
}
