//! YouTube video id extraction.
//!
//! Transcript headers carry source URLs in several shapes. Each shape has a
//! matcher; matchers run in a fixed order and the first one that recognises
//! the URL decides the result, even when the id it yields is empty.

use url::{ParseError, Url};

/// A pure matcher from a parsed URL to a video id.
pub type Matcher = fn(&Url) -> Option<String>;

/// Matchers in precedence order. Reordering changes results on URLs that
/// satisfy more than one shape, e.g. `youtu.be/watch/x?v=y`.
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("query", from_query),
    ("watch-path", from_watch_path),
    ("short-host", from_short_host),
    ("embed-path", from_embed_path),
];

/// Extract the video id from `input`, or an empty string when no shape matches.
pub fn extract_video_id(input: &str) -> String {
    match_video_id(input)
        .map(|(_, id)| id)
        .unwrap_or_default()
}

/// Like [`extract_video_id`], also naming the matcher that fired.
pub fn match_video_id(input: &str) -> Option<(&'static str, String)> {
    let url = parse_lenient(input.trim())?;
    MATCHERS
        .iter()
        .find_map(|(name, matcher)| matcher(&url).map(|id| (*name, id)))
}

/// Parse absolute URLs directly and scheme-less ones as paths.
///
/// `youtube.com/watch?v=x` has no scheme, so its host is unknown and
/// `youtube.com/watch` becomes part of the path, leaving the query intact.
fn parse_lenient(input: &str) -> Option<Url> {
    if input.is_empty() {
        return None;
    }
    match Url::parse(input) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse("relative:/")
            .and_then(|base| base.join(input))
            .ok(),
        Err(_) => None,
    }
}

fn from_query(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "v" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn from_watch_path(url: &Url) -> Option<String> {
    after_last(url.path(), "/watch/")
}

fn from_short_host(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    host.contains("youtu.be")
        .then(|| url.path().trim_start_matches('/').to_string())
}

fn from_embed_path(url: &Url) -> Option<String> {
    after_last(url.path(), "/embed/")
}

fn after_last(path: &str, marker: &str) -> Option<String> {
    path.rsplit_once(marker).map(|(_, rest)| rest.to_string())
}
