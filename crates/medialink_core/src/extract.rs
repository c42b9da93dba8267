use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("static url pattern"));

/// Returns the first `http://` or `https://` run of non-whitespace characters.
///
/// Trailing punctuation is kept as-is; the match only stops at whitespace.
pub fn extract_first_url(text: &str) -> Option<&str> {
    URL_RE.find(text).map(|m| m.as_str())
}
