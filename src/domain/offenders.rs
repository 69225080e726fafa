//! Known redirect/URL-shortening services requiring resolution.
//!
//! The table is an ordered, read-only list built at first use; adding a new
//! redirect-service integration means adding one entry here, never touching
//! the dispatch in the redirect service.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// One known redirect service.
pub struct RedirectOffender {
    /// Service name, for log lines.
    pub name: &'static str,
    /// Matches a canonical URL that belongs to this service.
    pub matcher: Regex,
    /// Shape the `Location` header must have for the response to count as a
    /// resolvable redirect from this service.
    pub location_shape: Regex,
    /// Extracts the canonical target from a well-shaped `Location` URL.
    pub extract_target: fn(&Url) -> Option<String>,
}

/// Ordered offender table; first match wins.
pub static OFFENDERS: LazyLock<Vec<RedirectOffender>> = LazyLock::new(|| {
    vec![
        RedirectOffender {
            name: "readability",
            matcher: Regex::new(r"^https?://(www\.)?readability\.com/articles/").unwrap(),
            location_shape: Regex::new(r"^https?://(www\.)?readability\.com/read\?").unwrap(),
            extract_target: url_query_param,
        },
        RedirectOffender {
            name: "feedburner",
            matcher: Regex::new(r"^https?://feedproxy\.google\.com/").unwrap(),
            // FeedBurner points Location straight at the target article.
            location_shape: Regex::new(r"^https?://").unwrap(),
            extract_target: location_itself,
        },
    ]
});

/// Finds the first offender whose matcher covers `canonical_url`.
pub fn match_offender(canonical_url: &str) -> Option<&'static RedirectOffender> {
    OFFENDERS.iter().find(|o| o.matcher.is_match(canonical_url))
}

/// The target rides in the `url` query parameter (percent-decoded by the
/// `url` crate).
fn url_query_param(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}

/// The `Location` header is the target.
fn location_itself(location: &Url) -> Option<String> {
    Some(location.to_string())
}
