//! Link validation and multi-link input parsing.
//!
//! Splits a raw block of user text into candidate tokens and keeps the ones
//! that match a recognized link shape. Rejected tokens are reported back to
//! the caller; partial success is the normal case.

mod markers;

pub use markers::has_profile_marker;

use std::fmt;

/// A validated reference to a remote media resource. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link(String);

impl Link {
    /// Accepts `token` only when it matches a recognized link shape.
    pub fn parse(token: &str) -> Option<Self> {
        if is_supported_link(token) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when `token` carries a known host and at least one resource marker.
pub fn is_supported_link(token: &str) -> bool {
    markers::has_known_host(token) && markers::has_resource_marker(token)
}

/// Outcome of splitting a raw input block: accepted links in input order,
/// plus every rejected token.
#[derive(Debug, Default)]
pub struct ParsedInput {
    pub links: Vec<Link>,
    pub rejected: Vec<String>,
}

/// Splits `raw` on runs of commas and whitespace (spaces, newlines, tabs)
/// and validates each non-empty token.
///
/// Never fails: an input with no recognized links yields an empty `links`
/// list and the caller decides whether that is an error. Duplicate links are
/// preserved, each becoming its own fetch downstream.
pub fn parse_input(raw: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();
    let tokens = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());

    for token in tokens {
        match Link::parse(token) {
            Some(link) => parsed.links.push(link),
            None => {
                tracing::debug!("rejecting unrecognized token: {token}");
                parsed.rejected.push(token.to_string());
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(parsed: &ParsedInput) -> Vec<&str> {
        parsed.links.iter().map(Link::as_str).collect()
    }

    #[test]
    fn parse_keeps_valid_links_and_counts_rejects() {
        let parsed = parse_input(
            "https://youtube.com/watch?v=abc, not-a-url https://youtube.com/watch?v=def",
        );
        assert_eq!(
            links(&parsed),
            vec![
                "https://youtube.com/watch?v=abc",
                "https://youtube.com/watch?v=def"
            ]
        );
        assert_eq!(parsed.rejected, vec!["not-a-url"]);
    }

    #[test]
    fn parse_splits_on_mixed_separators() {
        let parsed = parse_input(
            "https://youtube.com/watch?v=a,https://youtu.be/b\nhttps://youtube.com/playlist?list=c\thttps://youtube.com/@channel",
        );
        assert_eq!(parsed.links.len(), 4);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn parse_preserves_input_order_and_duplicates() {
        let parsed = parse_input(
            "https://youtube.com/watch?v=x https://youtube.com/watch?v=y https://youtube.com/watch?v=x",
        );
        assert_eq!(
            links(&parsed),
            vec![
                "https://youtube.com/watch?v=x",
                "https://youtube.com/watch?v=y",
                "https://youtube.com/watch?v=x"
            ]
        );
    }

    #[test]
    fn parse_empty_and_garbage_inputs() {
        assert!(parse_input("").links.is_empty());
        assert!(parse_input("  \n\t , ,, ").links.is_empty());

        let parsed = parse_input("http://example.com/watch?v=a https://youtube.com/about");
        assert!(parsed.links.is_empty());
        assert_eq!(parsed.rejected.len(), 2);
    }

    #[test]
    fn known_host_alone_is_not_enough() {
        // Host without any resource marker is rejected; marker without a
        // known host likewise.
        assert!(!is_supported_link("https://youtube.com"));
        assert!(!is_supported_link("https://vimeo.com/watch?v=a"));
        assert!(is_supported_link("https://youtu.be/abc123"));
        assert!(is_supported_link("https://www.youtube.com/user/somebody"));
    }

    #[test]
    fn profile_marker_detection() {
        assert!(has_profile_marker("https://youtube.com/@handle"));
        assert!(has_profile_marker("https://youtube.com/channel/UCxyz"));
        assert!(has_profile_marker("https://youtube.com/c/Name"));
        assert!(has_profile_marker("https://youtube.com/user/Name"));
        assert!(!has_profile_marker("https://youtube.com/watch?v=abc"));
    }
}
