//! Host and path/query markers that identify fetchable links.

/// Host substrings accepted as the supported platform.
const KNOWN_HOSTS: &[&str] = &["youtube.com", "youtu.be"];

/// Markers that identify a fetchable resource: a watch item, a curated
/// listing, a profile-style page, or a short link.
const RESOURCE_MARKERS: &[&str] = &[
    "/watch?",
    "/playlist?",
    "/@",
    "/channel/",
    "/c/",
    "/user/",
    "youtu.be/",
];

/// Profile-style path markers; a listing behind one of these is routed as a
/// feed rather than a collection.
const PROFILE_MARKERS: &[&str] = &["/@", "/channel/", "/c/", "/user/"];

pub(super) fn has_known_host(token: &str) -> bool {
    KNOWN_HOSTS.iter().any(|host| token.contains(host))
}

pub(super) fn has_resource_marker(token: &str) -> bool {
    RESOURCE_MARKERS.iter().any(|marker| token.contains(marker))
}

/// True when the link looks like an uploader/channel page.
pub fn has_profile_marker(link: &str) -> bool {
    PROFILE_MARKERS.iter().any(|marker| link.contains(marker))
}
