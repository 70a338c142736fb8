//! Content shape detection: single item, curated collection, or uploader feed.
//!
//! The engine's shallow inspect call is authoritative when it answers; plain
//! pattern matching on the link text covers the rest. Results are memoized
//! per exact link string for the lifetime of the cache.

mod cache;

pub use cache::ShapeCache;

use url::Url;

use crate::engine::{InspectInfo, MediaEngine};
use crate::url_model::{self, Link};

/// Shape of the content behind a link; drives output routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// One watchable item.
    Single,
    /// An explicitly curated, ordered listing.
    Collection,
    /// Everything published by one uploader/channel.
    Feed,
}

impl ContentShape {
    /// Short human label used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            ContentShape::Single => "video",
            ContentShape::Collection => "playlist",
            ContentShape::Feed => "channel",
        }
    }
}

/// Determines the shape of `link`, consulting the cache first.
///
/// Identical links cost at most one engine call per cache lifetime. Engine
/// failures and empty answers fall back to pattern matching, so this never
/// fails; at worst the shape is a best-effort guess.
pub async fn classify(engine: &dyn MediaEngine, cache: &ShapeCache, link: &Link) -> ContentShape {
    if let Some(shape) = cache.get(link.as_str()) {
        return shape;
    }

    let shape = match engine.inspect(link.as_str()).await {
        Ok(Some(info)) => shape_from_inspect(&info, link.as_str()),
        Ok(None) => fallback_shape(link.as_str()),
        Err(err) => {
            tracing::debug!(link = %link, "inspect failed ({err}), falling back to pattern match");
            fallback_shape(link.as_str())
        }
    };

    cache.insert(link.as_str(), shape);
    shape
}

/// Maps an engine answer to a shape.
///
/// A listing is normally a collection; when the engine also reports an
/// uploader id and the link path looks profile-style, the listing is really
/// a channel's content and is routed as a feed. Best-effort by design: a
/// collection link that happens to carry those markers is misrouted, which
/// only affects its output path.
fn shape_from_inspect(info: &InspectInfo, link: &str) -> ContentShape {
    match info.kind.as_deref() {
        Some("playlist") => {
            if info.uploader_id.is_some() && url_model::has_profile_marker(link) {
                ContentShape::Feed
            } else {
                ContentShape::Collection
            }
        }
        _ => ContentShape::Single,
    }
}

/// Pattern-only classification used when the engine cannot answer.
pub fn fallback_shape(link: &str) -> ContentShape {
    if url_model::has_profile_marker(link) {
        return ContentShape::Feed;
    }
    if has_listing_query(link) {
        return ContentShape::Collection;
    }
    ContentShape::Single
}

/// True when the link carries a collection-query parameter (`list=...`).
fn has_listing_query(link: &str) -> bool {
    Url::parse(link)
        .map(|u| u.query_pairs().any(|(key, _)| key == "list"))
        .unwrap_or(false)
}
