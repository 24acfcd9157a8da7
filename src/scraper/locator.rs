//! Locates the per-match nodes inside a stabilized listing page.

use tracing::debug;

use crate::error::SessionError;
use crate::scraper::session::DomSession;

/// Fixed structural path to the match list container. Tied to the
/// target site's current layout.
pub const MATCH_CONTAINER_SELECTOR: &str = "#app > div > div.w-full.flex-center.bg-gray-med_light > div > main > div.relative.w-full.flex-grow-1.min-w-\\[320px\\].bg-white-main > div.min-h-\\[206px\\] > div > div:nth-child(4) > div:nth-child(1)";

/// Per-match children of the container. Document order here is the only
/// ordering signal the rest of the pipeline consumes.
const MATCH_NODE_SELECTOR: &str = "div > div[id]";

/// Enumerate the match nodes in document order.
///
/// A missing container means the site layout changed, which is a session
/// fault, not an empty listing.
pub async fn locate_match_nodes<S: DomSession>(session: &S) -> Result<Vec<S::Node>, SessionError> {
    let container = session
        .query(MATCH_CONTAINER_SELECTOR)
        .await?
        .ok_or(SessionError::LayoutMismatch(MATCH_CONTAINER_SELECTOR))?;

    let nodes = session.query_all_in(&container, MATCH_NODE_SELECTOR).await?;
    debug!(nodes = nodes.len(), "located match nodes");
    Ok(nodes)
}
