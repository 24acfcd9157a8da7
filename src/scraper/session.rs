//! Rendering session abstraction.
//!
//! The extraction pipeline only ever issues read-only queries against an
//! already-stabilized page, so the whole capability surface is a handful
//! of request/response calls. Two implementations exist: a headless
//! Chrome session ([`super::browser::ChromeSession`]) and a static HTML
//! document ([`super::static_dom::StaticDom`]) used for file input and
//! tests.

use crate::error::SessionError;

/// Read-only DOM query surface of a rendering session.
///
/// `Node` is an opaque handle into the session's DOM. Document order is
/// preserved by all `*_all` queries; it is the only ordering signal the
/// pipeline consumes.
#[allow(async_fn_in_trait)]
pub trait DomSession {
    type Node;

    /// Navigate the session to a URL.
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// Evaluate a script in page context, discarding the result.
    async fn evaluate(&self, script: &str) -> Result<(), SessionError>;

    /// Current content size metric (DOM height or serialized length),
    /// used by the scroll-until-stable loop.
    async fn content_size(&self) -> Result<u64, SessionError>;

    /// First element matching `selector`, page scope.
    async fn query(&self, selector: &str) -> Result<Option<Self::Node>, SessionError>;

    /// All elements matching `selector` within `node`'s subtree, in
    /// document order.
    async fn query_all_in(
        &self,
        node: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, SessionError>;

    /// First element matching `selector` within `node`'s subtree.
    async fn query_in(
        &self,
        node: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, SessionError> {
        Ok(self.query_all_in(node, selector).await?.into_iter().next())
    }

    /// Inner text of an element.
    async fn read_text(&self, node: &Self::Node) -> Result<String, SessionError>;

    /// Tear the session down.
    async fn close(self) -> Result<(), SessionError>;
}
