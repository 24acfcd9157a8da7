//! Static-HTML session over a pre-fetched document.
//!
//! Backs the `--from-file` input path and every parser test: the same
//! extraction code runs against a fixed `scraper::Html` document instead
//! of a live browser. Navigation and script evaluation are no-ops, and
//! the content size never changes, so stabilization finishes after one
//! round.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use crate::error::SessionError;
use crate::scraper::session::DomSession;

pub struct StaticDom {
    document: Html,
    raw_len: u64,
}

impl StaticDom {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
            raw_len: html.len() as u64,
        }
    }

    fn element(&self, id: NodeId) -> Result<ElementRef<'_>, SessionError> {
        self.document
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .ok_or_else(|| SessionError::Backend("stale node handle".to_string()))
    }

    fn selector(selector: &str) -> Result<Selector, SessionError> {
        Selector::parse(selector)
            .map_err(|e| SessionError::Backend(format!("bad selector {selector:?}: {e:?}")))
    }
}

impl DomSession for StaticDom {
    type Node = NodeId;

    async fn navigate(&self, _url: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn evaluate(&self, _script: &str) -> Result<(), SessionError> {
        Ok(())
    }

    async fn content_size(&self) -> Result<u64, SessionError> {
        Ok(self.raw_len)
    }

    async fn query(&self, selector: &str) -> Result<Option<NodeId>, SessionError> {
        let selector = Self::selector(selector)?;
        Ok(self.document.select(&selector).next().map(|el| el.id()))
    }

    async fn query_all_in(
        &self,
        node: &NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SessionError> {
        let selector = Self::selector(selector)?;
        let element = self.element(*node)?;
        Ok(element.select(&selector).map(|el| el.id()).collect())
    }

    async fn read_text(&self, node: &NodeId) -> Result<String, SessionError> {
        Ok(self.element(*node)?.text().collect())
    }

    async fn close(self) -> Result<(), SessionError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"<html><body>
        <div id="root">
            <p class="name">first</p>
            <p class="name">second</p>
        </div>
    </body></html>"#;

    #[tokio::test]
    async fn test_query_and_read_text() {
        let dom = StaticDom::parse(SAMPLE_HTML);
        let root = dom.query("#root").await.unwrap().unwrap();
        let names = dom.query_all_in(&root, "p.name").await.unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(dom.read_text(&names[1]).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_missing_element_is_none() {
        let dom = StaticDom::parse(SAMPLE_HTML);
        assert!(dom.query("#nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_content_size_is_stable() {
        let dom = StaticDom::parse(SAMPLE_HTML);
        let a = dom.content_size().await.unwrap();
        let b = dom.content_size().await.unwrap();
        assert_eq!(a, b);
    }
}
