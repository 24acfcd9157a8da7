//! Headless Chrome session using chromiumoxide.

use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::scraper::session::DomSession;

/// Live browser session: one launched Chrome instance driving one page.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handle: tokio::task::JoinHandle<()>,
}

fn backend(e: impl ToString) -> SessionError {
    SessionError::Backend(e.to_string())
}

fn default_chrome_path() -> &'static str {
    if cfg!(target_os = "macos") {
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"
    } else if cfg!(target_os = "windows") {
        "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe"
    } else {
        "google-chrome"
    }
}

impl ChromeSession {
    /// Launch a new headless browser instance with a blank page.
    pub async fn launch(config: &SessionConfig) -> Result<Self, SessionError> {
        let chrome_path = config
            .chrome_path
            .clone()
            .unwrap_or_else(|| default_chrome_path().to_string());

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .no_sandbox()
            .disable_default_args()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--mute-audio")
            .window_size(1920, 1080)
            .build()
            .map_err(backend)?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(backend)?;

        // Handler task must keep running for the browser to work.
        let handle = tokio::spawn(async move {
            loop {
                match handler.next().await {
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => continue,
                    None => break,
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(backend)?;
        debug!("browser session launched");

        Ok(Self {
            browser,
            page,
            handle,
        })
    }
}

impl DomSession for ChromeSession {
    type Node = Arc<Element>;

    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        let nav_err = |e: chromiumoxide::error::CdpError| SessionError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        };
        self.page.goto(url).await.map_err(nav_err)?;
        self.page.wait_for_navigation().await.map_err(nav_err)?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<(), SessionError> {
        self.page.evaluate(script).await.map_err(backend)?;
        Ok(())
    }

    async fn content_size(&self) -> Result<u64, SessionError> {
        self.page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(backend)?
            .into_value::<u64>()
            .map_err(backend)
    }

    async fn query(&self, selector: &str) -> Result<Option<Self::Node>, SessionError> {
        // querySelector misses surface as errors in the CDP layer; an
        // absent element is a None, not a fault.
        Ok(self.page.find_element(selector).await.ok().map(Arc::new))
    }

    async fn query_in(
        &self,
        node: &Self::Node,
        selector: &str,
    ) -> Result<Option<Self::Node>, SessionError> {
        Ok(node.find_element(selector).await.ok().map(Arc::new))
    }

    async fn query_all_in(
        &self,
        node: &Self::Node,
        selector: &str,
    ) -> Result<Vec<Self::Node>, SessionError> {
        // Unlike querySelector, querySelectorAll reports "no matches" as
        // an empty list; an Err here is a real session fault and must
        // abort the run rather than read as an empty node.
        let elements = node.find_elements(selector).await.map_err(backend)?;
        Ok(elements.into_iter().map(Arc::new).collect())
    }

    async fn read_text(&self, node: &Self::Node) -> Result<String, SessionError> {
        let text = node.inner_text().await.map_err(backend)?;
        Ok(text.unwrap_or_default())
    }

    async fn close(mut self) -> Result<(), SessionError> {
        let _ = self.page.clone().close().await;
        let _ = self.browser.close().await;
        self.handle.abort();
        Ok(())
    }
}
