//! Page stabilization: drive the session until lazy content stops loading.
//!
//! Protocol: navigate, best-effort consent dismissal, then scroll to the
//! bottom and poll a content-size metric until two consecutive
//! measurements agree. The loop is bounded; a page that never settles is
//! a `StabilizeTimeout`, not a hang.

use tokio::time::sleep;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::scraper::session::DomSession;

/// Clicks the consent banner if one is present. Absence is not an error.
const CONSENT_SCRIPT: &str =
    "document.querySelector('#onetrust-accept-btn-handler')?.click();";

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

pub struct Stabilizer {
    poll_interval: std::time::Duration,
    max_rounds: u32,
}

impl Stabilizer {
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            max_rounds: config.max_scroll_rounds,
        }
    }

    /// Navigate to `url` and scroll until the content size is stable.
    pub async fn stabilize<S: DomSession>(
        &self,
        session: &S,
        url: &str,
    ) -> Result<(), SessionError> {
        session.navigate(url).await?;

        if let Err(e) = session.evaluate(CONSENT_SCRIPT).await {
            debug!("consent dismissal failed, continuing: {e}");
        }

        let mut last_size = session.content_size().await?;
        for round in 0..self.max_rounds {
            session.evaluate(SCROLL_SCRIPT).await?;
            sleep(self.poll_interval).await;

            let size = session.content_size().await?;
            if size == last_size {
                debug!(rounds = round + 1, size, "page stabilized");
                return Ok(());
            }
            last_size = size;
        }

        Err(SessionError::StabilizeTimeout {
            rounds: self.max_rounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::time::Duration;

    /// Session whose content size keeps growing for a fixed number of
    /// polls before settling.
    struct GrowingPage {
        polls_until_stable: u32,
        polls: Cell<u32>,
    }

    impl GrowingPage {
        fn new(polls_until_stable: u32) -> Self {
            Self {
                polls_until_stable,
                polls: Cell::new(0),
            }
        }
    }

    impl DomSession for GrowingPage {
        type Node = ();

        async fn navigate(&self, _url: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn evaluate(&self, _script: &str) -> Result<(), SessionError> {
            Ok(())
        }

        async fn content_size(&self) -> Result<u64, SessionError> {
            let polls = self.polls.get();
            self.polls.set(polls + 1);
            Ok(u64::from(polls.min(self.polls_until_stable)))
        }

        async fn query(&self, _selector: &str) -> Result<Option<()>, SessionError> {
            Ok(None)
        }

        async fn query_all_in(
            &self,
            _node: &(),
            _selector: &str,
        ) -> Result<Vec<()>, SessionError> {
            Ok(Vec::new())
        }

        async fn read_text(&self, _node: &()) -> Result<String, SessionError> {
            Ok(String::new())
        }

        async fn close(self) -> Result<(), SessionError> {
            Ok(())
        }
    }

    fn stabilizer(max_rounds: u32) -> Stabilizer {
        Stabilizer {
            poll_interval: Duration::from_millis(1),
            max_rounds,
        }
    }

    #[tokio::test]
    async fn test_settles_once_size_repeats() {
        let session = GrowingPage::new(3);
        stabilizer(10).stabilize(&session, "about:blank").await.unwrap();
    }

    #[tokio::test]
    async fn test_bounded_loop_times_out() {
        let session = GrowingPage::new(u32::MAX);
        let err = stabilizer(5)
            .stabilize(&session, "about:blank")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::StabilizeTimeout { rounds: 5 }));
    }
}
