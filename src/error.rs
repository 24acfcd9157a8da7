//! Error taxonomy for the extraction pipeline.
//!
//! Session-level and URL-level failures carry different retry semantics:
//! a malformed URL or an unsupported sport never becomes valid by waiting,
//! while a navigation hiccup or a half-rendered page usually does. The
//! caller's retry loop consults [`ScrapeError::is_retryable`] instead of
//! retrying everything blindly.

use thiserror::Error;

/// Faults raised by the rendering session or the page layout.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The fixed structural path to the match container did not resolve.
    /// Usually means the site shipped a new layout.
    #[error("expected page container not found: {0}")]
    LayoutMismatch(&'static str),

    /// The scroll-until-stable loop hit its round bound without two
    /// consecutive equal content measurements.
    #[error("page did not stabilize after {rounds} scroll rounds")]
    StabilizeTimeout { rounds: u32 },

    #[error("browser session error: {0}")]
    Backend(String),
}

/// Top-level pipeline errors surfaced to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid listing url {url:?}: {reason}")]
    UrlFormat { url: String, reason: String },

    /// The slug is in the sport table but no period scoring rules are
    /// enumerated for it.
    #[error("sport {0:?} has no period scoring rules")]
    UnsupportedSport(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ScrapeError {
    pub(crate) fn url_format(url: &str, reason: impl Into<String>) -> Self {
        ScrapeError::UrlFormat {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// Transient failures worth re-running the whole pipeline for.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScrapeError::Session(_))
    }
}

/// Per-node extraction faults. `MissingField` is absorbed by the chunk
/// loop (the node is skipped); session faults abort the run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("match node missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_are_retryable() {
        let err = ScrapeError::Session(SessionError::StabilizeTimeout { rounds: 40 });
        assert!(err.is_retryable());
    }

    #[test]
    fn test_url_and_sport_errors_are_permanent() {
        assert!(!ScrapeError::url_format("x", "no sport segment").is_retryable());
        assert!(!ScrapeError::UnsupportedSport("american-football").is_retryable());
    }
}
