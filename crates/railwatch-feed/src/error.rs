use thiserror::Error;

/// Errors surfaced by the feed client and poller.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("feed payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("source switch rejected: {0}")]
    SwitchRejected(String),

    #[error("poller task is no longer running")]
    PollerStopped,
}
