use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use railwatch_core::types::SourceId;

use crate::error::FeedError;
use crate::source::{FeedSource, SwitchAck};
use crate::Result;

// ─── HttpFeedSource ───────────────────────────────────────────────────────

/// [`FeedSource`] backed by the HTTP backend.
///
/// Endpoints:
/// - `GET /api/trains/active` for the live payload
/// - `GET /api/db/switch?source=<id>` to change the active source
pub struct HttpFeedSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFeedSource {
    /// Where the backend listens when run locally.
    pub const DEFAULT_URL: &'static str = "http://127.0.0.1:5000";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<HttpFeedSource> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpFeedSource { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_live(&self) -> Result<Value> {
        let url = format!("{}/api/trains/active", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn switch_source(&self, target: SourceId) -> Result<SwitchAck> {
        let url = format!("{}/api/db/switch?source={}", self.base_url, target.as_str());
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        // Rejected switches come back as HTTP 400 with a JSON error ack in
        // the body. A decodable ack wins over the status line so the caller
        // sees the backend's reason, not a bare status code.
        match serde_json::from_slice(&bytes) {
            Ok(ack) => Ok(ack),
            Err(_) if !status.is_success() => Err(FeedError::Status(status)),
            Err(err) => Err(FeedError::Parse(err)),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
