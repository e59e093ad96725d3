use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use railwatch_core::types::SourceId;

use crate::Result;

// ─── SwitchAck ────────────────────────────────────────────────────────────

/// Backend acknowledgement for a source switch request.
///
/// The backend acks rejections with the same JSON shape it uses for
/// success, just with `status` set to something else, so this decodes
/// leniently and callers check [`SwitchAck::is_success`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchAck {
    pub status: String,
    pub active_db: Option<String>,
    pub message: Option<String>,
}

impl SwitchAck {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ─── FeedSource ───────────────────────────────────────────────────────────

/// A live train-data backend.
///
/// `fetch_live` returns the raw payload; reconciliation into typed state is
/// the caller's job so transport stays decoupled from repair policy. The
/// trait exists mostly so the poller can be driven by a scripted fake in
/// tests.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_live(&self) -> Result<Value>;

    async fn switch_source(&self, target: SourceId) -> Result<SwitchAck>;
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_ack_decodes() {
        let ack: SwitchAck = serde_json::from_str(
            r#"{"status":"success","active_db":"india_db","message":"Switched to india_db"}"#,
        )
        .unwrap();
        assert!(ack.is_success());
        assert_eq!(ack.active_db.as_deref(), Some("india_db"));
    }

    #[test]
    fn error_ack_decodes_without_active_db() {
        let ack: SwitchAck =
            serde_json::from_str(r#"{"status":"error","message":"Invalid or unloaded DB source."}"#)
                .unwrap();
        assert!(!ack.is_success());
        assert_eq!(ack.message.as_deref(), Some("Invalid or unloaded DB source."));
        assert!(ack.active_db.is_none());
    }

    #[test]
    fn unknown_fields_and_shapes_are_tolerated() {
        let ack: SwitchAck = serde_json::from_str(r#"{"status":"success","extra":123}"#).unwrap();
        assert!(ack.is_success());
        let ack: SwitchAck = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!ack.is_success());
    }
}
