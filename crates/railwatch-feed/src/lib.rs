//! HTTP client and poll loop for the live train feed.
//!
//! The backend exposes one payload endpoint and one control endpoint; this
//! crate wraps both behind the [`FeedSource`] trait and keeps a reconciled
//! [`railwatch_core::live::LiveState`] snapshot current in the background.
//!
//! # Architecture
//!
//! ```text
//! FeedSource (trait)
//!     │            ← HttpFeedSource in production, scripted fakes in tests
//!     ▼
//! Poller           ← background task: fetch, reconcile, publish
//!     │              first poll immediate, then every 5 s
//!     ▼
//! watch channel    ← whole LiveState snapshots, never partial updates
//! ```
//!
//! Poll failures keep the previous snapshot. Source switches go through the
//! poll task so they serialize with in-flight polls, and only a
//! backend-confirmed switch resets the published state.

pub mod error;
pub mod http;
pub mod poller;
pub mod source;

pub use error::FeedError;
pub use http::HttpFeedSource;
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use source::{FeedSource, SwitchAck};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, FeedError>;
