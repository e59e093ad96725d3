use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;

use railwatch_core::live::LiveState;
use railwatch_core::reconcile::reconcile;
use railwatch_core::types::SourceId;

use crate::error::FeedError;
use crate::source::FeedSource;
use crate::Result;

/// Poll cadence used when the caller does not pick one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

// ─── Poller ───────────────────────────────────────────────────────────────

/// Background poll loop that keeps a [`LiveState`] snapshot current.
///
/// The first poll fires immediately on spawn, then every `every` after
/// that. A failed poll keeps the previous snapshot. Source switches are
/// serialized through the loop so a switch and a poll can never interleave:
/// on a successful switch the published state resets to default and the
/// poll timer restarts with an immediate fetch under the new source.
///
/// Consumers read through [`Poller::latest`] or subscribe with
/// [`Poller::updates`]; both see whole snapshots, never partial updates.
/// Dropping the handle aborts the loop.
pub struct Poller {
    state_rx: watch::Receiver<LiveState>,
    source_rx: watch::Receiver<SourceId>,
    cmd_tx: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

enum Command {
    Switch {
        target: SourceId,
        reply: oneshot::Sender<Result<()>>,
    },
}

impl Poller {
    /// Starts polling `feed`. Must be called from within a Tokio runtime;
    /// `every` must be non-zero.
    pub fn spawn(feed: Arc<dyn FeedSource>, every: Duration, initial: SourceId) -> Poller {
        let (state_tx, state_rx) = watch::channel(LiveState::default());
        let (source_tx, source_rx) = watch::channel(initial);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let task = tokio::spawn(poll_loop(feed, every, state_tx, source_tx, cmd_rx));
        Poller {
            state_rx,
            source_rx,
            cmd_tx,
            task,
        }
    }

    /// Most recent snapshot; `LiveState::default()` until the first poll
    /// lands.
    pub fn latest(&self) -> LiveState {
        self.state_rx.borrow().clone()
    }

    pub fn active_source(&self) -> SourceId {
        *self.source_rx.borrow()
    }

    /// Watch handle for callers that want `wait_for` style readiness.
    pub fn subscribe(&self) -> watch::Receiver<LiveState> {
        self.state_rx.clone()
    }

    /// Snapshot stream for `StreamExt` style consumption. Yields the
    /// current value first, then every replacement; intermediate snapshots
    /// may coalesce under a slow consumer.
    pub fn updates(&self) -> WatchStream<LiveState> {
        WatchStream::new(self.state_rx.clone())
    }

    /// Asks the backend to switch sources. On success the published state
    /// is reset and an immediate re-poll is scheduled; on rejection or
    /// transport failure nothing changes.
    pub async fn switch(&self, target: SourceId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Switch { target, reply })
            .await
            .map_err(|_| FeedError::PollerStopped)?;
        reply_rx.await.map_err(|_| FeedError::PollerStopped)?
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ─── Poll loop ────────────────────────────────────────────────────────────

async fn poll_loop(
    feed: Arc<dyn FeedSource>,
    every: Duration,
    state_tx: watch::Sender<LiveState>,
    source_tx: watch::Sender<SourceId>,
    mut cmd_rx: mpsc::Receiver<Command>,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match feed.fetch_live().await {
                    Ok(payload) => {
                        let state = reconcile(&payload);
                        tracing::debug!(
                            "poll ok: {} trains, {} alerts",
                            state.trains.len(),
                            state.alerts.len()
                        );
                        state_tx.send_replace(state);
                    }
                    Err(err) => {
                        tracing::warn!("poll failed, keeping previous snapshot: {err}");
                    }
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(Command::Switch { target, reply }) => {
                        let outcome = request_switch(feed.as_ref(), target).await;
                        if outcome.is_ok() {
                            source_tx.send_replace(target);
                            state_tx.send_replace(LiveState::default());
                            // Restart the cadence under the new source and
                            // fetch right away rather than waiting out the
                            // current interval.
                            ticker.reset_immediately();
                        }
                        let _ = reply.send(outcome);
                    }
                    None => break,
                }
            }
        }
    }
}

async fn request_switch(feed: &dyn FeedSource, target: SourceId) -> Result<()> {
    let ack = feed.switch_source(target).await?;
    if ack.is_success() {
        tracing::info!("switched feed source to {target}");
        Ok(())
    } else {
        let reason = match ack.message {
            Some(msg) => msg,
            None => format!("status '{}'", ack.status),
        };
        Err(FeedError::SwitchRejected(reason))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
