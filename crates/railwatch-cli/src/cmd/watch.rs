use railwatch_core::types::SourceId;
use railwatch_feed::{HttpFeedSource, Poller};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;

/// Polls the feed and redraws the dashboard on every snapshot until
/// interrupted. The first frame is the empty default state, replaced as
/// soon as the initial poll lands.
pub fn run(url: &str, interval: u64, json: bool) -> anyhow::Result<()> {
    let every = Duration::from_secs(interval.max(1));
    let feed = HttpFeedSource::new(url, every)?;
    let url = feed.base_url().to_string();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let poller = Poller::spawn(Arc::new(feed), every, SourceId::default());
        println!("watching {url} every {}s (Ctrl-C to stop)", every.as_secs());

        let mut updates = poller.updates();
        loop {
            tokio::select! {
                next = updates.next() => {
                    match next {
                        Some(state) => {
                            if json {
                                println!("{}", serde_json::to_string(&state)?);
                            } else {
                                print!("{}", crate::output::dashboard(&state, Some(poller.active_source())));
                            }
                        }
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }

        Ok(())
    })
}
