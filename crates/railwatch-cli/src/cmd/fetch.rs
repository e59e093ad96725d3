use crate::output::print_json;
use anyhow::Context;
use railwatch_core::reconcile::reconcile;
use railwatch_feed::{FeedSource, HttpFeedSource, DEFAULT_POLL_INTERVAL};

/// One-shot poll: fetch, reconcile, print, exit.
pub fn run(url: &str, json: bool) -> anyhow::Result<()> {
    let feed = HttpFeedSource::new(url, DEFAULT_POLL_INTERVAL)?;

    let rt = tokio::runtime::Runtime::new()?;
    let payload = rt
        .block_on(feed.fetch_live())
        .context("failed to fetch the live feed")?;

    let state = reconcile(&payload);
    if json {
        print_json(&state)?;
    } else {
        print!("{}", crate::output::dashboard(&state, None));
    }

    Ok(())
}
