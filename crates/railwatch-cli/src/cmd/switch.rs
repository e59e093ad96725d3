use crate::output::print_json;
use anyhow::bail;
use railwatch_core::types::SourceId;
use railwatch_feed::{FeedSource, HttpFeedSource, DEFAULT_POLL_INTERVAL};

/// Asks the backend to switch its active data source.
pub fn run(url: &str, source: SourceId, json: bool) -> anyhow::Result<()> {
    let feed = HttpFeedSource::new(url, DEFAULT_POLL_INTERVAL)?;

    let rt = tokio::runtime::Runtime::new()?;
    let ack = rt.block_on(feed.switch_source(source))?;

    if !ack.is_success() {
        match ack.message {
            Some(msg) => bail!("switch rejected: {msg}"),
            None => bail!("switch rejected: status '{}'", ack.status),
        }
    }

    if json {
        print_json(&ack)?;
    } else {
        println!("active source: {source} ({})", source.label());
        if let Some(msg) = ack.message {
            println!("{msg}");
        }
    }

    Ok(())
}
