mod cmd;
mod output;

use clap::{Parser, Subcommand};
use railwatch_core::clock::SimRate;
use railwatch_core::types::SourceId;
use railwatch_feed::HttpFeedSource;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "railwatch",
    about = "Corridor simulation and live railway traffic dashboard",
    version,
    propagate_version = true
)]
struct Cli {
    /// Feed backend base URL
    #[arg(
        long,
        global = true,
        env = "RAILWATCH_FEED_URL",
        default_value = HttpFeedSource::DEFAULT_URL
    )]
    url: String,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deterministic corridor simulation
    Simulate {
        /// Scenario minutes per wall-clock second (1, 5, or 10)
        #[arg(long, default_value = "5")]
        rate: SimRate,

        /// Frames to render before exiting (0 = run until interrupted)
        #[arg(long, default_value = "0")]
        ticks: u64,

        /// Corridor YAML file (default: built-in Bilaspur-Akaltara-Champa)
        #[arg(long)]
        corridor: Option<PathBuf>,
    },

    /// Poll the live feed and redraw the dashboard on every snapshot
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value = "5")]
        interval: u64,
    },

    /// Fetch one live snapshot and exit
    Fetch,

    /// Switch the backend data source
    Switch {
        /// Target source ('india' or 'cg')
        source: SourceId,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Watch { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Simulate {
            rate,
            ticks,
            corridor,
        } => cmd::simulate::run(corridor.as_deref(), rate, ticks, cli.json),
        Commands::Watch { interval } => cmd::watch::run(&cli.url, interval, cli.json),
        Commands::Fetch => cmd::fetch::run(&cli.url, cli.json),
        Commands::Switch { source } => cmd::switch::run(&cli.url, source, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
