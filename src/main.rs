//! CLI entry point for the image morphing toy

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trufflify::io::cli::{Cli, Session};

fn main() -> trufflify::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "trufflify=warn"
    } else {
        "trufflify=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let session = Session::new(cli);
    session
        .run()
        .inspect_err(|e| tracing::error!(%e, seed = session.seed(), "session aborted"))
        .map(|_| ())
}
