use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "listings_api", version, about = "Real-estate listings API with zip demographics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve,
    /// Replace all listings with the rows of a CSV export.
    Ingest {
        /// URL or file path; defaults to `ingest.source` from config.
        #[arg(long)]
        source: Option<String>,
    },
}
