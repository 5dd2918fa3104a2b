use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "quakefeed - mirrors the USGS earthquake feed into PostgreSQL",
    long_about = "quakefeed polls the USGS earthquake GeoJSON feed on a fixed interval, \
                  flattens every event into a record and inserts new records into a \
                  PostgreSQL table keyed by the USGS event id. Re-polling is idempotent."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the polling daemon until interrupted (default behavior)
    Run,
    /// Run a single poll cycle and exit
    Once {
        /// Map the feed without a database and print records as JSON lines
        #[arg(long)]
        dry_run: bool,
    },
    /// Create the collection and its unique index, then exit
    Init,
    /// Print record count and indexes of the collection
    Status,
}

impl Cli {
    /// The command to execute, defaulting to `run`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}
