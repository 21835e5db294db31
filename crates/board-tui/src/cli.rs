use std::path::PathBuf;

use clap::Parser;

/// Terminal departure board: blinking clock plus a schedule read from a CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schedule file to show at startup (overrides `board.initial_file`)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Clock tick period in milliseconds (overrides `board.tick_interval_ms`)
    #[arg(long = "tick-ms", value_name = "N")]
    pub tick_ms: Option<u64>,
}
