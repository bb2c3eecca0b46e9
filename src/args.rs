use clap::Parser;
use std::path::PathBuf;

use crate::reader::DEFAULT_CHUNK_SIZE;

#[derive(Parser, Debug)]
#[command(
    name = "pagehits",
    about = "Count page visits and unique visitors in a web server access log",
    version,
    long_about = None
)]
pub struct Args {
    /// Access log with one `<page> <ip-address>` record per line
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Only list the N highest-ranked pages in each section
    #[arg(short, long, value_name = "N")]
    pub top: Option<usize>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Bytes read from the log file per chunk
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
