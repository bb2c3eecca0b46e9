use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use pagehits::utils::{setup_logging, validate_args};
use pagehits::{Args, LogFileParser, ParseError, Summary};

fn analyze(args: &Args) -> Result<Summary, ParseError> {
    LogFileParser::new(args.log_file.as_deref())?
        .with_chunk_size(args.chunk_size)
        .run()
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    match analyze(&args) {
        Ok(summary) => {
            if args.json {
                let json = serde_json::to_string_pretty(&summary.report(args.top))
                    .context("Failed to serialize summary")?;
                println!("{json}");
            } else {
                print!("{}", summary.render_top(args.top));
            }
            Ok(())
        }
        Err(e) => {
            error!(action = "abort", component = "log_parser", kind = e.kind(), error = %e, "Parsing failed");
            eprintln!("{}:: {}", e.kind(), e);
            std::process::exit(1);
        }
    }
}
