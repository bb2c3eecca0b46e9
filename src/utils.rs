use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Logs go to stderr so stdout only
/// carries the report. `RUST_LOG` wins over `verbose` when set.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    if args.chunk_size == 0 {
        anyhow::bail!("--chunk-size must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    #[test]
    fn defaults_pass_validation() {
        let args = Args::parse_from(["pagehits", "webserver.log"]);
        assert_eq!(args.chunk_size, crate::reader::DEFAULT_CHUNK_SIZE);
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn zero_top_is_rejected() {
        let args = Args::parse_from(["pagehits", "webserver.log", "--top", "0"]);
        let err = validate_args(&args).unwrap_err();
        assert!(err.to_string().contains("--top"));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let args = Args::parse_from(["pagehits", "webserver.log", "--chunk-size", "0"]);
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn log_file_is_optional_at_parse_time() {
        let args = Args::parse_from(["pagehits"]);
        assert!(args.log_file.is_none());
    }
}
