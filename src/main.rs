use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use multiply_pets::media::{DEFAULT_RETRIES, DEFAULT_TIMEOUT};
use multiply_pets::{Game, GameError, HttpFetcher, JoinPolicy, PrefetchConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seconds to wait for each animal before giving up on it
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Extra attempts per animal before showing a placeholder
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    retries: u32,

    /// What to do when an animal cannot be fetched
    #[arg(long, value_enum, default_value_t = JoinPolicy::Fallback)]
    join_policy: JoinPolicy,

    /// Don't preload pictures and videos
    #[arg(long)]
    no_warm: bool,

    /// Seed for question order and answer choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (RUST_LOG sets the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn prefetch_config(&self) -> PrefetchConfig {
        PrefetchConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
            policy: self.join_policy,
            warm: !self.no_warm,
            ..PrefetchConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), GameError> {
    let fetcher = HttpFetcher::new()?;
    let game = Game::new(fetcher, args.prefetch_config(), args.seed);
    game.run().await
}

fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let file = log_file.map(File::create).transpose()?;
    let rust_log = std::env::var("RUST_LOG").ok();

    logger_builder(file, rust_log.as_deref()).init();
    log::info!("starting {}", env!("CARGO_PKG_NAME"));
    Ok(())
}

/// The TUI owns the terminal, so logs only ever go to a file. Without one
/// logging stays off whatever `RUST_LOG` says.
fn logger_builder(log_file: Option<File>, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = pretty_env_logger::formatted_builder();

    match log_file {
        Some(file) => {
            builder
                .filter_level(LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .write_style(env_logger::WriteStyle::Never);
            if let Some(filters) = rust_log {
                builder.parse_filters(filters);
            }
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> File {
        let path = std::env::temp_dir().join(format!("multiply-pets-{}-{}.log", name, std::process::id()));
        File::create(path).expect("create log file")
    }

    #[test]
    fn test_no_log_file_keeps_logging_off() {
        let logger = logger_builder(None, Some("debug")).build();
        assert_eq!(logger.filter(), LevelFilter::Off);

        let logger = logger_builder(None, None).build();
        assert_eq!(logger.filter(), LevelFilter::Off);
    }

    #[test]
    fn test_log_file_honours_rust_log() {
        let logger = logger_builder(Some(scratch_file("default")), None).build();
        assert_eq!(logger.filter(), LevelFilter::Info);

        let logger = logger_builder(Some(scratch_file("debug")), Some("debug")).build();
        assert_eq!(logger.filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_args_build_prefetch_config() {
        let args = Args::parse_from(["multiply-pets", "--join-policy", "fail-fast", "--no-warm"]);
        let config = args.prefetch_config();

        assert_eq!(config.policy, JoinPolicy::FailFast);
        assert!(!config.warm);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
