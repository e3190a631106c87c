use aen_scrub::constants::DEFAULT_LOG_FILTER;
use aen_scrub::{cli, errors};
use errors::AppResult;
use tracing_subscriber::EnvFilter;

fn main() -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli::cli() {
        Err(e) if e.is_usage() => {
            println!("{e}");
            std::process::exit(1);
        }
        result => result,
    }
}
