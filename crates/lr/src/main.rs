//! LR CLI - live reload client.
//!
//! Connects to the development notification server at `ws://localhost:8081`
//! and restarts itself whenever the server closes the connection.

mod error;
mod output;

use clap::Parser;
use lr_client::{ProcessReloader, ReloadClient, SessionEnd};
use lr_config::ClientConfig;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// LR - live reload client.
#[derive(Parser)]
#[command(name = "lr", version, about)]
struct Cli {
    /// Enable verbose output (log every connection event).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .init();

    let result = tokio::runtime::Runtime::new()
        .map_err(CliError::from)
        .and_then(|rt| rt.block_on(run(&output)));

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Build the log filter.
///
/// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Run one client session, then idle if the server was unreachable.
async fn run(output: &Output) -> Result<(), CliError> {
    let config = ClientConfig::default();
    let endpoint = config.endpoint()?;

    output.highlight(&format!("Live reload: {endpoint}"));

    let client = ReloadClient::new(config, ProcessReloader);
    match client.start().await? {
        SessionEnd::NotConnected => {
            output.warning("Notification server unreachable, live reload inactive");
            output.info("Press Ctrl+C to exit");
            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received");
        }
        SessionEnd::Reloaded => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["lr", "--verbose"]).unwrap();
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["lr"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_uses_rust_log() {
        assert_eq!(log_filter(false, Some("debug")).to_string(), "debug");
    }

    #[test]
    fn test_log_filter_invalid_rust_log_falls_back_to_warn() {
        assert_eq!(log_filter(false, Some("lr=notalevel")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_verbose_overrides_rust_log() {
        assert_eq!(log_filter(true, Some("error")).to_string(), "info");
    }

    #[test]
    fn test_rejects_endpoint_flags() {
        assert!(Cli::try_parse_from(["lr", "--port", "9000"]).is_err());
    }
}
