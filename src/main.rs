//! cestat - report AWS Cost Explorer spend from the command line

use cestat::{
    cli::Cli,
    report::{ReportRequest, run_report},
};
use cestat_core::{Result, timezone::TimezoneConfig};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn run(cli: &Cli) -> Result<String> {
    let tz_config = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!("Using timezone: {}", tz_config.display_name());

    let request = ReportRequest::from_cli(
        cli,
        is_terminal::is_terminal(std::io::stdout()),
        is_terminal::is_terminal(std::io::stderr()),
    )?;
    let source = cli.aws_source();

    run_report(&source, &request, tz_config.today()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit here with clap's own message and code
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays machine readable
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "Report failed");
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
