//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `mail_spoof` library: loads `.env`, parses the
//! command line, sets up logging and prints a summary. Results go to the
//! configured JSON output.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mail_spoof::initialization::init_logger_with;
use mail_spoof::{run_scan, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Some(env_path) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(".env")))
        {
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
            }
        }
    }

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            // stdout may carry the JSON results, keep the summary on stderr
            eprintln!(
                "✅ Scanned {} domain{} ({} with findings) in {:.1}s",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.domains_with_findings,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("mail_spoof error: {:#}", e);
            process::exit(1);
        }
    }
}
