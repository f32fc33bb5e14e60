// src/main.rs
use anyhow::{Context, Result};
use http_probe::{config, Probe};
use std::process::ExitCode;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("http_probe=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let config = config::load(std::env::args().skip(1)).await?;
    info!("Probing {}", config.target_url);

    let probe = Probe::new(config)?;
    let report = probe.run().await;

    let output = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
    println!("{}", output);

    if report.passed() {
        info!("Probe passed");
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("Probe failed");
        Ok(ExitCode::FAILURE)
    }
}
