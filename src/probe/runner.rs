// src/probe/runner.rs
use super::transport::Transport;
use crate::check::{default_checks, evaluate, Check, CheckResult};
use crate::config::ProbeConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;
use uuid::Uuid;

/// Record of one probe run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub run_id: Uuid,
    pub target: Url,
    pub started_at: DateTime<Utc>,
    pub response_time_ms: u64,
    pub status: Option<u16>,
    pub error: Option<String>,
    pub checks: CheckResult,
}

impl ProbeReport {
    pub fn passed(&self) -> bool {
        self.checks.passed()
    }
}

/// Probe `url` once and evaluate the status check. Transport failures are
/// folded into a failed check and never returned.
pub async fn run_probe<T>(transport: &T, url: &Url) -> CheckResult
where
    T: Transport + ?Sized,
{
    execute(transport, url, &default_checks()).await.checks
}

/// One request, then every check against its outcome.
pub async fn execute<T>(transport: &T, url: &Url, checks: &[Check]) -> ProbeReport
where
    T: Transport + ?Sized,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("probe", %run_id, target = %url);

    async move {
        let started_at = Utc::now();
        let start = std::time::Instant::now();

        let result = transport.fetch(url).await;
        let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let (response, error) = match result {
            Ok(response) => (Some(response), None),
            Err(e) => {
                warn!("Probe request failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        let checks = evaluate(response.as_ref(), checks);

        if checks.passed() {
            debug!("All checks passed in {}ms", response_time_ms);
        } else if let Some(response) = &response {
            warn!(
                "Checks failed: HTTP {} in {}ms",
                response.status, response_time_ms
            );
        }

        ProbeReport {
            run_id,
            target: url.clone(),
            started_at,
            response_time_ms,
            status: response.map(|r| r.status),
            error,
            checks,
        }
    }
    .instrument(span)
    .await
}

/// Owns the configured client and target so a harness can call `run`
/// once per iteration.
#[derive(Debug, Clone)]
pub struct Probe {
    config: ProbeConfig,
    client: Client,
    checks: Vec<Check>,
}

impl Probe {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: ProbeConfig, client: Client) -> Self {
        Self {
            config,
            client,
            checks: default_checks(),
        }
    }

    pub fn with_checks(mut self, checks: Vec<Check>) -> Self {
        self.checks = checks;
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub async fn run(&self) -> ProbeReport {
        execute(&self.client, &self.config.target_url, &self.checks).await
    }
}
