// src/config/models.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Target probed when nothing else is configured.
pub const DEFAULT_TARGET_URL: &str = "http://localhost:22313";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_target_url")]
    pub target_url: Url,

    /// Request timeout. `None` leaves the transport's default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        match self.target_url.scheme() {
            "http" | "https" => {}
            other => bail!("Unsupported target_url scheme: {}", other),
        }

        if self.target_url.host_str().is_none() {
            bail!("target_url has no host: {}", self.target_url);
        }

        if self.timeout_secs == Some(0) {
            bail!("timeout_secs must be greater than zero");
        }

        Ok(())
    }

    /// Layer environment overrides on top of the file values.
    pub fn apply_overrides(&mut self, overrides: EnvOverrides) -> Result<()> {
        if let Some(target) = overrides.target_url {
            self.target_url = Url::parse(&target)
                .map_err(|e| anyhow::anyhow!("Invalid PROBE_TARGET_URL {:?}: {}", target, e))?;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = Some(timeout);
        }
        if let Some(agent) = overrides.user_agent {
            self.user_agent = Some(agent);
        }
        Ok(())
    }
}

/// Values read from `PROBE_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EnvOverrides {
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_target_url() -> Url {
    Url::parse(DEFAULT_TARGET_URL).expect("default target url is valid")
}
