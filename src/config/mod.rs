// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable consulted when no path is passed on the command line.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "PROBE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Load configuration from a file (YAML or JSON)
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<ProbeConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .context("Failed to read config file")?;

    parse_config(&contents, ConfigFormat::from_path(path))
}

pub fn parse_config(contents: &str, format: ConfigFormat) -> Result<ProbeConfig> {
    let config: ProbeConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(contents).context("Failed to parse YAML config")?,
        ConfigFormat::Json => serde_json::from_str(contents).context("Failed to parse JSON config")?,
    };

    config.validate()?;
    Ok(config)
}

/// Pick the config file: first positional argument, then `CONFIG_PATH`.
/// `Ok(None)` means no file was requested and defaults apply.
pub fn resolve_config_path<I, F>(args: I, getenv: F) -> Result<Option<PathBuf>>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let path = match args.into_iter().next() {
        Some(arg) => PathBuf::from(arg),
        None => match getenv(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
            Some(env) => PathBuf::from(env),
            None => return Ok(None),
        },
    };

    if !path.exists() {
        bail!("Specified config file does not exist: {}", path.display());
    }

    Ok(Some(path))
}

/// Read `PROBE_*` overrides from the process environment.
pub fn env_overrides() -> Result<EnvOverrides> {
    let overrides = ::config::Config::builder()
        .add_source(::config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to read environment overrides")?
        .try_deserialize::<EnvOverrides>()
        .context("Failed to parse environment overrides")?;

    Ok(overrides)
}

/// Full loading pipeline used by the binary: file (if any), then environment.
pub async fn load<I>(args: I) -> Result<ProbeConfig>
where
    I: IntoIterator<Item = String>,
{
    let mut config = match resolve_config_path(args, |key| std::env::var(key).ok())? {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config(&path).await?
        }
        None => {
            debug!("No config file given, using defaults");
            ProbeConfig::default()
        }
    };

    config.apply_overrides(env_overrides()?)?;
    config.validate()?;
    Ok(config)
}
