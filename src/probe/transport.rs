// src/probe/transport.rs
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub elapsed: Duration,
}

/// Any failure to complete the exchange: refused, timed out, DNS, broken body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Connection(err.to_string())
    }
}

/// Sends a single GET. Retries and timeouts are whatever the implementation
/// does by default.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<ProbeResponse, ProbeError>;
}

#[async_trait]
impl Transport for Client {
    async fn fetch(&self, url: &Url) -> Result<ProbeResponse, ProbeError> {
        let start = Instant::now();
        let response = self.get(url.as_str()).send().await?;
        let status = response.status().as_u16();
        // A body that cannot be read in full counts as a failed exchange,
        // so the status seen in the headers is not reported.
        let body = response.bytes().await?.to_vec();

        Ok(ProbeResponse {
            status,
            body,
            elapsed: start.elapsed(),
        })
    }
}
