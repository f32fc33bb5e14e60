// src/lib.rs
pub mod check;
pub mod config;
pub mod probe;

pub use check::{CheckResult, IS_STATUS_200};
pub use config::ProbeConfig;
pub use probe::{run_probe, Probe, ProbeError, ProbeReport, ProbeResponse, Transport};
