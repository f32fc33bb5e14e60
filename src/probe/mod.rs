// src/probe/mod.rs
mod runner;
mod transport;

pub use runner::{execute, run_probe, Probe, ProbeReport};
pub use transport::{ProbeError, ProbeResponse, Transport};
