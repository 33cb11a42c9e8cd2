//! Adapters and services behind the `airgauge` CLI.
//!
//! [`scanner`] drives the wireless scan providers, [`speedtest`] the remote
//! throughput measurement. [`report`] turns both outcomes into plain lines.

pub mod report;
pub mod scanner;
pub mod speedtest;
pub mod system;
pub mod vendors;
