//! Scan source backed by the NetworkManager command line tool.
//!
//! The command runs once per scan; its captured output is then decoded line
//! by line in parallel. Lines that do not decode are dropped.

use std::process::Output;
use std::time::Duration;

use airgauge_common::error::ScanError;
use airgauge_common::scanning::WifiScanner;
use airgauge_common::wifi::NetworkEntry;
use airgauge_common::wifi::parse::{self, LineOutcome, OutputLayout};
use async_trait::async_trait;
use rayon::prelude::*;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::system;

const NMCLI: &str = "nmcli";

pub struct NmcliScanner {
    program: String,
    layout: OutputLayout,
    timeout: Duration,
}

impl NmcliScanner {
    pub fn new(layout: OutputLayout, timeout: Duration) -> Self {
        Self::with_program(NMCLI, layout, timeout)
    }

    /// Runs `program` (a name looked up on `PATH`, or a path) instead of `nmcli`.
    pub fn with_program(program: impl Into<String>, layout: OutputLayout, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            layout,
            timeout,
        }
    }

    fn args(&self) -> &'static [&'static str] {
        match self.layout {
            OutputLayout::Table => &["-c", "no", "device", "wifi", "list", "--rescan", "yes"],
            OutputLayout::Terse => &[
                "-t", "-f", "SSID,SIGNAL,BARS", "device", "wifi", "list", "--rescan", "yes",
            ],
        }
    }

    /// Runs the tool and returns stdout followed by stderr.
    async fn run(&self) -> Result<String, ScanError> {
        let program = system::locate_tool(&self.program).ok_or_else(|| ScanError::ToolUnavailable {
            tool: self.program.clone(),
        })?;
        debug!("running {} {}", program.display(), self.args().join(" "));

        let child = Command::new(&program)
            .args(self.args())
            .kill_on_drop(true)
            .output();

        let output: Output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| ScanError::TimedOut {
                source_name: NMCLI.to_string(),
                after: self.timeout,
            })?
            .map_err(|e| execution_failed(e.to_string()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(execution_failed(format!(
                "exited with {}: {}",
                output.status,
                combined.trim()
            )));
        }

        Ok(combined)
    }
}

#[async_trait]
impl WifiScanner for NmcliScanner {
    fn name(&self) -> &'static str {
        NMCLI
    }

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
        let output = self.run().await?;
        parse_output(&output, self.layout)
    }
}

/// Decodes captured tool output into entries, in output order.
pub fn parse_output(output: &str, layout: OutputLayout) -> Result<Vec<NetworkEntry>, ScanError> {
    if output.trim().is_empty() {
        return Err(execution_failed("no output from nmcli"));
    }

    let rows: Vec<&str> = output
        .lines()
        .skip(usize::from(layout.has_header()))
        .filter(|line| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(execution_failed("no data rows after the header"));
    }

    let entries: Vec<NetworkEntry> = rows
        .par_iter()
        .filter_map(|line| match parse::parse_line(line, layout) {
            LineOutcome::Entry(entry) => Some(entry),
            LineOutcome::Skip(reason) => {
                trace!("skipping nmcli record ({reason}): {line}");
                None
            }
        })
        .collect();

    if entries.is_empty() {
        return Err(execution_failed(format!(
            "none of the {} rows could be parsed",
            rows.len()
        )));
    }

    debug!("decoded {} of {} nmcli rows", entries.len(), rows.len());
    Ok(entries)
}

fn execution_failed(reason: impl Into<String>) -> ScanError {
    ScanError::ToolExecutionFailed {
        tool: NMCLI.to_string(),
        reason: reason.into(),
    }
}
