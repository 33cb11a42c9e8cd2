use std::time::{Duration, Instant};

use colored::*;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};
use crate::{mprint, success};
use airgauge_common::config::Config;
use airgauge_common::error::{ProviderFailure, ScanError};
use airgauge_common::wifi::NetworkEntry;
use airgauge_core::report;
use airgauge_core::scanner::{ScanReport, ScanService};
use airgauge_core::system;

/// Lists nearby networks. Every outcome the user can act on exits cleanly.
pub async fn scan(cfg: &Config) -> anyhow::Result<()> {
    if let Err(denied) = system::ensure_elevated() {
        permission_denied(denied);
        return Ok(());
    }

    print::header("scanning for networks", cfg.quiet);

    let service = ScanService::from_config(cfg);
    let start_time = Instant::now();
    let outcome = service
        .perform_scan()
        .instrument(spinner::span("Scanning nearby WiFi networks..."))
        .await;

    match outcome {
        Ok(scan_report) if scan_report.networks.is_empty() => no_networks_found(cfg),
        Ok(scan_report) => {
            print_failures(&scan_report.failures);
            print_networks(&scan_report, cfg);
            print_summary(&scan_report, start_time.elapsed(), cfg);
        }
        Err(ScanError::AllSourcesExhausted(failures)) => all_sources_failed(&failures, cfg),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}

fn permission_denied(denied: ScanError) {
    for line in report::scan_outcome(&Err(denied)) {
        print::error(&line);
    }
}

fn no_networks_found(cfg: &Config) {
    print::header("zero networks detected", cfg.quiet);
    if cfg.quiet == 0 {
        print::no_results();
    }
    for line in report::network_table(&[]) {
        print::print_status(line);
    }
}

/// Providers that failed before the one that answered.
fn print_failures(failures: &[ProviderFailure]) {
    for failure in failures {
        print::print_status(format!("{} {}", "fell back after".color(colors::SEPARATOR), failure));
    }
}

fn print_networks(scan_report: &ScanReport, cfg: &Config) {
    print::header("nearby networks", cfg.quiet);

    let lines = report::network_table(&scan_report.networks);
    let (head, rows) = lines.split_at(2.min(lines.len()));

    for line in head {
        print::print(&format!("{}", line.color(colors::PRIMARY)));
    }
    for (row, network) in rows.iter().zip(&scan_report.networks) {
        print_row(row, network);
    }
}

fn print_row(row: &str, network: &NetworkEntry) {
    let colored_row = row.color(format::quality_color(network.quality));
    if network.in_use {
        print::print(&format!("{}", colored_row.bold()));
    } else {
        print::print(&format!("{}", colored_row));
    }
}

fn print_summary(scan_report: &ScanReport, total_time: Duration, cfg: &Config) {
    let count: ColoredString = format!("{} networks", scan_report.networks.len())
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!(
        "Scan Complete: {count} found with {} in {total_time}",
        scan_report.provider.color(colors::ACCENT)
    );

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
            success!("{}", output);
        }
    }
}

fn all_sources_failed(failures: &[ProviderFailure], cfg: &Config) {
    print::header("scan failed", cfg.quiet);

    for line in report::troubleshooting(failures) {
        if line.starts_with("Error with") {
            print::error(&line);
        } else {
            print::print(&line);
        }
    }
}
