//! Plain text renderings of scan and speed test results.
//!
//! The CLI decorates these lines; nothing here writes to the terminal.

use airgauge_common::error::{ProviderFailure, ScanError};
use airgauge_common::speed::{self, Assessment, ServerInfo, SpeedReport};
use airgauge_common::wifi::{HIDDEN_LABEL, NetworkEntry};

use crate::scanner::ScanReport;

pub const NO_NETWORKS_MESSAGE: &str =
    "No WiFi networks found. Make sure your WiFi adapter is enabled.";

const SSID_WIDTH: usize = 30;
const MAC_WIDTH: usize = 20;
const SIGNAL_WIDTH: usize = 20;
const QUALITY_WIDTH: usize = 18;

const POSSIBLE_CAUSES: &[&str] = &[
    "WiFi adapter might be disabled",
    "Required dependencies might be missing (try: sudo apt install network-manager)",
    "Permission issues with network interfaces",
];

const TROUBLESHOOTING_STEPS: &[&str] = &[
    "Ensure WiFi is enabled: rfkill unblock wifi",
    "Check if NetworkManager is running: systemctl status NetworkManager",
    "Check available WiFi adapters: ip link show",
];

/// Fixed-width table, or the "no networks" message when there is nothing to show.
pub fn network_table(networks: &[NetworkEntry]) -> Vec<String> {
    if networks.is_empty() {
        return vec![NO_NETWORKS_MESSAGE.to_string()];
    }

    let header = format!(
        "  {:<SSID_WIDTH$} {:<MAC_WIDTH$} {:<SIGNAL_WIDTH$} {:<QUALITY_WIDTH$} {}",
        "SSID", "MAC Address", "Signal Strength", "Quality", "Vendor"
    );
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![header, rule];
    lines.extend(networks.iter().map(network_row));
    lines
}

fn network_row(network: &NetworkEntry) -> String {
    let marker = if network.in_use { '*' } else { ' ' };
    let signal = format!("{}% ({} dBm)", network.signal_percent, network.signal_dbm);
    let quality = format!("{} ({})", network.display_bars(), network.quality);

    format!(
        "{marker} {:<SSID_WIDTH$} {:<MAC_WIDTH$} {:<SIGNAL_WIDTH$} {:<QUALITY_WIDTH$} {}",
        fit(network.display_name(), SSID_WIDTH),
        hardware_column(network),
        signal,
        quality,
        network.vendor.as_deref().unwrap_or("-"),
    )
}

/// Hidden library entries carry their address-like token as identifier.
fn hardware_column(network: &NetworkEntry) -> &str {
    match &network.hardware_address {
        Some(address) => address,
        None if network.is_hidden && network.identifier != HIDDEN_LABEL => &network.identifier,
        None => "N/A",
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Combined diagnostic for a scan where every source failed.
pub fn troubleshooting(failures: &[ProviderFailure]) -> Vec<String> {
    let mut lines: Vec<String> = failures
        .iter()
        .map(|failure| format!("Error with {}", failure))
        .collect();

    lines.push(String::new());
    lines.push("Possible causes:".to_string());
    lines.extend(POSSIBLE_CAUSES.iter().map(|cause| format!("- {cause}")));

    lines.push(String::new());
    lines.push("Troubleshooting:".to_string());
    lines.extend(
        TROUBLESHOOTING_STEPS
            .iter()
            .enumerate()
            .map(|(idx, step)| format!("{}. {step}", idx + 1)),
    );
    lines
}

/// Shown instead of scanning when the process is not elevated.
pub fn permission_guidance() -> Vec<String> {
    vec![
        "❌ Error: WiFi scanning requires root privileges.".to_string(),
        "Please run the command with sudo: sudo airgauge scan".to_string(),
    ]
}

/// What the `scan` command prints for a given outcome.
pub fn scan_outcome(outcome: &Result<ScanReport, ScanError>) -> Vec<String> {
    match outcome {
        Ok(report) => network_table(&report.networks),
        Err(ScanError::PermissionDenied) => permission_guidance(),
        Err(ScanError::AllSourcesExhausted(failures)) => troubleshooting(failures),
        Err(other) => vec![format!("Error: {other}")],
    }
}

/// Labelled server details, in display order.
pub fn server_details(server: &ServerInfo) -> [(&'static str, String); 3] {
    let distance = match server.distance_km {
        Some(km) => format!("{km:.2} km"),
        None => "unknown".to_string(),
    };
    [
        (
            "Selected Server",
            format!("{} ({})", server.name, server.country),
        ),
        ("Server Sponsor", server.sponsor.clone()),
        ("Distance", distance),
    ]
}

pub fn server_summary(server: &ServerInfo) -> Vec<String> {
    server_details(server)
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect()
}

/// Labelled throughput and latency figures.
pub fn speed_measurements(report: &SpeedReport) -> [(&'static str, String); 3] {
    [
        ("Download Speed", format!("{:.2} Mbps", report.download_mbps)),
        ("Upload Speed", format!("{:.2} Mbps", report.upload_mbps)),
        ("Ping (Latency)", format!("{:.2} ms", report.latency_ms())),
    ]
}

/// Grades for download, upload and latency, in that order.
pub fn speed_assessments(report: &SpeedReport) -> [(&'static str, Assessment); 3] {
    [
        ("Download", speed::assess_download(report.download_mbps)),
        ("Upload", speed::assess_upload(report.upload_mbps)),
        ("Latency", speed::assess_latency(report.latency_ms())),
    ]
}

pub const ASSESSMENT_TITLE: &str = "Connection Quality Assessment";

pub fn speed_summary(report: &SpeedReport) -> Vec<String> {
    let mut lines: Vec<String> = speed_measurements(report)
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    lines.push(String::new());
    lines.push(format!("{ASSESSMENT_TITLE}:"));
    lines.extend(
        speed_assessments(report)
            .iter()
            .map(|(label, assessment)| format!("{label}: {assessment}")),
    );
    lines
}
