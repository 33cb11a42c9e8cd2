#![cfg(test)]
use std::sync::atomic::Ordering;
use std::time::Duration;

use airgauge_common::error::ScanError;
use airgauge_common::wifi::{HIDDEN_LABEL, NetworkEntry};
use airgauge_core::report::{self, NO_NETWORKS_MESSAGE};
use airgauge_core::scanner::ScanService;
use airgauge_core::scanner::library::LibraryScanner;

use crate::fakes::{
    AbsentNmcli, CannedNmcli, FakeAirwaves, NMCLI_KEYWORD_NAMES, NMCLI_TABLE, SilentScanner,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn names(networks: &[NetworkEntry]) -> Vec<&str> {
    networks.iter().map(|n| n.display_name()).collect()
}

/// nmcli is missing, the library sees X at 50% and Y at 90%.
#[tokio::test]
async fn fallback_to_library_sorts_strongest_first() {
    let airwaves = FakeAirwaves::with(&[("X", "-65"), ("Y", "-37")]);
    let service = ScanService::new(vec![
        Box::new(AbsentNmcli),
        Box::new(LibraryScanner::with_source(airwaves, TIMEOUT)),
    ]);

    let scan_report = service.perform_scan().await.expect("library should answer");

    assert_eq!(scan_report.provider, "wifiscanner");
    assert_eq!(names(&scan_report.networks), ["Y", "X"]);
    assert_eq!(scan_report.networks[0].signal_percent, 90);
    assert_eq!(scan_report.networks[1].signal_percent, 50);
    assert_eq!(scan_report.failures.len(), 1);
    assert_eq!(scan_report.failures[0].provider, "nmcli");

    let lines = report::scan_outcome(&Ok(scan_report));
    assert!(lines[0].contains("SSID"));
    assert!(lines[2].contains("Y") && lines[2].contains("N/A"));
    assert!(lines[3].contains("X"));
}

#[tokio::test]
async fn nmcli_success_skips_the_library() {
    let airwaves = FakeAirwaves::with(&[("Elsewhere", "-40")]);
    let calls = airwaves.calls();
    let service = ScanService::new(vec![
        Box::new(CannedNmcli(NMCLI_TABLE)),
        Box::new(LibraryScanner::with_source(airwaves, TIMEOUT)),
    ]);

    let scan_report = service.perform_scan().await.unwrap();

    assert_eq!(scan_report.provider, "nmcli");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        names(&scan_report.networks),
        ["Home Office", HIDDEN_LABEL, "Library"]
    );
}

#[tokio::test]
async fn duplicate_names_keep_the_first_sighting() {
    let service = ScanService::new(vec![Box::new(CannedNmcli(NMCLI_TABLE))]);

    let scan_report = service.perform_scan().await.unwrap();

    let library: Vec<_> = scan_report
        .networks
        .iter()
        .filter(|n| n.identifier == "Library")
        .collect();
    assert_eq!(library.len(), 1);
    assert_eq!(library[0].signal_percent, 41);
    assert_eq!(library[0].hardware_address.as_deref(), Some("AA:BB:CC:DD:EE:01"));
}

#[tokio::test]
async fn names_with_mode_keywords_stay_distinct() {
    let service = ScanService::new(vec![Box::new(CannedNmcli(NMCLI_KEYWORD_NAMES))]);

    let scan_report = service.perform_scan().await.unwrap();

    assert_eq!(names(&scan_report.networks), ["Home Mesh", "Home", "Mesh"]);
    assert!(scan_report.networks.iter().all(|n| !n.is_hidden));
    let channels: Vec<Option<u16>> = scan_report.networks.iter().map(|n| n.channel).collect();
    assert_eq!(channels, [Some(11), Some(6), Some(1)]);
}

#[tokio::test]
async fn hidden_networks_from_both_sources_stay_distinct() {
    let airwaves = FakeAirwaves::with(&[
        ("a0b1c2d3e4f5", "-50"),
        ("00:11:22:33:44:55", "-60"),
        ("Cafe", "-70"),
    ]);
    let service = ScanService::new(vec![Box::new(LibraryScanner::with_source(
        airwaves, TIMEOUT,
    ))]);

    let scan_report = service.perform_scan().await.unwrap();

    assert_eq!(scan_report.networks.len(), 3);
    assert!(scan_report.networks[0].is_hidden);
    assert!(scan_report.networks[1].is_hidden);
    assert!(!scan_report.networks[2].is_hidden);

    let lines = report::network_table(&scan_report.networks);
    assert!(lines[2].contains(HIDDEN_LABEL) && lines[2].contains("a0b1c2d3e4f5"));
    assert!(lines[3].contains("00:11:22:33:44:55"));
}

#[tokio::test]
async fn empty_scan_prints_only_the_message() {
    let service = ScanService::new(vec![Box::new(SilentScanner)]);

    let outcome = service.perform_scan().await;

    let lines = report::scan_outcome(&outcome);
    assert_eq!(lines, [NO_NETWORKS_MESSAGE]);
}

#[tokio::test]
async fn every_source_failing_prints_troubleshooting() {
    let service = ScanService::new(vec![
        Box::new(AbsentNmcli),
        Box::new(LibraryScanner::with_source(
            FakeAirwaves::broken("interface not found"),
            TIMEOUT,
        )),
    ]);

    let outcome = service.perform_scan().await;

    match &outcome {
        Err(ScanError::AllSourcesExhausted(failures)) => {
            let providers: Vec<&str> = failures.iter().map(|f| f.provider).collect();
            assert_eq!(providers, ["nmcli", "wifiscanner"]);
        }
        other => panic!("expected exhausted sources, got {other:?}"),
    }

    let lines = report::scan_outcome(&outcome);
    assert_eq!(lines[0], "Error with nmcli: nmcli not found in PATH");
    assert_eq!(
        lines[1],
        "Error with wifiscanner: scanning library failed: interface not found"
    );
    assert!(lines.iter().any(|l| l.contains("systemctl status NetworkManager")));
    assert!(!lines.iter().any(|l| l.contains("SSID")));
}

#[tokio::test]
async fn unreadable_nmcli_output_falls_back() {
    let airwaves = FakeAirwaves::with(&[("Backup", "-55")]);
    let service = ScanService::new(vec![
        Box::new(CannedNmcli("IN-USE  BSSID  SSID  MODE  CHAN  RATE  SIGNAL  BARS  SECURITY\n")),
        Box::new(LibraryScanner::with_source(airwaves, TIMEOUT)),
    ]);

    let scan_report = service.perform_scan().await.unwrap();

    assert_eq!(scan_report.provider, "wifiscanner");
    assert!(matches!(
        scan_report.failures[0].error,
        ScanError::ToolExecutionFailed { .. }
    ));
    assert_eq!(names(&scan_report.networks), ["Backup"]);
}
