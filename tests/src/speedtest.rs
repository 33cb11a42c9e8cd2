#![cfg(test)]
use std::time::Duration;

use airgauge_common::error::{SpeedTestError, SpeedTestStep};
use airgauge_core::report;
use airgauge_core::speedtest::SpeedTestService;

use crate::fakes::FakeSpeedTester;

#[tokio::test]
async fn report_carries_normalized_throughput_and_grades() {
    let service = SpeedTestService::new(Box::new(FakeSpeedTester::healthy()));

    let result = service.run().await.expect("speed test should succeed");

    // 48 000 000 is implausible as Mbps and is read as bit/s.
    assert!((result.download_mbps - 48.0).abs() < 1e-9);
    assert_eq!(result.upload_mbps, 9.5);
    assert_eq!(result.latency, Duration::from_millis(12));

    let lines = report::speed_summary(&result);
    assert_eq!(lines[0], "Download Speed: 48.00 Mbps");
    assert_eq!(lines[1], "Upload Speed: 9.50 Mbps");
    assert_eq!(lines[2], "Ping (Latency): 12.00 ms");
    assert_eq!(lines[5], "Download: Good (HD streaming, video calls)");
    assert_eq!(lines[6], "Upload: Good (video calls, file uploads)");
    assert_eq!(lines[7], "Latency: Excellent (competitive gaming)");
}

#[tokio::test]
async fn server_details_are_rendered() {
    let service = SpeedTestService::new(Box::new(FakeSpeedTester::healthy()));
    let server = service.select_server().await.unwrap();

    let lines = report::server_summary(&server);
    assert_eq!(lines[0], "Selected Server: Amsterdam [AMS] (NL)");
    assert_eq!(lines[1], "Server Sponsor: Fake Transit");
    assert_eq!(lines[2], "Distance: 4.20 km");
}

#[tokio::test]
async fn failing_download_is_reported_with_its_step() {
    let service = SpeedTestService::new(Box::new(FakeSpeedTester::failing_download()));

    let err = service.run().await.unwrap_err();
    assert!(matches!(
        err,
        SpeedTestError::Upstream {
            step: SpeedTestStep::Download,
            ..
        }
    ));
    assert_eq!(err.to_string(), "error during download test: connection reset");
}
