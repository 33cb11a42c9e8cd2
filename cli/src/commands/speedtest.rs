use colored::*;
use tracing::Instrument;

use crate::terminal::{colors, format, print, spinner};
use airgauge_common::config::Config;
use airgauge_common::speed::SpeedReport;
use airgauge_core::report;
use airgauge_core::speedtest::{CloudflareSpeedTester, SpeedTestService};

const KEY_WIDTH: usize = 16;

/// Runs a full speed test. Upstream failures are fatal for the command.
pub async fn speedtest(cfg: &Config) -> anyhow::Result<()> {
    print::header("internet speed test", cfg.quiet);

    let tester = CloudflareSpeedTester::new(cfg.speedtest_timeout)?;
    let service = SpeedTestService::new(Box::new(tester));

    let server = service
        .select_server()
        .instrument(spinner::span("Fetching server information..."))
        .await?;

    for (label, value) in report::server_details(&server) {
        print::aligned_line(label, value, KEY_WIDTH);
    }

    let result = service
        .measure(server)
        .instrument(spinner::span("Measuring latency, download and upload..."))
        .await?;

    print::header("results", cfg.quiet);
    print_results(&result);
    print::end_of_program();

    Ok(())
}

fn print_results(result: &SpeedReport) {
    for (label, value) in report::speed_measurements(result) {
        print::aligned_line(label, value, KEY_WIDTH);
    }

    print::print("");
    print::print(&format!(
        "{}",
        report::ASSESSMENT_TITLE.color(colors::ACCENT).bold()
    ));

    for (label, assessment) in report::speed_assessments(result) {
        let value = assessment
            .to_string()
            .color(format::grade_color(assessment.grade));
        print::aligned_line(label, value, KEY_WIDTH);
    }
}
