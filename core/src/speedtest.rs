//! Throughput and latency measurement against a remote [`SpeedTester`].

use airgauge_common::error::SpeedTestError;
use airgauge_common::speed::{self, ServerInfo, SpeedReport, SpeedTester};
use tracing::{debug, info};

pub mod cloudflare;

pub use cloudflare::CloudflareSpeedTester;

pub struct SpeedTestService {
    tester: Box<dyn SpeedTester>,
}

impl SpeedTestService {
    pub fn new(tester: Box<dyn SpeedTester>) -> Self {
        Self { tester }
    }

    pub async fn select_server(&self) -> Result<ServerInfo, SpeedTestError> {
        let server = self.tester.select_server().await?;
        info!("selected server {} ({})", server.name, server.country);
        Ok(server)
    }

    /// Runs latency, download and upload against `server`, in that order.
    ///
    /// Throughput goes through [`speed::normalize_mbps`] before it is
    /// reported.
    pub async fn measure(&self, server: ServerInfo) -> Result<SpeedReport, SpeedTestError> {
        let latency = self.tester.measure_latency(&server).await?;
        debug!("latency {latency:?}");

        let download_mbps = speed::normalize_mbps(self.tester.download(&server).await?);
        debug!("download {download_mbps:.2} Mbps");

        let upload_mbps = speed::normalize_mbps(self.tester.upload(&server).await?);
        debug!("upload {upload_mbps:.2} Mbps");

        Ok(SpeedReport {
            server,
            download_mbps,
            upload_mbps,
            latency,
        })
    }

    pub async fn run(&self) -> Result<SpeedReport, SpeedTestError> {
        let server = self.select_server().await?;
        self.measure(server).await
    }
}
