//! [`SpeedTester`] against Cloudflare's public speed test endpoints.
//!
//! * `GET /__down?bytes=N` streams `N` bytes and carries `cf-meta-*` headers
//!   describing the serving location.
//! * `POST /__up` accepts an arbitrary body.

use std::time::{Duration, Instant};

use airgauge_common::error::{SpeedTestError, SpeedTestStep};
use airgauge_common::speed::{ServerInfo, SpeedTester};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;

const BASE_URL: &str = "https://speed.cloudflare.com";
const SPONSOR: &str = "Cloudflare";
const DOWNLOAD_BYTES: usize = 25_000_000;
const UPLOAD_BYTES: usize = 10_000_000;
const LATENCY_SAMPLES: usize = 5;

pub struct CloudflareSpeedTester {
    client: Client,
    base_url: String,
}

impl CloudflareSpeedTester {
    pub fn new(timeout: Duration) -> Result<Self, SpeedTestError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("airgauge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpeedTestError::upstream(SpeedTestStep::ServerSelection, e))?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    fn down_url(&self, bytes: usize) -> String {
        format!("{}/__down?bytes={bytes}", self.base_url)
    }

    /// Downloads `bytes` bytes, returning the byte count and elapsed time.
    async fn timed_download(
        &self,
        bytes: usize,
        step: SpeedTestStep,
    ) -> Result<(usize, Duration), SpeedTestError> {
        let start = Instant::now();
        let body = self
            .client
            .get(self.down_url(bytes))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SpeedTestError::upstream(step, e))?
            .bytes()
            .await
            .map_err(|e| SpeedTestError::upstream(step, e))?;
        Ok((body.len(), start.elapsed()))
    }
}

#[async_trait]
impl SpeedTester for CloudflareSpeedTester {
    async fn select_server(&self) -> Result<ServerInfo, SpeedTestError> {
        let step = SpeedTestStep::ServerSelection;
        let response = self
            .client
            .get(self.down_url(0))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SpeedTestError::upstream(step, e))?;

        server_from_headers(response.headers()).ok_or(SpeedTestError::NoServers)
    }

    async fn measure_latency(&self, _server: &ServerInfo) -> Result<Duration, SpeedTestError> {
        let mut samples = Vec::with_capacity(LATENCY_SAMPLES);
        for _ in 0..LATENCY_SAMPLES {
            let (_, elapsed) = self.timed_download(0, SpeedTestStep::Latency).await?;
            samples.push(elapsed);
        }
        median(&mut samples).ok_or_else(|| {
            SpeedTestError::upstream(SpeedTestStep::Latency, "no latency samples collected")
        })
    }

    async fn download(&self, _server: &ServerInfo) -> Result<f64, SpeedTestError> {
        let (bytes, elapsed) = self
            .timed_download(DOWNLOAD_BYTES, SpeedTestStep::Download)
            .await?;
        Ok(throughput_mbps(bytes, elapsed))
    }

    async fn upload(&self, _server: &ServerInfo) -> Result<f64, SpeedTestError> {
        let step = SpeedTestStep::Upload;
        let payload = vec![0u8; UPLOAD_BYTES];

        let start = Instant::now();
        self.client
            .post(format!("{}/__up", self.base_url))
            .body(payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SpeedTestError::upstream(step, e))?;

        Ok(throughput_mbps(UPLOAD_BYTES, start.elapsed()))
    }
}

fn server_from_headers(headers: &HeaderMap) -> Option<ServerInfo> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    let colo = header("cf-meta-colo")?;
    let name = match header("cf-meta-city") {
        Some(city) => format!("{city} [{colo}]"),
        None => colo,
    };

    Some(ServerInfo {
        name,
        country: header("cf-meta-country").unwrap_or_else(|| "unknown".to_string()),
        sponsor: SPONSOR.to_string(),
        distance_km: None,
    })
}

fn throughput_mbps(bytes: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    (bytes as f64 * 8.0) / secs / 1_000_000.0
}

fn median(samples: &mut [Duration]) -> Option<Duration> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable();
    Some(samples[samples.len() / 2])
}
