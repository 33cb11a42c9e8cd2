//! Internet throughput and latency model.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::SpeedTestError;

/// Throughput above this is not believable for a consumer link.
pub const PLAUSIBLE_MAX_MBPS: f64 = 10_000.0;
const BITS_PER_MEGABIT: f64 = 1_000_000.0;

/// Server a speed test ran against.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub name: String,
    pub country: String,
    pub sponsor: String,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReport {
    pub server: ServerInfo,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub latency: Duration,
}

impl SpeedReport {
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_micros() as f64 / 1_000.0
    }
}

/// A remote throughput measurement service.
#[async_trait]
pub trait SpeedTester: Send + Sync {
    async fn select_server(&self) -> Result<ServerInfo, SpeedTestError>;
    async fn measure_latency(&self, server: &ServerInfo) -> Result<Duration, SpeedTestError>;
    /// Download throughput in Mbps.
    async fn download(&self, server: &ServerInfo) -> Result<f64, SpeedTestError>;
    /// Upload throughput in Mbps.
    async fn upload(&self, server: &ServerInfo) -> Result<f64, SpeedTestError>;
}

/// Guards against throughput reported in bits per second instead of Mbps.
///
/// Anything above [`PLAUSIBLE_MAX_MBPS`] is assumed to be in bits per second
/// and scaled down. This is a heuristic, not a unit conversion: the real fix
/// belongs with whatever reported the value.
pub fn normalize_mbps(reported: f64) -> f64 {
    if reported > PLAUSIBLE_MAX_MBPS {
        let scaled = reported / BITS_PER_MEGABIT;
        warn!("implausible throughput {reported:.0}, treating it as bit/s ({scaled:.2} Mbps)");
        scaled
    } else {
        reported
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        };
        f.write_str(label)
    }
}

/// A grade together with what the connection is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub grade: Grade,
    pub suited_for: &'static str,
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.grade, self.suited_for)
    }
}

const fn assessment(grade: Grade, suited_for: &'static str) -> Assessment {
    Assessment { grade, suited_for }
}

pub fn assess_download(mbps: f64) -> Assessment {
    match mbps {
        m if m >= 100.0 => assessment(Grade::Excellent, "4K streaming, large downloads"),
        m if m >= 25.0 => assessment(Grade::Good, "HD streaming, video calls"),
        m if m >= 5.0 => assessment(Grade::Fair, "SD streaming, web browsing"),
        _ => assessment(Grade::Poor, "basic web browsing"),
    }
}

pub fn assess_upload(mbps: f64) -> Assessment {
    match mbps {
        m if m >= 20.0 => assessment(Grade::Excellent, "video uploads, live streaming"),
        m if m >= 5.0 => assessment(Grade::Good, "video calls, file uploads"),
        m if m >= 1.0 => assessment(Grade::Fair, "photo uploads, email"),
        _ => assessment(Grade::Poor, "basic web tasks"),
    }
}

pub fn assess_latency(ms: f64) -> Assessment {
    match ms {
        m if m < 20.0 => assessment(Grade::Excellent, "competitive gaming"),
        m if m < 50.0 => assessment(Grade::Good, "online gaming, video calls"),
        m if m < 100.0 => assessment(Grade::Fair, "web browsing, streaming"),
        _ => assessment(Grade::Poor, "may experience lag"),
    }
}
