use std::fmt;
use std::time::Duration;

/// Failures of the `scan` operation.
///
/// Only [`ScanError::AllSourcesExhausted`] and
/// [`ScanError::PermissionDenied`] ever reach the user directly. Every other
/// variant describes a single provider and only triggers the next one.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scanning requires root privileges")]
    PermissionDenied,

    #[error("{tool} not found in PATH")]
    ToolUnavailable { tool: String },

    #[error("{tool} failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("{source_name} did not answer within {}s", .after.as_secs())]
    TimedOut {
        source_name: String,
        after: Duration,
    },

    #[error("scanning library failed: {0}")]
    LibraryFailed(String),

    #[error("all scan methods failed")]
    AllSourcesExhausted(Vec<ProviderFailure>),
}

/// A provider that was tried and failed, in the order it was tried.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ScanError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Steps of a speed test, used to name the one that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTestStep {
    ServerSelection,
    Latency,
    Download,
    Upload,
}

impl fmt::Display for SpeedTestStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Self::ServerSelection => "fetching server information",
            Self::Latency => "measuring latency",
            Self::Download => "download test",
            Self::Upload => "upload test",
        };
        f.write_str(step)
    }
}

/// Failures of the upstream speed-test service. Always fatal for the command.
#[derive(Debug, thiserror::Error)]
pub enum SpeedTestError {
    #[error("error during {step}: {reason}")]
    Upstream { step: SpeedTestStep, reason: String },

    #[error("no servers available for testing")]
    NoServers,
}

impl SpeedTestError {
    pub fn upstream(step: SpeedTestStep, reason: impl ToString) -> Self {
        Self::Upstream {
            step,
            reason: reason.to_string(),
        }
    }
}
