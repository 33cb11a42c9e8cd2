use std::time::Duration;

use crate::wifi::parse::OutputLayout;

pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_SPEEDTEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Scan sources that can be tried, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanBackend {
    /// The `nmcli` command line tool.
    Nmcli,
    /// The `wifiscanner` library.
    Library,
}

pub struct Config {
    /// Order in which scan sources are tried. The first success wins.
    pub backends: Vec<ScanBackend>,
    /// Layout requested from `nmcli`.
    pub layout: OutputLayout,
    /// Upper bound for a single scan source invocation.
    pub scan_timeout: Duration,
    /// Upper bound for each speed test request.
    pub speedtest_timeout: Duration,
    /// Disables manufacturer lookups for hardware addresses.
    pub no_vendor: bool,
    pub quiet: u8,
}

impl Config {
    /// Source order with `preferred` first and the others after it.
    pub fn backend_order(preferred: ScanBackend) -> Vec<ScanBackend> {
        let mut order = vec![ScanBackend::Nmcli, ScanBackend::Library];
        order.sort_by_key(|backend| *backend != preferred);
        order
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backends: Self::backend_order(ScanBackend::Nmcli),
            layout: OutputLayout::default(),
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
            speedtest_timeout: DEFAULT_SPEEDTEST_TIMEOUT,
            no_vendor: false,
            quiet: 0,
        }
    }
}
