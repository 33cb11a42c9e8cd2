use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use airgauge_common::error::{ScanError, SpeedTestError, SpeedTestStep};
use airgauge_common::scanning::WifiScanner;
use airgauge_common::speed::{ServerInfo, SpeedTester};
use airgauge_common::wifi::NetworkEntry;
use airgauge_common::wifi::parse::OutputLayout;
use airgauge_core::scanner::library::{AccessPointRecord, AccessPointSource};
use airgauge_core::scanner::nmcli;
use async_trait::async_trait;

/// Table output as `nmcli -c no device wifi list` prints it.
pub const NMCLI_TABLE: &str = "\
IN-USE  BSSID              SSID          MODE   CHAN  RATE        SIGNAL  BARS  SECURITY
        AA:BB:CC:DD:EE:01  Library       Infra  6     54 Mbit/s   41      ▂▄__  WPA2
*       AA:BB:CC:DD:EE:02  Home Office   Infra  36    270 Mbit/s  88      ▂▄▆█  WPA3
        AA:BB:CC:DD:EE:03  --            Infra  1     54 Mbit/s   63      ▂▄▆_  WPA2
        AA:BB:CC:DD:EE:04  Library       Infra  11    54 Mbit/s   72      ▂▄▆_  WPA2
";

/// Names that contain or equal a mode keyword.
pub const NMCLI_KEYWORD_NAMES: &str = "\
IN-USE  BSSID              SSID          MODE   CHAN  RATE        SIGNAL  BARS  SECURITY
        AA:BB:CC:DD:EE:11  Home Mesh     Infra  11    130 Mbit/s  74      ▂▄▆_  WPA2
        AA:BB:CC:DD:EE:12  Home          Infra  6     54 Mbit/s   58      ▂▄__  WPA2
        AA:BB:CC:DD:EE:13  Mesh          Mesh   1     54 Mbit/s   35      ▂___  --
";

/// Stands in for `nmcli`: decodes canned output instead of running the tool.
pub struct CannedNmcli(pub &'static str);

#[async_trait]
impl WifiScanner for CannedNmcli {
    fn name(&self) -> &'static str {
        "nmcli"
    }

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
        nmcli::parse_output(self.0, OutputLayout::Table)
    }
}

/// `nmcli` missing from the machine.
pub struct AbsentNmcli;

#[async_trait]
impl WifiScanner for AbsentNmcli {
    fn name(&self) -> &'static str {
        "nmcli"
    }

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
        Err(ScanError::ToolUnavailable {
            tool: "nmcli".to_string(),
        })
    }
}

/// Succeeds without seeing any network.
pub struct SilentScanner;

#[async_trait]
impl WifiScanner for SilentScanner {
    fn name(&self) -> &'static str {
        "silent"
    }

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
        Ok(Vec::new())
    }
}

/// Library source with fixed records that counts how often it is called.
#[derive(Clone)]
pub struct FakeAirwaves {
    records: Vec<AccessPointRecord>,
    calls: Arc<AtomicUsize>,
    failure: Option<&'static str>,
}

impl FakeAirwaves {
    pub fn with(records: &[(&str, &str)]) -> Self {
        Self {
            records: records
                .iter()
                .map(|(name, signal_level)| AccessPointRecord {
                    name: name.to_string(),
                    signal_level: signal_level.to_string(),
                })
                .collect(),
            calls: Arc::new(AtomicUsize::new(0)),
            failure: None,
        }
    }

    pub fn broken(reason: &'static str) -> Self {
        Self {
            failure: Some(reason),
            ..Self::with(&[])
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl AccessPointSource for FakeAirwaves {
    fn scan(&self) -> Result<Vec<AccessPointRecord>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(reason) => Err(reason.to_string()),
            None => Ok(self.records.clone()),
        }
    }
}

pub struct FakeSpeedTester {
    fail_download: bool,
}

impl FakeSpeedTester {
    pub fn healthy() -> Self {
        Self {
            fail_download: false,
        }
    }

    pub fn failing_download() -> Self {
        Self {
            fail_download: true,
        }
    }
}

#[async_trait]
impl SpeedTester for FakeSpeedTester {
    async fn select_server(&self) -> Result<ServerInfo, SpeedTestError> {
        Ok(ServerInfo {
            name: "Amsterdam [AMS]".to_string(),
            country: "NL".to_string(),
            sponsor: "Fake Transit".to_string(),
            distance_km: Some(4.2),
        })
    }

    async fn measure_latency(&self, _server: &ServerInfo) -> Result<Duration, SpeedTestError> {
        Ok(Duration::from_millis(12))
    }

    async fn download(&self, _server: &ServerInfo) -> Result<f64, SpeedTestError> {
        if self.fail_download {
            return Err(SpeedTestError::upstream(
                SpeedTestStep::Download,
                "connection reset",
            ));
        }
        Ok(48_000_000.0)
    }

    async fn upload(&self, _server: &ServerInfo) -> Result<f64, SpeedTestError> {
        Ok(9.5)
    }
}
