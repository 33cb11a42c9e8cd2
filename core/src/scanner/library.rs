//! Scan source backed by the `wifiscanner` library.
//!
//! The library reports a name and a signal power per access point, but no
//! hardware address. Hidden networks show up with an address-like name, which
//! is detected with [`looks_like_hardware_address`].

use std::sync::Arc;
use std::time::Duration;

use airgauge_common::error::ScanError;
use airgauge_common::scanning::WifiScanner;
use airgauge_common::wifi::NetworkEntry;
use airgauge_common::wifi::network::{dedup_by_identifier, looks_like_hardware_address};
use async_trait::async_trait;
use tracing::trace;

const SOURCE_NAME: &str = "wifiscanner";

/// Raw access point as returned by a scanning library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPointRecord {
    pub name: String,
    /// Signal power in dBm, as text (e.g. `-67` or `-67.00 dBm`).
    pub signal_level: String,
}

/// Blocking call into a scanning library.
pub trait AccessPointSource: Send + Sync + 'static {
    fn scan(&self) -> Result<Vec<AccessPointRecord>, String>;
}

pub struct WifiscannerSource;

impl AccessPointSource for WifiscannerSource {
    fn scan(&self) -> Result<Vec<AccessPointRecord>, String> {
        let networks = wifiscanner::scan().map_err(|e| format!("{e:?}"))?;
        Ok(networks
            .into_iter()
            .map(|wifi| AccessPointRecord {
                name: wifi.ssid,
                signal_level: wifi.signal_level,
            })
            .collect())
    }
}

pub struct LibraryScanner<S: AccessPointSource = WifiscannerSource> {
    source: Arc<S>,
    timeout: Duration,
}

impl LibraryScanner {
    pub fn new(timeout: Duration) -> Self {
        Self::with_source(WifiscannerSource, timeout)
    }
}

impl<S: AccessPointSource> LibraryScanner<S> {
    pub fn with_source(source: S, timeout: Duration) -> Self {
        Self {
            source: Arc::new(source),
            timeout,
        }
    }
}

#[async_trait]
impl<S: AccessPointSource> WifiScanner for LibraryScanner<S> {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
        let source = Arc::clone(&self.source);
        let call = tokio::task::spawn_blocking(move || source.scan());

        let records = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ScanError::TimedOut {
                source_name: SOURCE_NAME.to_string(),
                after: self.timeout,
            })?
            .map_err(|e| ScanError::LibraryFailed(e.to_string()))?
            .map_err(ScanError::LibraryFailed)?;

        Ok(entries_from_records(records))
    }
}

/// Converts library records, dropping unreadable ones and duplicate names.
pub fn entries_from_records(records: Vec<AccessPointRecord>) -> Vec<NetworkEntry> {
    let entries: Vec<NetworkEntry> = records.into_iter().filter_map(to_entry).collect();
    dedup_by_identifier(entries)
}

fn to_entry(record: AccessPointRecord) -> Option<NetworkEntry> {
    let Some(power_dbm) = parse_power(&record.signal_level) else {
        trace!("skipping {:?}: unreadable signal {:?}", record.name, record.signal_level);
        return None;
    };

    let name = record.name.trim();
    let entry = NetworkEntry::from_dbm(name, power_dbm);
    if looks_like_hardware_address(name) {
        Some(entry.hidden())
    } else {
        Some(entry)
    }
}

fn parse_power(raw: &str) -> Option<i32> {
    let value: f64 = raw.split_whitespace().next()?.parse().ok()?;
    value.is_finite().then(|| value.round() as i32)
}
