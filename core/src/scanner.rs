//! # Wireless Scan Service
//!
//! Implements the "list nearby networks" use case.
//!
//! Scanning is delegated to an ordered list of [`WifiScanner`] providers. The
//! service tries them one after another until one succeeds, then reconciles
//! the result:
//! 1. **Deduplication**: one entry per identifier, first occurrence wins.
//! 2. **Ordering**: strongest signal first, ties keep discovery order.
//! 3. **Enrichment**: vendor lookup for entries that carry a hardware address.

use airgauge_common::config::{Config, ScanBackend};
use airgauge_common::error::{ProviderFailure, ScanError};
use airgauge_common::scanning::WifiScanner;
use airgauge_common::vendors::VendorRepository;
use airgauge_common::wifi::NetworkEntry;
use airgauge_common::wifi::network::{dedup_by_identifier, sort_by_signal};
use tracing::{debug, info};

use crate::vendors::MacOuiRepo;

pub mod library;
pub mod nmcli;

use library::LibraryScanner;
use nmcli::NmcliScanner;

/// Successful scan, plus the providers that failed before it.
#[derive(Debug)]
pub struct ScanReport {
    pub provider: &'static str,
    pub networks: Vec<NetworkEntry>,
    pub failures: Vec<ProviderFailure>,
}

pub struct ScanService {
    providers: Vec<Box<dyn WifiScanner>>,
    vendor_repo: Option<Box<dyn VendorRepository>>,
}

impl ScanService {
    pub fn new(providers: Vec<Box<dyn WifiScanner>>) -> Self {
        Self {
            providers,
            vendor_repo: None,
        }
    }

    pub fn with_vendor_repo(mut self, vendor_repo: Box<dyn VendorRepository>) -> Self {
        self.vendor_repo = Some(vendor_repo);
        self
    }

    /// Wires the concrete providers in the order requested by `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        let providers: Vec<Box<dyn WifiScanner>> = cfg
            .backends
            .iter()
            .map(|backend| -> Box<dyn WifiScanner> {
                match backend {
                    ScanBackend::Nmcli => Box::new(NmcliScanner::new(cfg.layout, cfg.scan_timeout)),
                    ScanBackend::Library => Box::new(LibraryScanner::new(cfg.scan_timeout)),
                }
            })
            .collect();

        let service = Self::new(providers);
        if cfg.no_vendor {
            service
        } else {
            service.with_vendor_repo(Box::new(MacOuiRepo))
        }
    }

    /// Tries every provider in order and reconciles the first success.
    pub async fn perform_scan(&self) -> Result<ScanReport, ScanError> {
        let mut failures: Vec<ProviderFailure> = Vec::new();

        for provider in &self.providers {
            debug!("scanning with {}", provider.name());
            match provider.scan().await {
                Ok(entries) => {
                    let mut networks = reconcile(entries);
                    self.enrich_vendors(&mut networks);
                    info!("{} reported {} networks", provider.name(), networks.len());
                    return Ok(ScanReport {
                        provider: provider.name(),
                        networks,
                        failures,
                    });
                }
                Err(error) => {
                    info!("{} scan failed: {error}", provider.name());
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        error,
                    });
                }
            }
        }

        Err(ScanError::AllSourcesExhausted(failures))
    }

    fn enrich_vendors(&self, networks: &mut [NetworkEntry]) {
        let Some(repo) = &self.vendor_repo else {
            return;
        };
        for network in networks.iter_mut() {
            if let Some(address) = &network.hardware_address {
                network.vendor = repo.get_vendor(address);
            }
        }
    }
}

/// Deduplicates, then sorts by descending signal.
pub fn reconcile(entries: Vec<NetworkEntry>) -> Vec<NetworkEntry> {
    let mut networks = dedup_by_identifier(entries);
    sort_by_signal(&mut networks);
    networks
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Fixed(&'static str, Vec<NetworkEntry>);

    #[async_trait]
    impl WifiScanner for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
            Ok(self.1.clone())
        }
    }

    struct Missing;

    #[async_trait]
    impl WifiScanner for Missing {
        fn name(&self) -> &'static str {
            "missing"
        }

        async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError> {
            Err(ScanError::ToolUnavailable {
                tool: "missing".into(),
            })
        }
    }

    struct StaticVendor;

    impl VendorRepository for StaticVendor {
        fn get_vendor(&self, _hardware_address: &str) -> Option<String> {
            Some("Acme".to_string())
        }
    }

    #[tokio::test]
    async fn first_success_wins() {
        let service = ScanService::new(vec![
            Box::new(Fixed("a", vec![NetworkEntry::from_percent("A", 10)])),
            Box::new(Fixed("b", vec![NetworkEntry::from_percent("B", 90)])),
        ]);
        let report = service.perform_scan().await.unwrap();
        assert_eq!(report.provider, "a");
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn failures_are_recorded_in_order() {
        let service = ScanService::new(vec![Box::new(Missing), Box::new(Missing)]);
        match service.perform_scan().await {
            Err(ScanError::AllSourcesExhausted(failures)) => assert_eq!(failures.len(), 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn vendors_only_for_hardware_addresses() {
        let service = ScanService::new(vec![Box::new(Fixed(
            "a",
            vec![
                NetworkEntry::from_percent("With", 50).with_hardware_address("00:11:22:33:44:55"),
                NetworkEntry::from_percent("Without", 40),
            ],
        ))])
        .with_vendor_repo(Box::new(StaticVendor));

        let report = service.perform_scan().await.unwrap();
        assert_eq!(report.networks[0].vendor.as_deref(), Some("Acme"));
        assert_eq!(report.networks[1].vendor, None);
    }

    #[test]
    fn reconcile_dedups_before_sorting() {
        let networks = reconcile(vec![
            NetworkEntry::from_percent("X", 30),
            NetworkEntry::from_percent("Y", 60),
            NetworkEntry::from_percent("X", 95),
        ]);
        let order: Vec<(&str, u8)> = networks
            .iter()
            .map(|n| (n.identifier.as_str(), n.signal_percent))
            .collect();
        assert_eq!(order, [("Y", 60), ("X", 30)]);
    }
}
