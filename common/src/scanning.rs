use async_trait::async_trait;

use crate::error::ScanError;
use crate::wifi::NetworkEntry;

/// A source of nearby wireless networks.
///
/// Implementations perform one foreign call per [`scan`](WifiScanner::scan)
/// and hand back complete results; they never retry on their own.
#[async_trait]
pub trait WifiScanner: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    async fn scan(&self) -> Result<Vec<NetworkEntry>, ScanError>;
}
