//! Wireless network model shared by every scan source.
//!
//! * [`signal`]: percent/dBm conversions and quality tiers.
//! * [`network`]: the [`NetworkEntry`] record and reconciliation helpers.
//! * [`parse`]: decoder for the `nmcli` text layouts.

pub mod network;
pub mod parse;
pub mod signal;

pub use network::{HIDDEN_LABEL, NetworkEntry};
pub use signal::QualityTier;
