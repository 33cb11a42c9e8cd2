use std::collections::HashSet;

use super::signal::{self, QualityTier};

/// Label shown for networks that do not advertise a name.
pub const HIDDEN_LABEL: &str = "[Hidden Network]";

/// One access point observed during a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    /// Network name, or a MAC-like token when the name is absent.
    pub identifier: String,
    pub is_hidden: bool,
    /// Only set when the source reports it directly.
    pub hardware_address: Option<String>,
    pub signal_percent: u8,
    pub signal_dbm: i32,
    pub quality: QualityTier,
    /// Currently associated network.
    pub in_use: bool,
    pub bars: Option<String>,
    pub channel: Option<u16>,
    pub security: Option<String>,
    pub vendor: Option<String>,
}

impl NetworkEntry {
    /// Builds an entry from a percentage reported by the source.
    pub fn from_percent(identifier: impl Into<String>, percent: i32) -> Self {
        let signal_percent = signal::clamp_percent(percent);
        Self::with_signal(
            identifier.into(),
            signal_percent,
            signal::percent_to_dbm(percent),
        )
    }

    /// Builds an entry from a signal power reported by the source.
    pub fn from_dbm(identifier: impl Into<String>, power_dbm: i32) -> Self {
        Self::with_signal(identifier.into(), signal::dbm_to_percent(power_dbm), power_dbm)
    }

    fn with_signal(identifier: String, signal_percent: u8, signal_dbm: i32) -> Self {
        let is_hidden = identifier.is_empty();
        let identifier = if is_hidden {
            HIDDEN_LABEL.to_string()
        } else {
            identifier
        };

        Self {
            identifier,
            is_hidden,
            hardware_address: None,
            signal_percent,
            signal_dbm,
            quality: signal::classify(i32::from(signal_percent)),
            in_use: false,
            bars: None,
            channel: None,
            security: None,
            vendor: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn with_hardware_address(mut self, address: impl Into<String>) -> Self {
        self.hardware_address = Some(address.into());
        self
    }

    pub fn with_bars(mut self, bars: impl Into<String>) -> Self {
        self.bars = Some(bars.into());
        self
    }

    pub fn in_use(mut self, in_use: bool) -> Self {
        self.in_use = in_use;
        self
    }

    /// Name to print: the fixed label for hidden networks.
    pub fn display_name(&self) -> &str {
        if self.is_hidden {
            HIDDEN_LABEL
        } else {
            &self.identifier
        }
    }

    /// Bars reported by the source, or the glyph for the quality tier.
    pub fn display_bars(&self) -> &str {
        self.bars.as_deref().unwrap_or(self.quality.bars())
    }
}

/// Heuristic for names that are really a hardware address.
///
/// Matches anything containing `:` or exactly 12 hexadecimal characters.
/// A real SSID made of 12 hex characters is misclassified as hidden.
pub fn looks_like_hardware_address(name: &str) -> bool {
    name.contains(':') || (name.len() == 12 && name.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Collapses entries sharing an identifier, keeping the first one seen.
pub fn dedup_by_identifier(entries: Vec<NetworkEntry>) -> Vec<NetworkEntry> {
    let mut seen: HashSet<String> = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.identifier.clone()))
        .collect()
}

/// Strongest first. Stable, so ties keep discovery order.
pub fn sort_by_signal(entries: &mut [NetworkEntry]) {
    entries.sort_by(|a, b| b.signal_percent.cmp(&a.signal_percent));
}
