//! Signal strength classification.
//!
//! Both conversions between percent and dBm are rough linear approximations
//! used for display only. They are not physical models and are not exact
//! inverses of each other.

use std::fmt;

/// Power at or above which a signal is reported as 100%.
const STRONGEST_DBM: i32 = -30;
/// Power at or below which a signal is reported as 0%.
const WEAKEST_DBM: i32 = -100;

/// Categorical bucket derived from a signal percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    /// Bars glyph used when the source does not report its own.
    pub fn bars(&self) -> &'static str {
        match self {
            Self::Excellent => "▂▄▆█",
            Self::Good => "▂▄▆_",
            Self::Fair => "▂▄__",
            Self::Poor => "▂___",
            Self::VeryPoor => "____",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clamps any integer into the `[0, 100]` percent range.
pub fn clamp_percent(percent: i32) -> u8 {
    percent.clamp(0, 100) as u8
}

/// Maps a signal percentage to its quality tier.
///
/// Total over `i32`: out of range input is clamped first.
pub fn classify(percent: i32) -> QualityTier {
    match clamp_percent(percent) {
        80..=u8::MAX => QualityTier::Excellent,
        60..=79 => QualityTier::Good,
        40..=59 => QualityTier::Fair,
        20..=39 => QualityTier::Poor,
        _ => QualityTier::VeryPoor,
    }
}

/// Converts signal power to an approximate percentage.
///
/// `-30 dBm` maps to 100%, `-100 dBm` (or less) to 0%, linear in between.
pub fn dbm_to_percent(power_dbm: i32) -> u8 {
    if power_dbm >= STRONGEST_DBM {
        return 100;
    }
    if power_dbm <= WEAKEST_DBM {
        return 0;
    }
    let span = (STRONGEST_DBM - WEAKEST_DBM) as f64;
    let percent = 100.0 - f64::from(power_dbm - STRONGEST_DBM) / -span * 100.0;
    clamp_percent(percent.round() as i32)
}

/// Converts a percentage to an approximate signal power.
///
/// 0% maps to `-100 dBm` and 100% to `-40 dBm`.
pub fn percent_to_dbm(percent: i32) -> i32 {
    WEAKEST_DBM + i32::from(clamp_percent(percent)) * 60 / 100
}
