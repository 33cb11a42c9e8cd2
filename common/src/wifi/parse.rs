//! Decoder for single records of `nmcli device wifi list` output.
//!
//! Two layouts are understood:
//!
//! * [`OutputLayout::Table`]: the default whitespace table
//!   `[IN-USE] BSSID SSID MODE CHAN RATE SIGNAL BARS SECURITY`, where the SSID
//!   may contain spaces.
//! * [`OutputLayout::Terse`]: `nmcli -t -f SSID,SIGNAL,BARS`, colon separated,
//!   with `\:` escapes inside the SSID.
//!
//! A record that cannot be decoded is never an error. It produces
//! [`LineOutcome::Skip`] so a single drifting line cannot abort a scan.

use std::fmt;

use super::network::NetworkEntry;

/// Printed by the tool in place of an empty SSID.
pub const HIDDEN_PLACEHOLDER: &str = "--";

const IN_USE_MARKER: &str = "*";
const MIN_TABLE_FIELDS: usize = 7;
/// MODE, CHAN, RATE, SIGNAL, BARS, SECURITY
const TRAILING_FIXED_FIELDS: usize = 6;
const MODE_KEYWORDS: &[&str] = &["Infra", "Ad-Hoc", "Mesh"];
const BAR_GLYPHS: &[char] = &['▂', '▄', '▆', '█', '_', '*'];
const TERSE_FIELDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    #[default]
    Table,
    Terse,
}

impl OutputLayout {
    /// Whether the first line of output is a column header.
    pub fn has_header(&self) -> bool {
        matches!(self, Self::Table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields { found: usize, needed: usize },
    FieldCount { found: usize, expected: usize },
    NoSsidColumn,
    InvalidSignal(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found, needed } => {
                write!(f, "{found} fields, at least {needed} needed")
            }
            Self::FieldCount { found, expected } => {
                write!(f, "{found} fields, exactly {expected} expected")
            }
            Self::NoSsidColumn => f.write_str("no room for an SSID column"),
            Self::InvalidSignal(raw) => write!(f, "signal '{raw}' is not a number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Entry(NetworkEntry),
    Skip(SkipReason),
}

impl LineOutcome {
    pub fn entry(self) -> Option<NetworkEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Skip(_) => None,
        }
    }
}

pub fn parse_line(line: &str, layout: OutputLayout) -> LineOutcome {
    match layout {
        OutputLayout::Table => parse_table_line(line),
        OutputLayout::Terse => parse_terse_line(line),
    }
}

pub fn parse_table_line(line: &str) -> LineOutcome {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_TABLE_FIELDS {
        return LineOutcome::Skip(SkipReason::TooFewFields {
            found: fields.len(),
            needed: MIN_TABLE_FIELDS,
        });
    }

    let in_use = fields[0] == IN_USE_MARKER;
    let bssid_idx = usize::from(in_use);
    let ssid_start = bssid_idx + 1;

    // Bars and mode are searched from the right so SSID words never shadow them.
    let bars_idx = fields[ssid_start + 1..]
        .iter()
        .rposition(|field| is_bars(field))
        .map(|offset| ssid_start + 1 + offset);
    let signal_idx = match bars_idx {
        Some(idx) => idx - 1,
        None => fields.len() - 3,
    };

    // At least one SSID token precedes the mode, the signal follows it.
    let mode_idx = fields
        .get(ssid_start + 1..signal_idx)
        .and_then(|between| between.iter().rposition(|field| MODE_KEYWORDS.contains(field)))
        .map(|offset| ssid_start + 1 + offset);

    let ssid_end = match mode_idx {
        Some(idx) => idx,
        None => fields.len() - TRAILING_FIXED_FIELDS,
    };
    if ssid_end < ssid_start {
        return LineOutcome::Skip(SkipReason::NoSsidColumn);
    }

    let raw_signal = fields[signal_idx];
    let Ok(percent) = raw_signal.parse::<i32>() else {
        return LineOutcome::Skip(SkipReason::InvalidSignal(raw_signal.to_string()));
    };

    let bssid = fields[bssid_idx];
    let ssid = fields[ssid_start..ssid_end].join(" ");

    let mut entry = if ssid == HIDDEN_PLACEHOLDER || ssid.is_empty() {
        NetworkEntry::from_percent(bssid, percent).hidden()
    } else {
        NetworkEntry::from_percent(ssid, percent)
    }
    .with_hardware_address(bssid)
    .in_use(in_use);

    if let Some(idx) = bars_idx {
        entry.bars = Some(fields[idx].to_string());
        let security = fields[idx + 1..].join(" ");
        if !security.is_empty() && security != HIDDEN_PLACEHOLDER {
            entry.security = Some(security);
        }
    }
    if let Some(idx) = mode_idx {
        entry.channel = fields.get(idx + 1).and_then(|chan| chan.parse().ok());
    }

    LineOutcome::Entry(entry)
}

pub fn parse_terse_line(line: &str) -> LineOutcome {
    let fields = split_terse(line.trim_end());
    if fields.len() != TERSE_FIELDS {
        return LineOutcome::Skip(SkipReason::FieldCount {
            found: fields.len(),
            expected: TERSE_FIELDS,
        });
    }

    let raw_signal = fields[1].trim();
    let Ok(percent) = raw_signal.parse::<i32>() else {
        return LineOutcome::Skip(SkipReason::InvalidSignal(raw_signal.to_string()));
    };

    let ssid = if fields[0] == HIDDEN_PLACEHOLDER {
        ""
    } else {
        fields[0].as_str()
    };

    let mut entry = NetworkEntry::from_percent(ssid, percent);
    let bars = fields[2].trim();
    if !bars.is_empty() {
        entry.bars = Some(bars.to_string());
    }

    LineOutcome::Entry(entry)
}

fn is_bars(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| BAR_GLYPHS.contains(&c))
}

/// Splits on unescaped `:` and resolves `\` escapes.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
