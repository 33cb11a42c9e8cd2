use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

/// A span that shows a spinner with `message` for as long as it is entered.
///
/// Use with [`tracing::Instrument`] so the spinner lives exactly as long as
/// the future it wraps.
pub fn span(message: &str) -> Span {
    let span = info_span!(target: PRINT_TARGET, "activity");
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&format!("{}", message.color(colors::TEXT_DEFAULT)));
    span
}
