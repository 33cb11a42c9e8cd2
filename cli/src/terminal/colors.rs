use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

// signal quality
pub const SIGNAL_EXCELLENT: Color = Color::BrightGreen;
pub const SIGNAL_GOOD: Color = Color::Green;
pub const SIGNAL_FAIR: Color = Color::Yellow;
pub const SIGNAL_POOR: Color = Color::BrightRed;
pub const SIGNAL_VERY_POOR: Color = Color::Red;
