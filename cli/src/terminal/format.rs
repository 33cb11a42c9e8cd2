use airgauge_common::speed::Grade;
use airgauge_common::wifi::QualityTier;
use colored::Color;

use crate::terminal::colors;

pub fn quality_color(tier: QualityTier) -> Color {
    match tier {
        QualityTier::Excellent => colors::SIGNAL_EXCELLENT,
        QualityTier::Good => colors::SIGNAL_GOOD,
        QualityTier::Fair => colors::SIGNAL_FAIR,
        QualityTier::Poor => colors::SIGNAL_POOR,
        QualityTier::VeryPoor => colors::SIGNAL_VERY_POOR,
    }
}

pub fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::Excellent => colors::SIGNAL_EXCELLENT,
        Grade::Good => colors::SIGNAL_GOOD,
        Grade::Fair => colors::SIGNAL_FAIR,
        Grade::Poor => colors::SIGNAL_POOR,
    }
}
