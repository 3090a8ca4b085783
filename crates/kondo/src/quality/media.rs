use super::config::QualityConfig;
use super::domain::{KondoRecord, MediaBreakdown, MediaRecord};

/// Credit per final media record.
pub const FINAL_MEDIA_INCREMENT: f64 = 0.09;

/// Accumulates the raw media breakdown for a listing.
///
/// Every final record credits `images` whatever its type; draft, unknown and missing
/// statuses contribute nothing. `quality`, `videos` and `recency` stay at zero.
pub fn analyze_media_quality(
    _kondo: &KondoRecord,
    media: &[MediaRecord],
    _config: &QualityConfig,
) -> MediaBreakdown {
    let mut breakdown = MediaBreakdown::default();

    for _ in media.iter().filter(|record| record.is_final()) {
        breakdown.images += FINAL_MEDIA_INCREMENT;
    }

    breakdown
}
