use chrono::{DateTime, Utc};

use super::config::QualityConfig;
use super::content::analyze_content_quality;
use super::domain::{
    ContentBreakdown, KondoId, KondoRecord, MediaBreakdown, MediaRecord, QualityAssessment,
    QualityBreakdown,
};
use super::media::analyze_media_quality;

/// Unweighted sum of the content breakdown, clamped to `[0, 1]`.
pub fn calculate_content_score(breakdown: &ContentBreakdown, _config: &QualityConfig) -> f64 {
    breakdown.total().clamp(0.0, 1.0)
}

/// Unweighted sum of the media breakdown, clamped to `[0, 1]`.
pub fn calculate_media_score(breakdown: &MediaBreakdown, _config: &QualityConfig) -> f64 {
    breakdown.total().clamp(0.0, 1.0)
}

/// Additive combination sharing a single ceiling of 1.0.
pub fn calculate_overall_score(content_score: f64, media_score: f64) -> f64 {
    (content_score + media_score).min(1.0)
}

/// Runs the full scoring pipeline for one listing.
pub fn assess(
    kondo_id: KondoId,
    kondo: &KondoRecord,
    media: &[MediaRecord],
    config: &QualityConfig,
    now: DateTime<Utc>,
) -> QualityAssessment {
    let content = analyze_content_quality(kondo, config);
    let media = analyze_media_quality(kondo, media, config);

    let content_quality = calculate_content_score(&content, config);
    let media_quality = calculate_media_score(&media, config);
    let overall_quality = calculate_overall_score(content_quality, media_quality);

    QualityAssessment {
        kondo_id,
        content_quality,
        media_quality,
        overall_quality,
        meets_threshold: overall_quality >= config.threshold(),
        last_updated: now,
        breakdown: QualityBreakdown { content, media },
    }
}
