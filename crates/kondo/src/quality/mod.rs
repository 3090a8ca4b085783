//! Kondo quality scoring.
//!
//! Content and media are analyzed independently into raw breakdowns, reduced to
//! clamped scores and combined into an overall score that gates publication.

mod config;
pub mod content;
mod domain;
pub mod media;
mod score;

pub use config::{
    validate, ContentWeights, MediaWeights, QualityConfig, QualityConfigError,
    CONTENT_ADDITIONAL_DETAILS_ENV, CONTENT_BASIC_INFO_ENV, CONTENT_CONVENIENCES_ENV,
    CONTENT_PRICING_ENV, DEFAULT_THRESHOLD, MEDIA_IMAGES_ENV, MEDIA_IMAGE_QUALITY_ENV,
    MEDIA_RECENCY_ENV, MEDIA_VIDEOS_ENV, THRESHOLD_ENV, WEIGHT_SUM_TOLERANCE,
};
pub use content::analyze_content_quality;
pub use domain::{
    ContentBreakdown, KondoId, KondoRecord, MediaBreakdown, MediaRecord, MediaStatus, MediaType,
    QualityAssessment, QualityBreakdown,
};
pub use media::analyze_media_quality;
pub use score::{assess, calculate_content_score, calculate_media_score, calculate_overall_score};

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Stateless scorer bound to one validated configuration.
#[derive(Debug, Clone)]
pub struct QualityEngine {
    config: Arc<QualityConfig>,
}

impl QualityEngine {
    pub fn new(config: QualityConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn assess(
        &self,
        kondo_id: KondoId,
        kondo: &KondoRecord,
        media: &[MediaRecord],
        now: DateTime<Utc>,
    ) -> QualityAssessment {
        let assessment = assess(kondo_id, kondo, media, &self.config, now);

        tracing::debug!(
            kondo_id = %kondo_id,
            content = assessment.content_quality,
            media = assessment.media_quality,
            overall = assessment.overall_quality,
            meets_threshold = assessment.meets_threshold,
            "kondo quality assessed"
        );

        assessment
    }
}

impl Default for QualityEngine {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}
