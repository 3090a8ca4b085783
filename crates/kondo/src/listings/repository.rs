use serde::Serialize;

use crate::quality::{KondoId, KondoRecord, MediaRecord, QualityAssessment};

/// Storage abstraction so the service can be exercised without a database.
pub trait KondoRepository: Send + Sync {
    fn fetch_kondo(&self, id: KondoId) -> Result<Option<KondoRecord>, RepositoryError>;
    fn media_for(&self, id: KondoId) -> Result<Vec<MediaRecord>, RepositoryError>;
    fn store_assessment(&self, assessment: QualityAssessment) -> Result<(), RepositoryError>;
    fn latest_assessment(&self, id: KondoId)
        -> Result<Option<QualityAssessment>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Publishable,
    NeedsImprovement,
}

impl PublicationStatus {
    pub fn from_assessment(assessment: &QualityAssessment) -> Self {
        if assessment.meets_threshold {
            Self::Publishable
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PublicationStatus::Publishable => "publishable",
            PublicationStatus::NeedsImprovement => "needs_improvement",
        }
    }
}

/// Compact view of a stored assessment for listing dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct QualityStatusView {
    pub kondo_id: KondoId,
    pub status: PublicationStatus,
    pub overall_quality: f64,
    pub threshold: f64,
}

impl QualityStatusView {
    pub fn new(assessment: &QualityAssessment, threshold: f64) -> Self {
        Self {
            kondo_id: assessment.kondo_id,
            status: PublicationStatus::from_assessment(assessment),
            overall_quality: assessment.overall_quality,
            threshold,
        }
    }
}
