use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::repository::{
    KondoRepository, PublicationStatus, QualityStatusView, RepositoryError,
};
use crate::quality::{
    KondoId, KondoRecord, MediaRecord, QualityAssessment, QualityConfig, QualityEngine,
};

/// Service composing the repository with the quality engine.
pub struct KondoQualityService<R> {
    repository: Arc<R>,
    engine: QualityEngine,
}

impl<R> KondoQualityService<R>
where
    R: KondoRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: QualityConfig) -> Self {
        Self {
            repository,
            engine: QualityEngine::new(config),
        }
    }

    pub fn config(&self) -> &QualityConfig {
        self.engine.config()
    }

    /// Score a stored Kondo against its current media and persist the result.
    pub fn recompute(
        &self,
        kondo_id: KondoId,
        now: DateTime<Utc>,
    ) -> Result<QualityAssessment, KondoQualityServiceError> {
        let kondo = self
            .repository
            .fetch_kondo(kondo_id)?
            .ok_or(RepositoryError::NotFound)?;
        let media = self.repository.media_for(kondo_id)?;

        let assessment = self.engine.assess(kondo_id, &kondo, &media, now);
        self.repository.store_assessment(assessment.clone())?;

        if !assessment.meets_threshold {
            tracing::info!(
                kondo_id = %kondo_id,
                overall = assessment.overall_quality,
                threshold = self.config().threshold(),
                status = PublicationStatus::from_assessment(&assessment).label(),
                "kondo below publication threshold"
            );
        }

        Ok(assessment)
    }

    /// Score caller-supplied data without touching the repository.
    pub fn assess_snapshot(
        &self,
        kondo_id: KondoId,
        kondo: &KondoRecord,
        media: &[MediaRecord],
        now: DateTime<Utc>,
    ) -> QualityAssessment {
        self.engine.assess(kondo_id, kondo, media, now)
    }

    pub fn latest(
        &self,
        kondo_id: KondoId,
    ) -> Result<QualityAssessment, KondoQualityServiceError> {
        let assessment = self
            .repository
            .latest_assessment(kondo_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    pub fn status(
        &self,
        kondo_id: KondoId,
    ) -> Result<QualityStatusView, KondoQualityServiceError> {
        let assessment = self.latest(kondo_id)?;
        Ok(QualityStatusView::new(&assessment, self.config().threshold()))
    }

    /// Whether the stored assessment clears the threshold; `None` when never assessed.
    pub fn publishable(
        &self,
        kondo_id: KondoId,
    ) -> Result<Option<bool>, KondoQualityServiceError> {
        let assessment = self.repository.latest_assessment(kondo_id)?;
        Ok(assessment.map(|assessment| assessment.meets_threshold))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KondoQualityServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
