use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::listings::repository::{KondoRepository, RepositoryError};
use crate::listings::KondoQualityService;
use crate::quality::{
    KondoId, KondoRecord, MediaRecord, MediaStatus, MediaType, QualityAssessment, QualityConfig,
};

pub(super) fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Two core, one secondary and two other attributes: content score 0.27.
pub(super) fn sparse_kondo() -> KondoRecord {
    KondoRecord::new()
        .with("name", "Reserva do Vale")
        .with("type", "lots")
        .with("city", "Nova Lima")
        .with("active", true)
        .with("slug", "reserva-do-vale")
}

/// Every core and secondary attribute plus enough extras to cap content at 1.0.
pub(super) fn rich_kondo() -> KondoRecord {
    let mut kondo = sparse_kondo()
        .with("status", "launch")
        .with("description", "Condomínio fechado com lagoa")
        .with("minutes_from_bh", 35)
        .with("cep", "34000-000")
        .with("address_street", "Estrada do Vale, 100")
        .with("address_neighborhood", "Vale dos Pinhais");
    for field in crate::quality::content::OTHER_FIELDS {
        kondo.set(field, true);
    }
    kondo
}

pub(super) fn final_media(count: usize) -> Vec<MediaRecord> {
    (0..count)
        .map(|index| {
            let media_type = if index % 2 == 0 {
                MediaType::Image
            } else {
                MediaType::Video
            };
            MediaRecord::new(media_type, MediaStatus::Final)
        })
        .collect()
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    kondos: Mutex<HashMap<KondoId, KondoRecord>>,
    media: Mutex<HashMap<KondoId, Vec<MediaRecord>>>,
    assessments: Mutex<HashMap<KondoId, QualityAssessment>>,
}

impl MemoryRepository {
    pub(super) fn with_kondo(
        self,
        id: KondoId,
        kondo: KondoRecord,
        media: Vec<MediaRecord>,
    ) -> Self {
        self.kondos.lock().expect("kondo mutex").insert(id, kondo);
        self.media.lock().expect("media mutex").insert(id, media);
        self
    }

    pub(super) fn stored(&self, id: KondoId) -> Option<QualityAssessment> {
        self.assessments
            .lock()
            .expect("assessment mutex")
            .get(&id)
            .cloned()
    }
}

impl KondoRepository for MemoryRepository {
    fn fetch_kondo(&self, id: KondoId) -> Result<Option<KondoRecord>, RepositoryError> {
        Ok(self.kondos.lock().expect("kondo mutex").get(&id).cloned())
    }

    fn media_for(&self, id: KondoId) -> Result<Vec<MediaRecord>, RepositoryError> {
        Ok(self
            .media
            .lock()
            .expect("media mutex")
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    fn store_assessment(&self, assessment: QualityAssessment) -> Result<(), RepositoryError> {
        self.assessments
            .lock()
            .expect("assessment mutex")
            .insert(assessment.kondo_id, assessment);
        Ok(())
    }

    fn latest_assessment(
        &self,
        id: KondoId,
    ) -> Result<Option<QualityAssessment>, RepositoryError> {
        Ok(self.stored(id))
    }
}

pub(super) struct UnavailableRepository;

impl KondoRepository for UnavailableRepository {
    fn fetch_kondo(&self, _id: KondoId) -> Result<Option<KondoRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn media_for(&self, _id: KondoId) -> Result<Vec<MediaRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn store_assessment(&self, _assessment: QualityAssessment) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_assessment(
        &self,
        _id: KondoId,
    ) -> Result<Option<QualityAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    repository: MemoryRepository,
) -> (Arc<KondoQualityService<MemoryRepository>>, Arc<MemoryRepository>) {
    let repository = Arc::new(repository);
    let service = Arc::new(KondoQualityService::new(
        repository.clone(),
        QualityConfig::default(),
    ));
    (service, repository)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
