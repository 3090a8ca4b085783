use kondo::listings::{KondoRepository, RepositoryError};
use kondo::quality::{KondoId, KondoRecord, MediaRecord, QualityAssessment};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
struct Snapshot {
    kondo: KondoRecord,
    media: Vec<MediaRecord>,
}

/// Process-local stand-in for the listing database.
#[derive(Default, Clone)]
pub(crate) struct InMemoryKondoRepository {
    snapshots: Arc<Mutex<HashMap<KondoId, Snapshot>>>,
    assessments: Arc<Mutex<HashMap<KondoId, QualityAssessment>>>,
}

impl InMemoryKondoRepository {
    /// Replaces the listing and media held for `id`; returns whether it already existed.
    pub(crate) fn upsert(
        &self,
        id: KondoId,
        kondo: KondoRecord,
        media: Vec<MediaRecord>,
    ) -> bool {
        let mut guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        guard.insert(id, Snapshot { kondo, media }).is_some()
    }
}

impl KondoRepository for InMemoryKondoRepository {
    fn fetch_kondo(&self, id: KondoId) -> Result<Option<KondoRecord>, RepositoryError> {
        let guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        Ok(guard.get(&id).map(|snapshot| snapshot.kondo.clone()))
    }

    fn media_for(&self, id: KondoId) -> Result<Vec<MediaRecord>, RepositoryError> {
        let guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        Ok(guard
            .get(&id)
            .map(|snapshot| snapshot.media.clone())
            .unwrap_or_default())
    }

    fn store_assessment(&self, assessment: QualityAssessment) -> Result<(), RepositoryError> {
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        guard.insert(assessment.kondo_id, assessment);
        Ok(())
    }

    fn latest_assessment(
        &self,
        id: KondoId,
    ) -> Result<Option<QualityAssessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}
