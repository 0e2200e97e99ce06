use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use investor_profile::error::AppError;
use investor_profile::quiz::domain::AssessmentId;
use investor_profile::quiz::repository::{
    AssessmentRecord, AssessmentRepository, RepositoryError,
};
use investor_profile::quiz::Dataset;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the dataset named by the CLI/config, falling back to the built-in
/// questionnaire. A malformed file aborts startup.
pub(crate) fn load_dataset(path: Option<&Path>) -> Result<Dataset, AppError> {
    match path {
        Some(path) => Ok(Dataset::from_path(path)?),
        None => Ok(Dataset::standard()),
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.assessment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assessment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<AssessmentRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.evaluated_at.cmp(&a.evaluated_at));
        records.truncate(limit);
        Ok(records)
    }
}
