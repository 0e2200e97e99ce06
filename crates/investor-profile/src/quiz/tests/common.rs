use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::quiz::classifier::ClassifierEngine;
use crate::quiz::dataset::Dataset;
use crate::quiz::domain::{AnswerId, AssessmentId, QuestionId, ResponseSet};
use crate::quiz::repository::{AssessmentRecord, AssessmentRepository, RepositoryError};
use crate::quiz::router::assessment_router;
use crate::quiz::service::AssessmentService;

/// Three-archetype fixture. `steady` and `surge` trade the lead depending on
/// the answers; `idle` never earns a point, which keeps the declaration-order
/// fallback observable.
pub(super) fn fixture_json() -> &'static str {
    r#"{
        "version": "fixture-1",
        "archetypes": [
            {"id": "steady", "name": "Steady", "description": "Keeps a measured pace."},
            {"id": "surge", "name": "Surge", "description": "Chases momentum."},
            {"id": "idle", "name": "Idle", "description": "Stays in cash."}
        ],
        "questions": [
            {"id": "q1", "label": "First question", "kind": "single_choice", "answers": [
                {"id": "x1", "text": "Answer x1"},
                {"id": "y1", "text": "Answer y1"}
            ]},
            {"id": "q2", "label": "Second question", "kind": "single_choice", "answers": [
                {"id": "x2", "text": "Answer x2"},
                {"id": "y2", "text": "Answer y2"}
            ]},
            {"id": "q3", "label": "Third question", "kind": "single_choice", "answers": [
                {"id": "z1", "text": "Answer z1"}
            ]}
        ],
        "weights": {
            "x1": {"steady": 3, "surge": 1},
            "x2": {"surge": 3, "steady": 1},
            "z1": {"idle": 9}
        },
        "tie_break_order": ["q3", "q1", "q2"]
    }"#
}

pub(super) fn fixture() -> Dataset {
    Dataset::from_json(fixture_json()).expect("fixture dataset is valid")
}

pub(super) fn fixture_engine() -> ClassifierEngine {
    ClassifierEngine::new(Arc::new(fixture()))
}

pub(super) fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
    pairs
        .iter()
        .map(|(question, answer)| {
            (
                QuestionId((*question).to_string()),
                AnswerId((*answer).to_string()),
            )
        })
        .collect()
}

pub(super) fn archetype_id(raw: &str) -> crate::quiz::domain::ArchetypeId {
    crate::quiz::domain::ArchetypeId(raw.to_string())
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(Arc::new(fixture()), repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(
    service: AssessmentService<MemoryRepository>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, AssessmentRecord>>>,
}

impl AssessmentRepository for MemoryRepository {
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

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
