use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, Confidence, ProfileOutcome, ResponseSet};

/// Snapshot of one completed assessment. The raw responses are retained
/// alongside the outcome so any stored result can be re-derived and audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub assessment_id: AssessmentId,
    pub responses: ResponseSet,
    pub outcome: ProfileOutcome,
    pub evaluated_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn result_view(&self) -> AssessmentView {
        AssessmentView {
            assessment_id: self.assessment_id.clone(),
            dataset_version: self.outcome.dataset_version.clone(),
            primary: self.outcome.primary.clone(),
            secondary: self.outcome.secondary.clone(),
            confidence: self.outcome.confidence,
            confidence_label: self.outcome.confidence.label(),
            evaluated_at: self.evaluated_at,
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
/// Durable persistence is an external collaborator; adapters live with their
/// hosts.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a stored assessment for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub assessment_id: AssessmentId,
    pub dataset_version: String,
    pub primary: super::domain::ArchetypeAssignment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<super::domain::ArchetypeAssignment>,
    pub confidence: Confidence,
    pub confidence_label: &'static str,
    pub evaluated_at: DateTime<Utc>,
}
