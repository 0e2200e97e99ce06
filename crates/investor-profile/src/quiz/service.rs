use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::classifier::ClassifierEngine;
use super::dataset::Dataset;
use super::domain::{Archetype, AssessmentId, Question, ResponseSet};
use super::repository::{AssessmentRecord, AssessmentRepository, RepositoryError};

/// Service composing the classifier engine with a repository so callers can
/// submit responses and retrieve stored assessments.
pub struct AssessmentService<R> {
    engine: ClassifierEngine,
    repository: Arc<R>,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asmt-{id:06}"))
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(dataset: Arc<Dataset>, repository: Arc<R>) -> Self {
        Self {
            engine: ClassifierEngine::new(dataset),
            repository,
        }
    }

    pub fn engine(&self) -> &ClassifierEngine {
        &self.engine
    }

    /// Evaluate one response set and snapshot the result. Degenerate input
    /// (empty or unknown identifiers) still evaluates; only storage can fail.
    pub fn submit(&self, responses: ResponseSet) -> Result<AssessmentRecord, AssessmentServiceError> {
        let outcome = self.engine.evaluate(&responses);
        let record = AssessmentRecord {
            assessment_id: next_assessment_id(),
            responses,
            outcome,
            evaluated_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Fetch a stored assessment for API responses.
    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Expose the questions and archetype roster for the quiz UI.
    pub fn questionnaire(&self) -> QuestionnaireView {
        let dataset = self.engine.dataset();
        QuestionnaireView {
            dataset_version: dataset.version().to_string(),
            questions: dataset.questions().to_vec(),
            archetypes: dataset.archetypes().to_vec(),
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Everything the quiz UI needs to render the questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub dataset_version: String,
    pub questions: Vec<Question>,
    pub archetypes: Vec<Archetype>,
}
