//! Investor-profile questionnaire: rule dataset, classification pipeline, and
//! the assessment service facade exposed over HTTP.

pub mod batch;
pub mod classifier;
pub mod dataset;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::ClassifierEngine;
pub use dataset::{Dataset, DatasetError};
pub use domain::{
    AnswerId, Archetype, ArchetypeAssignment, ArchetypeId, AssessmentId, Confidence,
    EligibilityThresholds, ProfileOutcome, Question, QuestionId, QuestionKind, RankedArchetype,
    ResponseSet,
};
pub use repository::{AssessmentRecord, AssessmentRepository, AssessmentView, RepositoryError};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError, QuestionnaireView};
