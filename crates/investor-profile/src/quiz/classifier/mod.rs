//! The classification pipeline: score aggregation, deterministic ranking with
//! tie-breaking, secondary selection, and confidence estimation.
//!
//! Every stage is a pure function over the loaded dataset and one response
//! set. Each stage builds a fresh value rather than mutating a shared
//! accumulator, so the pipeline can be tested stage by stage.

mod aggregate;
mod ranking;
mod selection;

pub use aggregate::aggregate_scores;
pub use ranking::{base_ranking, resolve_primary};
pub use selection::{confidence, runner_up, select_secondary};

use std::sync::Arc;

use super::dataset::Dataset;
use super::domain::{ArchetypeAssignment, ArchetypeId, ProfileOutcome, ResponseSet};

/// Stateless evaluator bound to one loaded dataset. Immutable after
/// construction and safe to share across concurrent callers without locking.
#[derive(Debug, Clone)]
pub struct ClassifierEngine {
    dataset: Arc<Dataset>,
}

impl ClassifierEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Classify one response set. Total and deterministic: every input,
    /// including an empty map or one full of unknown identifiers, produces a
    /// well-defined outcome.
    pub fn evaluate(&self, responses: &ResponseSet) -> ProfileOutcome {
        let dataset = &*self.dataset;
        let scores = aggregate_scores(dataset, responses);
        let ranking = base_ranking(dataset, &scores);
        let primary_id = resolve_primary(dataset, &ranking, responses);
        let primary_score = scores.get(&primary_id).copied().unwrap_or(0);

        let runner_up = runner_up(&ranking, &primary_id);
        let confidence = confidence(primary_score, runner_up.map(|entry| entry.score));
        let secondary = select_secondary(&ranking, &primary_id, primary_score, dataset.thresholds())
            .map(|entry| self.assignment(&entry.archetype, entry.score));

        let primary = self.assignment(&primary_id, primary_score);

        ProfileOutcome {
            dataset_version: dataset.version().to_string(),
            scores,
            ranking,
            primary,
            secondary,
            confidence,
        }
    }

    fn assignment(&self, id: &ArchetypeId, score: i32) -> ArchetypeAssignment {
        // Validation guarantees every ranked id was declared.
        let archetype = self
            .dataset
            .archetype(id)
            .unwrap_or_else(|| panic!("archetype '{}' missing from dataset", id.0));
        ArchetypeAssignment {
            id: archetype.id.clone(),
            name: archetype.name.clone(),
            score,
            description: archetype.description.clone(),
        }
    }
}
