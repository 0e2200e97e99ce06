//! Rule dataset loading and validation.
//!
//! A dataset is parsed once, validated structurally, and then treated as
//! immutable. Every evaluation threads a reference to the loaded dataset
//! explicitly; there is no process-wide singleton, so multiple dataset
//! versions can coexist (migrations, A/B runs) and tests can inject fixtures.

mod builtin;
mod schema;

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use super::domain::{
    AnswerId, Archetype, ArchetypeId, EligibilityThresholds, Question, QuestionId,
};
use schema::DatasetFile;

/// Validated, immutable rule definition consumed by the classifier.
#[derive(Debug, Clone)]
pub struct Dataset {
    version: String,
    archetypes: Vec<Archetype>,
    questions: Vec<Question>,
    weights: BTreeMap<AnswerId, BTreeMap<ArchetypeId, i32>>,
    thresholds: EligibilityThresholds,
    tie_break_order: Vec<QuestionId>,
}

/// Load-time failure. Always fatal: a service must refuse to start on a
/// malformed dataset rather than degrade per request.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset declares no archetypes")]
    NoArchetypes,
    #[error("archetype '{0}' is declared more than once")]
    DuplicateArchetype(String),
    #[error("question '{0}' is declared more than once")]
    DuplicateQuestion(String),
    #[error("answer '{answer}' appears more than once in question '{question}'")]
    DuplicateAnswer { question: String, answer: String },
    #[error("tie-break sequence references unknown question '{0}'")]
    UnknownTieBreakQuestion(String),
}

impl Dataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_reader(reader)?;
        Self::from_schema(file)
    }

    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(raw)?;
        Self::from_schema(file)
    }

    /// The built-in investor questionnaire shipped with the engine.
    pub fn standard() -> Self {
        builtin::standard_dataset()
    }

    fn from_schema(file: DatasetFile) -> Result<Self, DatasetError> {
        if file.archetypes.is_empty() {
            return Err(DatasetError::NoArchetypes);
        }

        let mut declared_archetypes = BTreeSet::new();
        for archetype in &file.archetypes {
            if !declared_archetypes.insert(archetype.id.clone()) {
                return Err(DatasetError::DuplicateArchetype(archetype.id.0.clone()));
            }
        }

        let mut declared_questions = BTreeSet::new();
        for question in &file.questions {
            if !declared_questions.insert(question.id.clone()) {
                return Err(DatasetError::DuplicateQuestion(question.id.0.clone()));
            }
            let mut seen_answers = BTreeSet::new();
            for answer in &question.answers {
                if !seen_answers.insert(answer.id.clone()) {
                    return Err(DatasetError::DuplicateAnswer {
                        question: question.id.0.clone(),
                        answer: answer.id.0.clone(),
                    });
                }
            }
        }

        for question in &file.tie_break_order {
            if !declared_questions.contains(question) {
                return Err(DatasetError::UnknownTieBreakQuestion(question.0.clone()));
            }
        }

        // Weight cells naming undeclared archetypes are dropped rather than
        // rejected so an older engine tolerates a newer dataset. Rows keyed by
        // undeclared answer ids are kept: aggregation is weight-table-driven
        // and such rows are unreachable, not harmful.
        let weights = file
            .weights
            .into_iter()
            .map(|(answer, row)| {
                let row = row
                    .into_iter()
                    .filter(|(archetype, _)| declared_archetypes.contains(archetype))
                    .collect();
                (answer, row)
            })
            .collect();

        Ok(Self {
            version: file.version,
            archetypes: file.archetypes,
            questions: file.questions,
            weights,
            thresholds: file.thresholds.unwrap_or_default(),
            tie_break_order: file.tie_break_order,
        })
    }

    pub(crate) fn from_parts(
        version: String,
        archetypes: Vec<Archetype>,
        questions: Vec<Question>,
        weights: BTreeMap<AnswerId, BTreeMap<ArchetypeId, i32>>,
        thresholds: EligibilityThresholds,
        tie_break_order: Vec<QuestionId>,
    ) -> Self {
        Self {
            version,
            archetypes,
            questions,
            weights,
            thresholds,
            tie_break_order,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Archetypes in declaration order.
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn thresholds(&self) -> EligibilityThresholds {
        self.thresholds
    }

    pub fn tie_break_order(&self) -> &[QuestionId] {
        &self.tie_break_order
    }

    pub fn archetype(&self, id: &ArchetypeId) -> Option<&Archetype> {
        self.archetypes.iter().find(|archetype| &archetype.id == id)
    }

    /// Delta the given answer contributes to the given archetype; zero when
    /// the weight table has no entry.
    pub fn weight(&self, answer: &AnswerId, archetype: &ArchetypeId) -> i32 {
        self.weights
            .get(answer)
            .and_then(|row| row.get(archetype))
            .copied()
            .unwrap_or(0)
    }

    pub fn weight_row(&self, answer: &AnswerId) -> Option<&BTreeMap<ArchetypeId, i32>> {
        self.weights.get(answer)
    }
}
