use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for questionnaire questions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Identifier wrapper for answer choices. Unique within a question; the
/// built-in dataset keeps them globally unique so weight rows stay unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub String);

/// Identifier wrapper for investor archetypes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArchetypeId(pub String);

/// Identifier wrapper for stored assessments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// A single questionnaire question with its ordered answer choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub label: String,
    pub kind: QuestionKind,
    pub answers: Vec<Answer>,
}

/// Supported question kinds. The engine only scores single-choice questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
}

/// One selectable answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
}

/// An investor archetype as declared by the dataset. Declaration order is
/// meaningful: it is the tie-break of last resort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub name: String,
    pub description: String,
}

/// Bounds governing whether a runner-up archetype may be reported as
/// secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityThresholds {
    pub min_score: i32,
    pub max_gap_from_primary: i32,
    pub min_gap_from_primary: i32,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            min_score: 3,
            max_gap_from_primary: 4,
            min_gap_from_primary: -1,
        }
    }
}

/// One respondent's submitted answers: a sparse `question -> answer` map.
/// Partial submissions are valid; unknown identifiers are tolerated and
/// contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<QuestionId, AnswerId>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question: QuestionId, answer: AnswerId) {
        self.0.insert(question, answer);
    }

    pub fn answer_for(&self, question: &QuestionId) -> Option<&AnswerId> {
        self.0.get(question)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerId)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(QuestionId, AnswerId)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerId)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One entry of the base ranking: an archetype with its aggregated score, in
/// `(score desc, declaration index asc)` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedArchetype {
    pub archetype: ArchetypeId,
    pub score: i32,
}

/// The archetype assignment reported for the primary or secondary slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchetypeAssignment {
    pub id: ArchetypeId,
    pub name: String,
    pub score: i32,
    pub description: String,
}

/// Coarse label for how decisively the primary separates from the runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const fn label(self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

/// Full classification result for one evaluation. Constructed fresh per call
/// and owned solely by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub dataset_version: String,
    pub scores: BTreeMap<ArchetypeId, i32>,
    pub ranking: Vec<RankedArchetype>,
    pub primary: ArchetypeAssignment,
    pub secondary: Option<ArchetypeAssignment>,
    pub confidence: Confidence,
}
