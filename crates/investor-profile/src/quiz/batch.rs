//! Batch replay of recorded questionnaire responses.
//!
//! Consumes a CSV export of `respondent_id,question_id,answer_id` rows,
//! groups the rows into one response set per respondent, and replays each
//! set through the classifier. Useful for validating a dataset revision
//! against a corpus of historical submissions before rollout.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::ClassifierEngine;
use super::domain::{AnswerId, ArchetypeId, Confidence, QuestionId, ResponseSet};

#[derive(Debug)]
pub enum ResponseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ResponseImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseImportError::Io(err) => write!(f, "failed to read response log: {}", err),
            ResponseImportError::Csv(err) => write!(f, "invalid response log data: {}", err),
        }
    }
}

impl std::error::Error for ResponseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponseImportError::Io(err) => Some(err),
            ResponseImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ResponseImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ResponseImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One respondent's recorded answers, rebuilt from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondentResponses {
    pub respondent_id: String,
    pub responses: ResponseSet,
}

pub struct ResponseLogImporter;

impl ResponseLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RespondentResponses>, ResponseImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse and group the log. Respondents come back in first-seen order;
    /// when a respondent answers the same question twice the first row wins,
    /// matching how the quiz UI records a locked-in answer.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RespondentResponses>, ResponseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut order: Vec<String> = Vec::new();
        let mut grouped: BTreeMap<String, ResponseSet> = BTreeMap::new();

        for record in csv_reader.deserialize::<ResponseRow>() {
            let row = record?;
            if row.respondent_id.is_empty() || row.question_id.is_empty() {
                continue;
            }

            let responses = grouped.entry(row.respondent_id.clone()).or_insert_with(|| {
                order.push(row.respondent_id.clone());
                ResponseSet::new()
            });

            let question = QuestionId(row.question_id);
            if responses.answer_for(&question).is_none() {
                responses.insert(question, AnswerId(row.answer_id));
            }
        }

        Ok(order
            .into_iter()
            .map(|respondent_id| {
                let responses = grouped
                    .remove(&respondent_id)
                    .unwrap_or_default();
                RespondentResponses {
                    respondent_id,
                    responses,
                }
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct ResponseRow {
    respondent_id: String,
    question_id: String,
    #[serde(default)]
    answer_id: String,
}

/// Replay every recorded respondent through the engine and tally the
/// outcomes.
pub fn replay_all(engine: &ClassifierEngine, respondents: &[RespondentResponses]) -> BatchSummary {
    let mut primary_counts: Vec<PrimaryCount> = engine
        .dataset()
        .archetypes()
        .iter()
        .map(|archetype| PrimaryCount {
            archetype: archetype.id.clone(),
            name: archetype.name.clone(),
            count: 0,
        })
        .collect();
    let mut confidence = ConfidenceDistribution::default();

    for respondent in respondents {
        let outcome = engine.evaluate(&respondent.responses);

        if let Some(entry) = primary_counts
            .iter_mut()
            .find(|entry| entry.archetype == outcome.primary.id)
        {
            entry.count += 1;
        }

        match outcome.confidence {
            Confidence::Low => confidence.low += 1,
            Confidence::Medium => confidence.medium += 1,
            Confidence::High => confidence.high += 1,
        }
    }

    BatchSummary {
        total_respondents: respondents.len(),
        primary_counts,
        confidence,
    }
}

/// Aggregate view over one replay run. Primary counts stay in archetype
/// declaration order so repeated runs are comparable line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total_respondents: usize,
    pub primary_counts: Vec<PrimaryCount>,
    pub confidence: ConfidenceDistribution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryCount {
    pub archetype: ArchetypeId,
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}
