use std::collections::BTreeMap;

use serde::Deserialize;

use crate::quiz::domain::{
    AnswerId, Archetype, ArchetypeId, EligibilityThresholds, Question, QuestionId,
};

/// On-disk shape of a rule dataset. Structural validation happens in
/// `Dataset::from_schema`; this layer only decodes JSON.
#[derive(Debug, Deserialize)]
pub(super) struct DatasetFile {
    #[serde(default = "unversioned")]
    pub(super) version: String,
    pub(super) archetypes: Vec<Archetype>,
    #[serde(default)]
    pub(super) questions: Vec<Question>,
    #[serde(default)]
    pub(super) weights: BTreeMap<AnswerId, BTreeMap<ArchetypeId, i32>>,
    #[serde(default)]
    pub(super) thresholds: Option<EligibilityThresholds>,
    #[serde(default)]
    pub(super) tie_break_order: Vec<QuestionId>,
}

fn unversioned() -> String {
    "unversioned".to_string()
}
