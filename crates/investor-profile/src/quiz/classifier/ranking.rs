use std::collections::BTreeMap;

use crate::quiz::dataset::Dataset;
use crate::quiz::domain::{ArchetypeId, RankedArchetype, ResponseSet};

/// Build the base ranking: all declared archetypes ordered by score
/// descending, ties broken by declaration index ascending.
///
/// The entries are laid out in declaration order first and then stable-sorted
/// by score, so equal scores keep their declaration order. This ranking is
/// the single source of truth for "who is ahead of whom" downstream; it never
/// depends on map or hash iteration order.
pub fn base_ranking(dataset: &Dataset, scores: &BTreeMap<ArchetypeId, i32>) -> Vec<RankedArchetype> {
    let mut ranking: Vec<RankedArchetype> = dataset
        .archetypes()
        .iter()
        .map(|archetype| RankedArchetype {
            archetype: archetype.id.clone(),
            score: scores.get(&archetype.id).copied().unwrap_or(0),
        })
        .collect();

    ranking.sort_by(|a, b| b.score.cmp(&a.score));
    ranking
}

/// Select the primary archetype from the base ranking.
///
/// When several archetypes share the top score, the dataset's fixed tie-break
/// question sequence is walked in order: unanswered questions are skipped,
/// and for answered ones the tied set narrows to the candidates whose weight
/// under that answer is maximal. If the cascade ends with more than one
/// candidate, the earliest-declared one wins. The tie-break only ever
/// disambiguates within the top-scoring group; it cannot promote a
/// lower-scoring archetype.
pub fn resolve_primary(
    dataset: &Dataset,
    ranking: &[RankedArchetype],
    responses: &ResponseSet,
) -> ArchetypeId {
    let top_score = ranking[0].score;
    let mut tied: Vec<&ArchetypeId> = ranking
        .iter()
        .take_while(|entry| entry.score == top_score)
        .map(|entry| &entry.archetype)
        .collect();

    if tied.len() == 1 {
        return tied[0].clone();
    }

    for question in dataset.tie_break_order() {
        let Some(answer) = responses.answer_for(question) else {
            continue;
        };

        let best = tied
            .iter()
            .map(|candidate| dataset.weight(answer, candidate))
            .max()
            .unwrap_or(0);
        tied = tied
            .into_iter()
            .filter(|candidate| dataset.weight(answer, candidate) == best)
            .collect();

        if tied.len() == 1 {
            break;
        }
    }

    // The tied set preserves base-ranking order, which for equal scores is
    // declaration order, so the first remaining candidate is the
    // earliest-declared one.
    tied[0].clone()
}
