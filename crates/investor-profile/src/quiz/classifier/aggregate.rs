use std::collections::BTreeMap;

use crate::quiz::dataset::Dataset;
use crate::quiz::domain::{ArchetypeId, ResponseSet};

/// Sum the weighted contributions of `responses` into one score per declared
/// archetype.
///
/// Every declared archetype starts at zero, so the returned map always covers
/// the full roster even when no response touches it. Answers without a weight
/// row, including unknown answer ids, contribute nothing. Integer addition is
/// commutative and associative, so iteration order cannot affect the totals.
pub fn aggregate_scores(dataset: &Dataset, responses: &ResponseSet) -> BTreeMap<ArchetypeId, i32> {
    let mut scores: BTreeMap<ArchetypeId, i32> = dataset
        .archetypes()
        .iter()
        .map(|archetype| (archetype.id.clone(), 0))
        .collect();

    for (_question, answer) in responses.iter() {
        let Some(row) = dataset.weight_row(answer) else {
            continue;
        };
        for (archetype, delta) in row {
            if let Some(total) = scores.get_mut(archetype) {
                *total += delta;
            }
        }
    }

    scores
}
