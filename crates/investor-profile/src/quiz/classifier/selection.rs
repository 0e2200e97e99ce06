use crate::quiz::domain::{ArchetypeId, Confidence, EligibilityThresholds, RankedArchetype};

const HIGH_CONFIDENCE_GAP: i32 = 5;
const MEDIUM_CONFIDENCE_GAP: i32 = 2;

/// The highest-ranked entry that is not the primary, by identity. Even when
/// other entries share the primary's score, only the primary itself is
/// excluded; the rest remain candidates.
pub fn runner_up<'a>(
    ranking: &'a [RankedArchetype],
    primary: &ArchetypeId,
) -> Option<&'a RankedArchetype> {
    ranking.iter().find(|entry| &entry.archetype != primary)
}

/// Pick the secondary archetype, if the runner-up clears the eligibility
/// thresholds.
///
/// The base-ranking invariant guarantees `gap >= 0` on every reachable path,
/// so the `min_gap_from_primary` lower bound (negative in the shipped
/// configuration) is currently inert. It is checked anyway so a future
/// non-monotonic selection rule cannot silently bypass it.
pub fn select_secondary(
    ranking: &[RankedArchetype],
    primary: &ArchetypeId,
    primary_score: i32,
    thresholds: EligibilityThresholds,
) -> Option<RankedArchetype> {
    let candidate = runner_up(ranking, primary)?;
    let gap = primary_score - candidate.score;

    let eligible = candidate.score >= thresholds.min_score
        && gap <= thresholds.max_gap_from_primary
        && gap >= thresholds.min_gap_from_primary;

    eligible.then(|| candidate.clone())
}

/// Coarse confidence label from the raw separation between the primary and
/// the runner-up, independent of whether the runner-up was eligible as
/// secondary. An uncontested primary is always `High`.
pub fn confidence(primary_score: i32, runner_up_score: Option<i32>) -> Confidence {
    let Some(runner_up_score) = runner_up_score else {
        return Confidence::High;
    };

    let gap = primary_score - runner_up_score;
    if gap >= HIGH_CONFIDENCE_GAP {
        Confidence::High
    } else if gap >= MEDIUM_CONFIDENCE_GAP {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}
