use std::collections::BTreeMap;

use super::Dataset;
use crate::quiz::domain::{
    Answer, AnswerId, Archetype, ArchetypeId, EligibilityThresholds, Question, QuestionId,
    QuestionKind,
};

/// The built-in investor questionnaire. Archetype declaration order doubles
/// as the tie-break of last resort, so Guardian (the most conservative
/// profile) deliberately comes first.
pub(super) fn standard_dataset() -> Dataset {
    Dataset::from_parts(
        "2025.1".to_string(),
        standard_archetypes(),
        standard_questions(),
        standard_weights(),
        EligibilityThresholds::default(),
        vec![
            QuestionId("drawdown".to_string()),
            QuestionId("goal".to_string()),
            QuestionId("horizon".to_string()),
        ],
    )
}

fn standard_archetypes() -> Vec<Archetype> {
    vec![
        archetype(
            "guardian",
            "Guardian",
            "Prioritizes preserving capital over growing it and avoids drawdowns at almost any cost.",
        ),
        archetype(
            "planner",
            "Planner",
            "Invests toward concrete goals on a schedule, trading some upside for predictability.",
        ),
        archetype(
            "explorer",
            "Explorer",
            "Comfortable with market swings and open to newer asset classes in a diversified core.",
        ),
        archetype(
            "pioneer",
            "Pioneer",
            "Seeks maximum long-run growth and accepts deep, prolonged drawdowns to get it.",
        ),
    ]
}

fn standard_questions() -> Vec<Question> {
    vec![
        question(
            "horizon",
            "When do you expect to need most of this money?",
            &[
                ("horizon_short", "Within the next three years"),
                ("horizon_mid", "In three to ten years"),
                ("horizon_long", "Not for at least ten years"),
            ],
        ),
        question(
            "drawdown",
            "Your portfolio drops 20% in a month. What do you do?",
            &[
                ("drawdown_sell", "Sell to stop further losses"),
                ("drawdown_hold", "Hold and wait for a recovery"),
                ("drawdown_buy", "Buy more while prices are down"),
            ],
        ),
        question(
            "experience",
            "How much investing experience do you have?",
            &[
                ("experience_none", "None, this is my first portfolio"),
                ("experience_some", "A few years of funds or stocks"),
                ("experience_seasoned", "A decade or more, across market cycles"),
            ],
        ),
        question(
            "income",
            "How would you describe your income?",
            &[
                ("income_variable", "Irregular or uncertain"),
                ("income_stable", "Stable and covers my expenses"),
                ("income_surplus", "Stable with a large investable surplus"),
            ],
        ),
        question(
            "goal",
            "What best describes your goal for this portfolio?",
            &[
                ("goal_preserve", "Keep what I have safe"),
                ("goal_income", "Generate reliable income"),
                ("goal_grow", "Grow it ahead of inflation"),
                ("goal_maximize", "Maximize long-term growth"),
            ],
        ),
        question(
            "allocation",
            "Which mix would you feel best holding?",
            &[
                ("mix_defensive", "Mostly bonds and cash"),
                ("mix_balanced", "Roughly half stocks, half bonds"),
                ("mix_equity", "Nearly all stocks"),
            ],
        ),
    ]
}

fn standard_weights() -> BTreeMap<AnswerId, BTreeMap<ArchetypeId, i32>> {
    let rows: &[(&str, &[(&str, i32)])] = &[
        ("horizon_short", &[("guardian", 3), ("planner", 1)]),
        ("horizon_mid", &[("planner", 2), ("explorer", 1)]),
        ("horizon_long", &[("explorer", 2), ("pioneer", 2)]),
        ("drawdown_sell", &[("guardian", 3)]),
        ("drawdown_hold", &[("planner", 2), ("explorer", 1)]),
        ("drawdown_buy", &[("pioneer", 3), ("explorer", 1)]),
        ("experience_none", &[("guardian", 1), ("planner", 1)]),
        ("experience_some", &[("explorer", 2)]),
        ("experience_seasoned", &[("pioneer", 2), ("explorer", 1)]),
        ("income_variable", &[("guardian", 2)]),
        ("income_stable", &[("planner", 2)]),
        ("income_surplus", &[("pioneer", 2), ("explorer", 1)]),
        ("goal_preserve", &[("guardian", 3), ("pioneer", -1)]),
        ("goal_income", &[("planner", 3)]),
        ("goal_grow", &[("explorer", 3)]),
        ("goal_maximize", &[("pioneer", 3), ("guardian", -1)]),
        ("mix_defensive", &[("guardian", 2), ("planner", 1)]),
        ("mix_balanced", &[("planner", 1), ("explorer", 2)]),
        ("mix_equity", &[("pioneer", 2), ("explorer", 1)]),
    ];

    rows.iter()
        .map(|(answer, cells)| {
            let row = cells
                .iter()
                .map(|(archetype, delta)| (ArchetypeId((*archetype).to_string()), *delta))
                .collect();
            (AnswerId((*answer).to_string()), row)
        })
        .collect()
}

fn archetype(id: &str, name: &str, description: &str) -> Archetype {
    Archetype {
        id: ArchetypeId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn question(id: &str, label: &str, answers: &[(&str, &str)]) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        label: label.to_string(),
        kind: QuestionKind::SingleChoice,
        answers: answers
            .iter()
            .map(|(answer_id, text)| Answer {
                id: AnswerId((*answer_id).to_string()),
                text: (*text).to_string(),
            })
            .collect(),
    }
}
