use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use investor_profile::error::AppError;
use investor_profile::quiz::batch::{replay_all, BatchSummary, ResponseLogImporter};
use investor_profile::quiz::domain::{AnswerId, QuestionId, ResponseSet};
use investor_profile::quiz::{AssessmentService, ClassifierEngine};

use crate::infra::{load_dataset, InMemoryAssessmentRepository};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Load a rule dataset from this JSON file instead of the built-in one
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the per-archetype score table for each respondent
    #[arg(long)]
    pub(crate) show_scores: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV log of recorded responses (respondent_id,question_id,answer_id)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Load a rule dataset from this JSON file instead of the built-in one
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        dataset,
        show_scores,
    } = args;

    let dataset = Arc::new(load_dataset(dataset.as_deref())?);
    println!(
        "Investor profile demo (dataset {}, {} archetypes, {} questions)",
        dataset.version(),
        dataset.archetypes().len(),
        dataset.questions().len()
    );

    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = AssessmentService::new(dataset, repository);

    for (label, respondent) in canned_respondents() {
        let record = service.submit(respondent)?;
        let outcome = &record.outcome;

        println!("\n{label} ({})", record.assessment_id.0);
        println!(
            "- primary: {} (score {}) | confidence {}",
            outcome.primary.name,
            outcome.primary.score,
            outcome.confidence.label()
        );
        match &outcome.secondary {
            Some(secondary) => {
                println!("- secondary: {} (score {})", secondary.name, secondary.score)
            }
            None => println!("- secondary: none"),
        }

        if show_scores {
            for entry in &outcome.ranking {
                println!("  {}: {}", entry.archetype.0, entry.score);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { input, dataset } = args;

    let dataset = Arc::new(load_dataset(dataset.as_deref())?);
    let respondents = ResponseLogImporter::from_path(&input)?;
    let engine = ClassifierEngine::new(dataset.clone());
    let summary = replay_all(&engine, &respondents);

    println!(
        "Replayed {} respondent(s) against dataset {}",
        summary.total_respondents,
        dataset.version()
    );
    render_summary(&summary);

    Ok(())
}

fn render_summary(summary: &BatchSummary) {
    println!("Primary archetypes:");
    for entry in &summary.primary_counts {
        println!("- {}: {}", entry.name, entry.count);
    }
    println!(
        "Confidence: {} low | {} medium | {} high",
        summary.confidence.low, summary.confidence.medium, summary.confidence.high
    );
}

fn canned_respondents() -> Vec<(&'static str, ResponseSet)> {
    vec![
        (
            "Cautious saver",
            responses(&[
                ("horizon", "horizon_short"),
                ("drawdown", "drawdown_sell"),
                ("experience", "experience_none"),
                ("income", "income_variable"),
                ("goal", "goal_preserve"),
                ("allocation", "mix_defensive"),
            ]),
        ),
        (
            "Goal-driven planner",
            responses(&[
                ("horizon", "horizon_mid"),
                ("drawdown", "drawdown_hold"),
                ("experience", "experience_some"),
                ("income", "income_stable"),
                ("goal", "goal_income"),
                ("allocation", "mix_balanced"),
            ]),
        ),
        (
            "Aggressive accumulator",
            responses(&[
                ("horizon", "horizon_long"),
                ("drawdown", "drawdown_buy"),
                ("experience", "experience_seasoned"),
                ("income", "income_surplus"),
                ("goal", "goal_maximize"),
                ("allocation", "mix_equity"),
            ]),
        ),
        (
            "Two answers in",
            responses(&[("horizon", "horizon_mid"), ("allocation", "mix_balanced")]),
        ),
    ]
}

fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
    pairs
        .iter()
        .map(|(question, answer)| {
            (
                QuestionId((*question).to_string()),
                AnswerId((*answer).to_string()),
            )
        })
        .collect()
}
