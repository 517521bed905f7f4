//! The `quizdrill stats` command.
//!
//! Restores saved progress against the configured bank and prints the
//! breakdown without starting an interactive pass.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use quizdrill_core::session::{Phase, QuizSession};
use quizdrill_core::views;
use quizdrill_sources::{load_config_from, source_for};
use quizdrill_store::ProgressStore;

pub async fn execute(bank: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let location = bank.unwrap_or_else(|| config.bank_url.clone());

    let source = source_for(&location, config.timeout_secs);
    let store = ProgressStore::open(&config.data_dir);
    let mut session = QuizSession::new(source, Box::new(store));

    session.load().await;
    if session.phase() == Phase::Errored {
        anyhow::bail!(
            "{}",
            session
                .error_message()
                .unwrap_or_else(|| "loading failed".to_string())
        );
    }

    let total = session.questions().len();
    println!(
        "Progress: question {}/{}, {} answered, score {}",
        (session.position() + 1).min(total),
        total,
        session.answers().len(),
        session.score()
    );

    let mut stats: Vec<_> = views::category_stats(session.questions(), session.answers())
        .into_values()
        .collect();
    stats.sort_by(|a, b| a.category.cmp(&b.category));

    let mut table = Table::new();
    table.set_header(vec!["Category", "Total", "Answered", "Correct", "Incorrect", "Accuracy"]);
    for s in &stats {
        table.add_row(vec![
            s.category.clone(),
            s.total.to_string(),
            s.answered.to_string(),
            s.correct.to_string(),
            s.incorrect.to_string(),
            format!("{:.0}%", s.accuracy_percent()),
        ]);
    }
    println!("{table}");

    Ok(())
}
