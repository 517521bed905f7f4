//! The `quizdrill run` command: the interactive session loop.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;

use quizdrill_core::model::{Question, QuestionKind, Selection};
use quizdrill_core::session::{Phase, QuizSession, TROUBLESHOOTING};
use quizdrill_core::summary::SessionReport;
use quizdrill_core::views;
use quizdrill_sources::{load_config_from, source_for};
use quizdrill_store::ProgressStore;

pub async fn execute(
    bank: Option<String>,
    config_path: Option<PathBuf>,
    export: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let location = bank.unwrap_or_else(|| config.bank_url.clone());

    let source = source_for(&location, config.timeout_secs);
    let store = ProgressStore::open(&config.data_dir);
    let mut session = QuizSession::new(source, Box::new(store));

    println!("Loading question bank from {location} ...");
    session.load().await;

    // Error panel with retry, until the attempt ceiling.
    while session.phase() == Phase::Errored {
        println!("{}", session.error_message().unwrap_or_default());
        if !session.can_retry() {
            println!("\n{TROUBLESHOOTING}");
            return Ok(());
        }
        match read_line("Retry loading? [y/N] ")? {
            Some(input) if input.eq_ignore_ascii_case("y") => session.retry_load().await,
            _ => return Ok(()),
        }
    }

    if !session.storage_available() {
        println!("Note: storage is unavailable, progress will not be saved this session.");
    }
    if session.position() > 0 || !session.answers().is_empty() {
        println!(
            "Resuming: {} of {} answered, score {}.",
            session.answers().len(),
            session.questions().len(),
            session.score()
        );
    }
    println!(
        "Answer with option numbers (`2`, or `1,3` for multiple answers). \
         Commands: n(ext), p(rev), q(uit).\n"
    );

    loop {
        if session.is_complete() {
            break;
        }
        let Some(question) = session.current_question() else {
            break;
        };

        let kind = question.kind;
        let option_count = question.options.len();
        let answered = session.answers().contains_key(&question.id);
        print_question(&session, question, answered);

        let Some(input) = read_line("> ")? else {
            break; // stdin closed
        };

        match input.as_str() {
            "" => continue,
            "q" | "quit" => break,
            "n" | "next" => session.advance(),
            "p" | "prev" => session.retreat(),
            _ => {
                if answered {
                    println!("Already answered. Use n/p to move between questions.\n");
                    continue;
                }
                let Some(selection) = parse_selection(&input, kind) else {
                    println!("Could not read that. Enter option numbers like `2` or `1,3`.\n");
                    continue;
                };
                if selection_out_of_range(&selection, option_count) {
                    println!("Pick options between 1 and {option_count}.\n");
                    continue;
                }
                match session.answer_current(selection) {
                    Some(true) => println!("Correct!"),
                    Some(false) => println!("Incorrect."),
                    None => continue,
                }
                print_feedback(&session);
                session.advance();
            }
        }
    }

    print_summary(&session);

    if let Some(path) = export {
        SessionReport::from_session(&session).save_json(&path)?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn print_question(session: &QuizSession, question: &Question, answered: bool) {
    let total = session.questions().len();
    let progress = views::progress_percent(session.position(), total);
    println!(
        "Question {}/{} [{}] ({:.0}%)",
        session.position() + 1,
        total,
        question.category,
        progress
    );
    println!("{}", question.text);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }
    if question.kind == QuestionKind::Multiple {
        println!("  (select all that apply)");
    }
    if answered {
        println!("  (already answered)");
    }
}

/// After an answer is recorded, show the correct option(s) and the
/// explanation if the question carries one.
fn print_feedback(session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let expected: Vec<&str> = question.correct.values().iter().map(String::as_str).collect();
    println!("Answer: {}", expected.join(", "));
    if let Some(explanation) = &question.explanation {
        println!("{explanation}");
    }
    println!();
}

fn print_summary(session: &QuizSession) {
    use comfy_table::Table;

    let total = session.questions().len();
    println!("\nSession summary");
    println!(
        "Score: {}/{} ({} answered{})",
        session.score(),
        total,
        session.answers().len(),
        if session.is_complete() { ", complete" } else { "" }
    );

    let mut stats: Vec<_> = views::category_stats(session.questions(), session.answers())
        .into_values()
        .collect();
    stats.sort_by(|a, b| a.category.cmp(&b.category));

    let mut table = Table::new();
    table.set_header(vec!["Category", "Total", "Answered", "Correct", "Accuracy"]);
    for s in &stats {
        table.add_row(vec![
            s.category.clone(),
            s.total.to_string(),
            s.answered.to_string(),
            s.correct.to_string(),
            format!("{:.0}%", s.accuracy_percent()),
        ]);
    }
    println!("{table}");

    let wrong = views::wrong_answers(session.questions(), session.answers());
    if !wrong.is_empty() {
        println!("\nReview:");
        for w in &wrong {
            println!(
                "  {} (you picked {}, correct: {})",
                w.text,
                w.given.join(", "),
                w.expected.join(", ")
            );
            if let Some(explanation) = &w.explanation {
                println!("    {explanation}");
            }
        }
    }

    let open = views::unanswered(session.questions(), session.answers());
    if !open.is_empty() {
        println!("\n{} question(s) left unanswered.", open.len());
    }
}

/// Parse `2` or `1,3` (1-based) into a selection matching the question
/// kind.
fn parse_selection(input: &str, kind: QuestionKind) -> Option<Selection> {
    let numbers = input
        .split(',')
        .map(|p| p.trim().parse::<usize>().ok())
        .collect::<Option<Vec<usize>>>()?;
    if numbers.is_empty() || numbers.iter().any(|&n| n == 0) {
        return None;
    }
    let mut indices = numbers.into_iter().map(|n| n - 1);
    match kind {
        QuestionKind::Single => {
            let first = indices.next()?;
            if indices.next().is_some() {
                return None;
            }
            Some(Selection::One(first))
        }
        QuestionKind::Multiple => Some(Selection::many(indices)),
    }
}

fn selection_out_of_range(selection: &Selection, option_count: usize) -> bool {
    match selection {
        Selection::One(idx) => *idx >= option_count,
        Selection::Many(indices) => indices.iter().any(|&idx| idx >= option_count),
    }
}

fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut buf = String::new();
    let read = std::io::stdin().read_line(&mut buf)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
