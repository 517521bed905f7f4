//! Derived, side-effect-free views over session state.
//!
//! Everything here is a pure function of the question list and the answer
//! map; the presentation layer calls these after each transition instead
//! of keeping its own tallies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Question, Selection};
use crate::session::Phase;

/// Overall progress through the sequence as a percentage.
///
/// Counts the question currently on screen, so the first question of ten
/// reads 10%. 0 for an empty bank, clamped at 100 once complete.
pub fn progress_percent(position: usize, length: usize) -> f64 {
    if length == 0 {
        return 0.0;
    }
    ((position + 1).min(length) as f64) / (length as f64) * 100.0
}

/// Aggregate accuracy for one category label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    /// Questions carrying this label.
    pub total: usize,
    /// How many of them have a recorded answer.
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
}

impl CategoryStats {
    /// Accuracy over the answered questions in this category, as a
    /// percentage. 0 when nothing is answered yet.
    pub fn accuracy_percent(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f64 / self.answered as f64 * 100.0
        }
    }
}

/// Per-category breakdown of totals, answered counts, and accuracy.
pub fn category_stats(
    questions: &[Question],
    answers: &HashMap<String, Selection>,
) -> HashMap<String, CategoryStats> {
    let mut stats: HashMap<String, CategoryStats> = HashMap::new();

    for q in questions {
        let entry = stats
            .entry(q.category.clone())
            .or_insert_with(|| CategoryStats {
                category: q.category.clone(),
                total: 0,
                answered: 0,
                correct: 0,
                incorrect: 0,
            });
        entry.total += 1;

        if let Some(selection) = answers.get(&q.id) {
            entry.answered += 1;
            if q.is_correct(selection) {
                entry.correct += 1;
            } else {
                entry.incorrect += 1;
            }
        }
    }

    stats
}

/// Detail for one incorrectly answered question, for review screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question_id: String,
    pub text: String,
    pub category: String,
    /// Option strings the user picked.
    pub given: Vec<String>,
    /// The correct option strings.
    pub expected: Vec<String>,
    pub explanation: Option<String>,
}

/// All answered-but-incorrect questions, in bank order.
pub fn wrong_answers(
    questions: &[Question],
    answers: &HashMap<String, Selection>,
) -> Vec<WrongAnswer> {
    questions
        .iter()
        .filter_map(|q| {
            let selection = answers.get(&q.id)?;
            if q.is_correct(selection) {
                return None;
            }
            Some(WrongAnswer {
                question_id: q.id.clone(),
                text: q.text.clone(),
                category: q.category.clone(),
                given: selection_labels(q, selection),
                expected: q.correct.values().to_vec(),
                explanation: q.explanation.clone(),
            })
        })
        .collect()
}

/// Questions without a recorded answer, in bank order.
pub fn unanswered<'a>(
    questions: &'a [Question],
    answers: &HashMap<String, Selection>,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| !answers.contains_key(&q.id))
        .collect()
}

/// Resolve selected indices to option strings. An index that no longer
/// maps to an option (a bank edit between sessions) is shown positionally.
fn selection_labels(question: &Question, selection: &Selection) -> Vec<String> {
    let label = |idx: usize| {
        question
            .options
            .get(idx)
            .cloned()
            .unwrap_or_else(|| format!("option #{idx}"))
    };
    match selection {
        Selection::One(idx) => vec![label(*idx)],
        Selection::Many(indices) => indices.iter().copied().map(label).collect(),
    }
}

/// An owned snapshot of the observable session state, assembled by
/// [`crate::session::QuizSession::view`] for the presentation layer.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub phase: Phase,
    pub question_count: usize,
    pub position: usize,
    pub current_question: Option<Question>,
    pub score: usize,
    pub progress_percent: f64,
    pub loading: bool,
    pub error_message: Option<String>,
    pub retry_count: u32,
    pub can_retry: bool,
    pub complete: bool,
    pub storage_available: bool,
}
