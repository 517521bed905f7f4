//! Core data model types for quizdrill.
//!
//! These are the fundamental types that the entire quizdrill system uses
//! to represent questions, answer selections, and persisted progress.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, stable across sessions.
    pub id: String,
    /// Free-text grouping label used for per-category accuracy.
    #[serde(default)]
    pub category: String,
    /// Whether one or several options are correct.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// The prompt shown to the user.
    pub text: String,
    /// Ordered list of option strings. Never empty.
    pub options: Vec<String>,
    /// The correct option(s). Every string must appear in `options`.
    pub correct: CorrectAnswer,
    /// Optional explanation shown after answering.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Optional illustrative image reference.
    #[serde(default)]
    pub image: Option<String>,
}

/// Whether a question accepts one (`single`) or several (`multiple`)
/// correct options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multiple,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Single => write!(f, "single"),
            QuestionKind::Multiple => write!(f, "multiple"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(QuestionKind::Single),
            "multiple" | "multi" => Ok(QuestionKind::Multiple),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

/// The correct answer on the wire: a bare option string for `single`
/// questions, a set of option strings for `multiple`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

impl CorrectAnswer {
    /// All correct option strings, regardless of shape.
    pub fn values(&self) -> &[String] {
        match self {
            CorrectAnswer::One(s) => std::slice::from_ref(s),
            CorrectAnswer::Many(v) => v.as_slice(),
        }
    }
}

impl Question {
    /// Indices of the correct option(s) within `options`.
    ///
    /// Strings not present in `options` are skipped; the parser rejects
    /// such questions before they reach a session.
    pub fn correct_indices(&self) -> BTreeSet<usize> {
        self.correct
            .values()
            .iter()
            .filter_map(|c| self.options.iter().position(|o| o == c))
            .collect()
    }

    /// Grade a selection against this question.
    ///
    /// A `single` question is correct iff the supplied index equals the
    /// index of the correct string. A `multiple` question requires the
    /// supplied index set to exactly equal the correct set, with no extra
    /// and no missing selections (no partial credit). A selection whose
    /// shape does not match the question kind is incorrect.
    pub fn is_correct(&self, selection: &Selection) -> bool {
        match (self.kind, selection) {
            (QuestionKind::Single, Selection::One(idx)) => {
                self.correct_indices().into_iter().next() == Some(*idx)
            }
            (QuestionKind::Multiple, Selection::Many(indices)) => {
                !indices.is_empty() && *indices == self.correct_indices()
            }
            _ => false,
        }
    }
}

/// A full question bank as loaded from a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// The ordered question sequence.
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The user's recorded answer to one question: an option index for
/// `single` questions, a set of indices for `multiple`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    One(usize),
    Many(BTreeSet<usize>),
}

impl Selection {
    /// Convenience constructor for multiple-choice selections.
    pub fn many<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Selection::Many(indices.into_iter().collect())
    }
}

/// The durable progress snapshot, written after every state-mutating
/// transition and keyed by [`crate::session::PROGRESS_KEY`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProgress {
    /// Position within the question sequence at the time of the snapshot.
    pub current_question_index: usize,
    /// Recorded answers keyed by question id.
    #[serde(default)]
    pub answers: HashMap<String, Selection>,
    /// Score at the time of the snapshot. Advisory only: sessions always
    /// recompute the score from `answers` on restore.
    pub score: usize,
}
