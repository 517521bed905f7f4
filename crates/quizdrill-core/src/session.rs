//! The quiz session state machine.
//!
//! Owns the ordered question sequence, current position, recorded answers,
//! and load/error state, and persists a progress snapshot after every
//! state-mutating transition. The presentation layer drives it through the
//! operations here and observes it through [`QuizSession::view`] and the
//! derived queries in [`crate::views`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LoadError;
use crate::model::{PersistedProgress, Question, Selection};
use crate::traits::{QuestionSource, SnapshotStore};
use crate::views::{self, SessionView};

/// Fixed storage key for the progress snapshot.
pub const PROGRESS_KEY: &str = "quizdrill.progress";

/// How many load attempts are honored before retry is refused and
/// troubleshooting guidance is shown instead.
pub const MAX_LOAD_ATTEMPTS: u32 = 3;

/// Guidance shown once the retry ceiling is reached.
pub const TROUBLESHOOTING: &str = "Loading keeps failing. Check that the question bank \
location is correct, that you are online (or point quizdrill at a local file), and that \
the document is valid JSON with a top-level `questions` array.";

/// Session lifecycle phase. Completion is derived: the session is complete
/// when it is `Ready` and the position has reached the question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no load attempted yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// Questions are loaded and answerable.
    Ready,
    /// The last load attempt failed; `error` holds the classification.
    Errored,
}

/// A single-user quiz session.
pub struct QuizSession {
    source: Arc<dyn QuestionSource>,
    store: Box<dyn SnapshotStore>,
    questions: Vec<Question>,
    position: usize,
    answers: HashMap<String, Selection>,
    score: usize,
    phase: Phase,
    loading: bool,
    error: Option<LoadError>,
    retry_count: u32,
}

impl QuizSession {
    pub fn new(source: Arc<dyn QuestionSource>, store: Box<dyn SnapshotStore>) -> Self {
        Self {
            source,
            store,
            questions: Vec::new(),
            position: 0,
            answers: HashMap::new(),
            score: 0,
            phase: Phase::Idle,
            loading: false,
            error: None,
            retry_count: 0,
        }
    }

    /// Fetch the question bank from the source.
    ///
    /// At most one load is honored at a time: a call while another is
    /// outstanding is a no-op. On success the error state clears, the
    /// retry counter resets, and any persisted snapshot is restored. On
    /// failure the retry counter increments and the classified error is
    /// kept as observable data.
    pub async fn load(&mut self) {
        if self.loading {
            tracing::debug!("load already in flight, ignoring");
            return;
        }
        self.loading = true;
        self.phase = Phase::Loading;
        tracing::info!(source = %self.source.describe(), "loading question bank");

        let source = Arc::clone(&self.source);
        match source.fetch().await {
            Ok(bank) => {
                self.questions = bank.questions;
                self.error = None;
                self.retry_count = 0;
                self.phase = Phase::Ready;
                tracing::info!(count = self.questions.len(), "question bank loaded");
                self.restore_snapshot();
            }
            Err(e) => {
                self.retry_count += 1;
                tracing::warn!(attempt = self.retry_count, error = %e, "load failed");
                self.error = Some(e);
                self.phase = Phase::Errored;
            }
        }

        self.loading = false;
    }

    /// Re-invoke the loader after a failure. A no-op unless the session is
    /// `Errored` and the attempt ceiling has not been reached.
    pub async fn retry_load(&mut self) {
        if self.phase != Phase::Errored {
            tracing::debug!("retry requested outside of error state, ignoring");
            return;
        }
        if !self.can_retry() {
            tracing::warn!(
                attempts = self.retry_count,
                "retry ceiling reached, refusing further attempts"
            );
            return;
        }
        self.load().await;
    }

    /// Record an answer for the current question.
    ///
    /// Returns `Some(correct)` when the answer was recorded, or `None`
    /// when there is no current question or it was already answered in
    /// this pass.
    pub fn answer_current(&mut self, selection: Selection) -> Option<bool> {
        let question = self.current_question()?;
        let id = question.id.clone();
        if self.answers.contains_key(&id) {
            tracing::debug!(question = %id, "already answered, ignoring");
            return None;
        }
        let correct = question.is_correct(&selection);

        self.answers.insert(id, selection);
        self.recompute_score();
        self.persist();
        Some(correct)
    }

    /// Move one question forward, clamped at the question count. Reaching
    /// the count signals completion.
    pub fn advance(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.position = (self.position + 1).min(self.questions.len());
        self.persist();
    }

    /// Move one question back, clamped at 0.
    pub fn retreat(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.position = self.position.saturating_sub(1);
        self.persist();
    }

    /// Wipe all progress: position, answers, score, error state, and the
    /// persisted snapshot.
    pub fn reset(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.score = 0;
        self.error = None;
        self.retry_count = 0;
        if self.phase == Phase::Errored {
            self.phase = if self.questions.is_empty() {
                Phase::Idle
            } else {
                Phase::Ready
            };
        }
        if !self.store.remove(PROGRESS_KEY) {
            tracing::warn!("could not delete progress snapshot");
        }
    }

    /// The question at the current position, if the session is ready and
    /// not complete.
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.questions.get(self.position)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn answers(&self) -> &HashMap<String, Selection> {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// The user-facing message for the last load failure, annotated with
    /// the attempt number once the load has been retried.
    pub fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| e.user_message_for_attempt(self.retry_count))
    }

    /// Whether another load attempt is still allowed.
    pub fn can_retry(&self) -> bool {
        self.retry_count < MAX_LOAD_ATTEMPTS
    }

    /// `true` once the position has run past the last question.
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Ready
            && !self.questions.is_empty()
            && self.position == self.questions.len()
    }

    /// Whether progress snapshots are reaching durable storage.
    pub fn storage_available(&self) -> bool {
        self.store.is_available()
    }

    /// An owned snapshot of the observable state, taken after a
    /// transition by the presentation layer.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            question_count: self.questions.len(),
            position: self.position,
            current_question: self.current_question().cloned(),
            score: self.score,
            progress_percent: views::progress_percent(self.position, self.questions.len()),
            loading: self.loading,
            error_message: self.error_message(),
            retry_count: self.retry_count,
            can_retry: self.can_retry(),
            complete: self.is_complete(),
            storage_available: self.storage_available(),
        }
    }

    /// Score is always recomputed from the answer map against the loaded
    /// questions, never incremented independently.
    fn recompute_score(&mut self) {
        self.score = self
            .questions
            .iter()
            .filter(|q| {
                self.answers
                    .get(&q.id)
                    .is_some_and(|selection| q.is_correct(selection))
            })
            .count();
    }

    /// Restore a previously persisted snapshot after a successful load.
    ///
    /// Answers for ids no longer in the bank are dropped, the position is
    /// clamped into range, and the score is recomputed rather than trusted
    /// from storage.
    fn restore_snapshot(&mut self) {
        let Some(raw) = self.store.get(PROGRESS_KEY) else {
            return;
        };
        let snapshot = match serde_json::from_str::<PersistedProgress>(&raw) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring corrupted progress snapshot");
                return;
            }
        };

        self.position = snapshot.current_question_index.min(self.questions.len());
        self.answers = snapshot
            .answers
            .into_iter()
            .filter(|(id, _)| self.questions.iter().any(|q| &q.id == id))
            .collect();
        self.recompute_score();
        tracing::info!(
            position = self.position,
            answered = self.answers.len(),
            score = self.score,
            "resumed from saved progress"
        );
    }

    /// Write the snapshot strictly after the in-memory transition commits.
    fn persist(&mut self) {
        let snapshot = PersistedProgress {
            current_question_index: self.position,
            answers: self.answers.clone(),
            score: self.score,
        };
        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "could not serialize progress snapshot");
                return;
            }
        };
        if !self.store.set(PROGRESS_KEY, &json) {
            tracing::warn!("progress snapshot not persisted");
        }
    }
}
