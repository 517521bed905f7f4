//! Session result reports with JSON persistence.
//!
//! A report is a local artifact the user can keep or diff between
//! practice runs.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::QuizSession;
use crate::views::{self, CategoryStats, WrongAnswer};

/// A point-in-time summary of a quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Total questions in the bank.
    pub question_count: usize,
    /// How many questions have a recorded answer.
    pub answered: usize,
    /// Correctly answered questions.
    pub score: usize,
    /// Whether the session had run to completion.
    pub complete: bool,
    /// Per-category accuracy, sorted by category label.
    pub categories: Vec<CategoryStats>,
    /// Review detail for every incorrect answer.
    pub wrong_answers: Vec<WrongAnswer>,
}

impl SessionReport {
    /// Capture the current state of a session.
    pub fn from_session(session: &QuizSession) -> Self {
        let mut categories: Vec<CategoryStats> =
            views::category_stats(session.questions(), session.answers())
                .into_values()
                .collect();
        categories.sort_by(|a, b| a.category.cmp(&b.category));

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            question_count: session.questions().len(),
            answered: session.answers().len(),
            score: session.score(),
            complete: session.is_complete(),
            categories,
            wrong_answers: views::wrong_answers(session.questions(), session.answers()),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::model::{CorrectAnswer, Question, QuestionBank, QuestionKind, Selection};
    use crate::traits::{QuestionSource, SnapshotStore};

    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;

    struct OneShotSource(QuestionBank);

    #[async_trait]
    impl QuestionSource for OneShotSource {
        fn describe(&self) -> String {
            "inline".into()
        }

        async fn fetch(&self) -> Result<QuestionBank, LoadError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct NullStore(HashMap<String, String>);

    impl SnapshotStore for NullStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
        fn set(&mut self, key: &str, value: &str) -> bool {
            self.0.insert(key.into(), value.into());
            true
        }
        fn remove(&mut self, key: &str) -> bool {
            self.0.remove(key);
            true
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank {
            questions: vec![
                Question {
                    id: "q1".into(),
                    category: "art".into(),
                    kind: QuestionKind::Single,
                    text: "Pick A".into(),
                    options: vec!["A".into(), "B".into()],
                    correct: CorrectAnswer::One("A".into()),
                    explanation: None,
                    image: None,
                },
                Question {
                    id: "q2".into(),
                    category: "art".into(),
                    kind: QuestionKind::Single,
                    text: "Pick B".into(),
                    options: vec!["A".into(), "B".into()],
                    correct: CorrectAnswer::One("B".into()),
                    explanation: None,
                    image: None,
                },
            ],
        }
    }

    #[tokio::test]
    async fn report_captures_session_state() {
        let mut session = QuizSession::new(
            Arc::new(OneShotSource(bank())),
            Box::<NullStore>::default(),
        );
        session.load().await;
        session.answer_current(Selection::One(0));
        session.advance();
        session.answer_current(Selection::One(0)); // wrong
        session.advance();

        let report = SessionReport::from_session(&session);
        assert_eq!(report.question_count, 2);
        assert_eq!(report.answered, 2);
        assert_eq!(report.score, 1);
        assert!(report.complete);
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.wrong_answers.len(), 1);
        assert_eq!(report.wrong_answers[0].question_id, "q2");
    }

    #[tokio::test]
    async fn json_roundtrip() {
        let mut session = QuizSession::new(
            Arc::new(OneShotSource(bank())),
            Box::<NullStore>::default(),
        );
        session.load().await;
        session.answer_current(Selection::One(0));

        let report = SessionReport::from_session(&session);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("session.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.score, 1);
        assert_eq!(loaded.question_count, 2);
    }
}
