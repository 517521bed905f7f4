//! JSON question bank parser.
//!
//! Parses a bank document from its wire shape
//! `{ "questions": [ {id, category, type, text, options, correct, ...} ] }`
//! and validates it. Validation is all-or-nothing: a classified failure
//! admits none of the questions.

use serde::Deserialize;

use crate::error::LoadError;
use crate::model::{CorrectAnswer, Question, QuestionBank, QuestionKind};

/// Intermediate structure for the top-level document.
///
/// `questions` stays an untyped value so a missing or non-array field can
/// be classified separately from per-entry invalidity.
#[derive(Debug, Deserialize)]
struct RawBankFile {
    #[serde(default)]
    questions: Option<serde_json::Value>,
}

/// Intermediate structure for one question entry. Every field is optional
/// so that missing required fields are counted per entry instead of
/// failing the whole document.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct: Option<CorrectAnswer>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    image: Option<String>,
}

/// Parse a bank document into a validated `QuestionBank`.
pub fn parse_bank(content: &str) -> Result<QuestionBank, LoadError> {
    if content.trim().is_empty() {
        return Err(LoadError::Empty);
    }

    let raw: RawBankFile =
        serde_json::from_str(content).map_err(|e| LoadError::Malformed(e.to_string()))?;

    let entries = match raw.questions {
        None => return Err(LoadError::Malformed("missing `questions` field".into())),
        Some(serde_json::Value::Array(entries)) => entries,
        Some(_) => {
            return Err(LoadError::Malformed("`questions` is not an array".into()));
        }
    };

    if entries.is_empty() {
        return Err(LoadError::NoQuestions);
    }

    let total = entries.len();
    let mut questions = Vec::with_capacity(total);
    let mut invalid = 0usize;

    for entry in entries {
        match serde_json::from_value::<RawQuestion>(entry)
            .ok()
            .and_then(build_question)
        {
            Some(q) => questions.push(q),
            None => invalid += 1,
        }
    }

    if invalid > 0 {
        return Err(LoadError::InvalidEntries { invalid, total });
    }

    Ok(QuestionBank { questions })
}

/// Turn a raw entry into a validated `Question`, or `None` if it is
/// structurally invalid.
fn build_question(raw: RawQuestion) -> Option<Question> {
    let id = raw.id?;
    let text = raw.text?;
    let options = raw.options?;
    let correct = raw.correct?;

    if id.is_empty() || options.is_empty() || correct.values().is_empty() {
        return None;
    }

    // Every correct string must reference an option that exists.
    if !correct
        .values()
        .iter()
        .all(|c| options.iter().any(|o| o == c))
    {
        return None;
    }

    // Kind defaults to the shape of `correct` when the field is absent.
    let kind = match raw.kind {
        Some(s) => s.parse::<QuestionKind>().ok()?,
        None => match correct {
            CorrectAnswer::One(_) => QuestionKind::Single,
            CorrectAnswer::Many(_) => QuestionKind::Multiple,
        },
    };

    // A single-answer question cannot claim several correct options.
    if kind == QuestionKind::Single && correct.values().len() != 1 {
        return None;
    }

    Some(Question {
        id,
        category: raw.category.unwrap_or_default(),
        kind,
        text,
        options,
        correct,
        explanation: raw.explanation,
        image: raw.image,
    })
}

/// An advisory warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a parsed bank for issues that do not block loading.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate ids break answer recording and resume.
    let mut seen_ids = std::collections::HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question id: {}", q.id),
            });
        }
    }

    for q in &bank.questions {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "prompt text is blank".into(),
            });
        }
    }

    for q in &bank.questions {
        if q.options.len() == 1 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "only one option, trivially answerable".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_BANK: &str = r#"{
        "questions": [
            {
                "id": "capital-fr",
                "category": "geography",
                "type": "single",
                "text": "What is the capital of France?",
                "options": ["Berlin", "Paris", "Madrid"],
                "correct": "Paris",
                "explanation": "Paris has been the capital since 987."
            },
            {
                "id": "primes",
                "category": "math",
                "type": "multiple",
                "text": "Which of these are prime?",
                "options": ["2", "3", "4", "5"],
                "correct": ["2", "3", "5"]
            }
        ]
    }"#;

    #[test]
    fn parse_valid_bank() {
        let bank = parse_bank(VALID_BANK).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions[0].id, "capital-fr");
        assert_eq!(bank.questions[0].kind, QuestionKind::Single);
        assert_eq!(bank.questions[1].kind, QuestionKind::Multiple);
        assert_eq!(
            bank.questions[1].correct_indices(),
            [0, 1, 3].into_iter().collect()
        );
    }

    #[test]
    fn parse_missing_optional_fields() {
        let bank = parse_bank(
            r#"{"questions": [{"id": "q1", "text": "Pick A", "options": ["A", "B"], "correct": "A"}]}"#,
        )
        .unwrap();
        let q = &bank.questions[0];
        assert_eq!(q.category, "");
        // Kind inferred from the shape of `correct`.
        assert_eq!(q.kind, QuestionKind::Single);
        assert!(q.explanation.is_none());
        assert!(q.image.is_none());
    }

    #[test]
    fn kind_inferred_as_multiple_from_array_correct() {
        let bank = parse_bank(
            r#"{"questions": [{"id": "q1", "text": "Pick both", "options": ["A", "B"], "correct": ["A", "B"]}]}"#,
        )
        .unwrap();
        assert_eq!(bank.questions[0].kind, QuestionKind::Multiple);
    }

    #[test]
    fn empty_body_classified_empty() {
        assert!(matches!(parse_bank(""), Err(LoadError::Empty)));
        assert!(matches!(parse_bank("   \n\t"), Err(LoadError::Empty)));
    }

    #[test]
    fn unparsable_body_classified_malformed() {
        assert!(matches!(
            parse_bank("this is not { json"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn missing_questions_field_classified_malformed() {
        assert!(matches!(
            parse_bank(r#"{"items": []}"#),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn non_array_questions_classified_malformed() {
        assert!(matches!(
            parse_bank(r#"{"questions": "lots"}"#),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn zero_questions_classified_no_questions() {
        assert!(matches!(
            parse_bank(r#"{"questions": []}"#),
            Err(LoadError::NoQuestions)
        ));
    }

    #[test]
    fn invalid_entries_are_counted() {
        // One valid, one missing `correct`, one missing `text`.
        let doc = r#"{
            "questions": [
                {"id": "ok", "text": "Pick A", "options": ["A", "B"], "correct": "A"},
                {"id": "no-correct", "text": "?", "options": ["A"]},
                {"id": "no-text", "options": ["A"], "correct": "A"}
            ]
        }"#;
        match parse_bank(doc) {
            Err(LoadError::InvalidEntries { invalid, total }) => {
                assert_eq!(invalid, 2);
                assert_eq!(total, 3);
            }
            other => panic!("expected InvalidEntries, got {other:?}"),
        }
    }

    #[test]
    fn correct_must_reference_an_option() {
        let doc = r#"{
            "questions": [
                {"id": "q1", "text": "?", "options": ["A", "B"], "correct": "C"}
            ]
        }"#;
        assert!(matches!(
            parse_bank(doc),
            Err(LoadError::InvalidEntries { invalid: 1, total: 1 })
        ));
    }

    #[test]
    fn single_kind_rejects_several_correct_options() {
        let doc = r#"{
            "questions": [
                {"id": "q1", "type": "single", "text": "?", "options": ["A", "B"], "correct": ["A", "B"]}
            ]
        }"#;
        assert!(matches!(
            parse_bank(doc),
            Err(LoadError::InvalidEntries { invalid: 1, total: 1 })
        ));
    }

    #[test]
    fn validate_duplicate_ids() {
        let doc = r#"{
            "questions": [
                {"id": "same", "text": "First", "options": ["A"], "correct": "A"},
                {"id": "same", "text": "Second", "options": ["B"], "correct": "B"}
            ]
        }"#;
        let bank = parse_bank(doc).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
    }

    #[test]
    fn validate_blank_prompt() {
        let doc = r#"{
            "questions": [
                {"id": "q1", "text": "   ", "options": ["A", "B"], "correct": "A"}
            ]
        }"#;
        let bank = parse_bank(doc).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("blank")));
    }
}
