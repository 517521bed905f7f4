//! Load error types.
//!
//! These error types represent failures when fetching or validating a
//! question bank. Defined in `quizdrill-core` so the session can classify
//! errors and map them to user-facing messages without string matching.

use thiserror::Error;

/// Errors that can occur when loading a question bank.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The request could not reach the resource.
    #[error("connection failed: {0}")]
    Connectivity(String),

    /// The resource does not exist.
    #[error("question bank not found: {0}")]
    NotFound(String),

    /// The request exceeded the configured bound.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server answered with an error status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was empty.
    #[error("question bank document is empty")]
    Empty,

    /// The body could not be parsed, or the top-level shape is wrong
    /// (missing or non-array `questions` field).
    #[error("malformed question bank: {0}")]
    Malformed(String),

    /// The document parsed but contains zero questions.
    #[error("question bank contains no questions")]
    NoQuestions,

    /// One or more entries are structurally incomplete.
    #[error("{invalid} of {total} question entries are invalid")]
    InvalidEntries { invalid: usize, total: usize },
}

impl LoadError {
    /// One user-facing message per classified kind. Raw failure detail is
    /// kept out of the connectivity/not-found/timeout/format messages and
    /// only surfaces for unclassified HTTP errors.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Connectivity(_) => {
                "Could not reach the question bank. Check your connection and try again."
                    .to_string()
            }
            LoadError::NotFound(_) => {
                "The question bank could not be found.".to_string()
            }
            LoadError::Timeout(_) => {
                "Loading the question bank took too long. Try again.".to_string()
            }
            LoadError::Empty
            | LoadError::Malformed(_)
            | LoadError::NoQuestions
            | LoadError::InvalidEntries { .. } => {
                "The question bank is invalid and could not be loaded.".to_string()
            }
            LoadError::Http { status, message } => {
                format!("Loading failed (HTTP {status}): {message}")
            }
        }
    }

    /// The user-facing message, annotated with the attempt number when the
    /// load has been retried at least once.
    pub fn user_message_for_attempt(&self, attempt: u32) -> String {
        if attempt > 1 {
            format!("{} (attempt {attempt})", self.user_message())
        } else {
            self.user_message()
        }
    }
}
