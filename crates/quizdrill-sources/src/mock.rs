//! Mock question source for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizdrill_core::error::LoadError;
use quizdrill_core::model::QuestionBank;
use quizdrill_core::traits::QuestionSource;

/// A mock source for exercising session load behavior without the
/// network.
///
/// Replays a scripted sequence of results; once the script is exhausted
/// it serves the configured fallback bank, or a connectivity failure if
/// none was set.
pub struct MockSource {
    script: Mutex<VecDeque<Result<QuestionBank, LoadError>>>,
    fallback: Option<QuestionBank>,
    call_count: AtomicU32,
}

impl MockSource {
    /// A source that always returns the same bank.
    pub fn with_bank(bank: QuestionBank) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(bank),
            call_count: AtomicU32::new(0),
        }
    }

    /// A source that replays `results` in order.
    pub fn with_script(results: Vec<Result<QuestionBank, LoadError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            fallback: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// How many times `fetch` has been called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuestionSource for MockSource {
    fn describe(&self) -> String {
        "mock".into()
    }

    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(result) = self.script.lock().unwrap().pop_front() {
            return result;
        }
        match &self.fallback {
            Some(bank) => Ok(bank.clone()),
            None => Err(LoadError::Connectivity("mock script exhausted".into())),
        }
    }
}
