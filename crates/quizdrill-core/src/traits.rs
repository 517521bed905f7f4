//! Core trait definitions for question sources and snapshot stores.
//!
//! These traits are implemented by the `quizdrill-sources` and
//! `quizdrill-store` crates respectively; the session only ever talks to
//! the trait objects.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::model::QuestionBank;

/// Trait for backends that produce a validated question bank.
///
/// Each `fetch` is idempotent and side-effect-free beyond the underlying
/// request; suppressing overlapping calls is the session's responsibility.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable description of where questions come from
    /// (e.g. a URL or file path). Used in log lines only.
    fn describe(&self) -> String;

    /// Fetch and validate the question bank. All-or-nothing: any
    /// classified failure admits none of the questions.
    async fn fetch(&self) -> Result<QuestionBank, LoadError>;
}

/// Trait for durable key-value snapshot storage.
///
/// Implementations never raise on failure: `set`/`remove` report success as
/// a boolean and `is_available` flags a degraded (in-memory only) backend.
/// Values are opaque strings; serialization is the caller's concern.
pub trait SnapshotStore: Send {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`. Returns `false` only if the value could
    /// not be stored anywhere, including a fallback.
    fn set(&mut self, key: &str, value: &str) -> bool;

    /// Delete the value under `key`. Returns `true` if nothing is stored
    /// under `key` afterwards.
    fn remove(&mut self, key: &str) -> bool;

    /// Whether writes are currently hitting durable storage. `false` means
    /// progress only survives in memory for this session.
    fn is_available(&self) -> bool;
}
