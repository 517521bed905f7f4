//! quizdrill-sources — question bank source integrations.
//!
//! Implements the `QuestionSource` trait for HTTP and local files, plus a
//! scriptable mock for testing, and the configuration that selects
//! between them.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, source_for, QuizdrillConfig};
pub use file::FileSource;
pub use http::HttpSource;
pub use mock::MockSource;
