//! Local file question bank source, the fully offline path.

use std::path::PathBuf;

use async_trait::async_trait;

use quizdrill_core::error::LoadError;
use quizdrill_core::model::QuestionBank;
use quizdrill_core::parser::parse_bank;
use quizdrill_core::traits::QuestionSource;

/// Reads the bank document from a path on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(self.path.display().to_string()));
            }
            Err(e) => return Err(LoadError::Connectivity(e.to_string())),
        };

        parse_bank(&content)
    }
}
