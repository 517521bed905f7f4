//! HTTP question bank source.

use async_trait::async_trait;
use tracing::instrument;

use quizdrill_core::error::LoadError;
use quizdrill_core::model::QuestionBank;
use quizdrill_core::parser::parse_bank;
use quizdrill_core::traits::QuestionSource;

/// Default request bound in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fetches the bank document with a single bounded GET.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, DEFAULT_TIMEOUT_SECS)
    }

    /// Override the request bound. Exceeding it aborts the request and
    /// classifies the failure as a timeout.
    pub fn with_timeout(url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            url: url.to_string(),
            timeout_secs,
            client,
        }
    }

    fn classify_transport(&self, e: reqwest::Error) -> LoadError {
        if e.is_timeout() {
            LoadError::Timeout(self.timeout_secs)
        } else {
            LoadError::Connectivity(e.to_string())
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<QuestionBank, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(LoadError::NotFound(self.url.clone()));
        }
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::Http { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport(e))?;

        parse_bank(&body)
    }
}
