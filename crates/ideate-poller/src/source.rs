//! Where the poller reads records from.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use ideate_core::api::RecordsResponse;
use ideate_core::entities::AnalysisRecord;

/// A failed fetch. The poller logs these and keeps waiting.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Gateway query behind each completion check.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The owner's records, newest first. With `since`, only records created
    /// at or after that instant.
    async fn records(
        &self,
        owner: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalysisRecord>, SourceError>;
}

/// Reads records from a running Ideate server (`GET /api/records`).
pub struct HttpRecordSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecordSource {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, owner: &str, since: Option<DateTime<Utc>>) -> String {
        let mut url = format!(
            "{}/api/records?email={}",
            self.base_url,
            urlencoding::encode(owner)
        );
        if let Some(since) = since {
            url.push_str("&since=");
            url.push_str(&urlencoding::encode(
                &since.to_rfc3339_opts(SecondsFormat::Micros, true),
            ));
        }
        url
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn records(
        &self,
        owner: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalysisRecord>, SourceError> {
        let resp = self.http.get(self.url(owner, since)).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status {
                status: resp.status().as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        let body: RecordsResponse = resp.json().await?;
        Ok(body.records)
    }
}
