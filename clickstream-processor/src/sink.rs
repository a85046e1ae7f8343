use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::Url;
use tracing::info;

use crate::error::SinkError;
use crate::metrics_consts::DOCS_INDEXED;
use crate::types::AggregateRow;

/// A destination for aggregated rows. Each row is indexed as one independent
/// document.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    async fn index(&self, row: &AggregateRow) -> Result<(), SinkError>;
}

pub struct PrintSink;

#[async_trait]
impl DocumentSink for PrintSink {
    async fn index(&self, row: &AggregateRow) -> Result<(), SinkError> {
        info!("aggregate row: {:?}", row);
        counter!(DOCS_INDEXED).increment(1);

        Ok(())
    }
}

pub struct ElasticsearchSink {
    client: reqwest::Client,
    endpoint: Url,
}

impl ElasticsearchSink {
    /// `base_url` is the root of the Elasticsearch HTTP API. Documents are
    /// created without an id, so re-sending a row always creates a new
    /// document rather than updating an existing one.
    pub fn new(base_url: &str, index: &str, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = Url::parse(base_url)?.join(&format!("{index}/_doc"))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl DocumentSink for ElasticsearchSink {
    async fn index(&self, row: &AggregateRow) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected(status));
        }

        counter!(DOCS_INDEXED).increment(1);
        Ok(())
    }
}
