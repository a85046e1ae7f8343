use reqwest::StatusCode;
use thiserror::Error;

/// Enumeration of errors raised while pulling and processing messages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("message payload is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to index a document: {0}")]
    Sink(#[from] SinkError),
}

/// Enumeration of errors raised when sending documents to the index store.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("invalid elasticsearch url: {0}")]
    Url(#[from] url::ParseError),

    #[error("error sending indexing request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("document rejected with status {0}")]
    Rejected(StatusCode),
}
