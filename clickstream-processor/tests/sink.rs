use std::time::Duration;

use clickstream_processor::error::SinkError;
use clickstream_processor::sink::{DocumentSink, ElasticsearchSink};
use clickstream_processor::types::AggregateRow;
use httpmock::prelude::*;
use serde_json::json;

fn sample_row() -> AggregateRow {
    AggregateRow {
        url: Some("/pricing".to_string()),
        country: Some("US".to_string()),
        click_count: 3,
        avg_time_spent: Some(1714521600.0),
    }
}

#[tokio::test]
async fn test_documents_are_posted_to_the_index() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/clickstream_data/_doc")
            .json_body(json!({
                "url": "/pricing",
                "country": "US",
                "click_count": 3,
                "avg_time_spent": 1714521600.0
            }));
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"result": "created"}"#);
    });

    let sink =
        ElasticsearchSink::new(&server.base_url(), "clickstream_data", Duration::from_secs(5))
            .expect("failed to create sink");

    sink.index(&sample_row()).await.expect("indexing failed");

    mock.assert();
}

#[tokio::test]
async fn test_resending_a_row_creates_a_new_document() {
    // Requests carry no document id, so the index store sees every resend as
    // a brand new document.
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/clickstream_data/_doc");
        then.status(201).body(r#"{"result": "created"}"#);
    });

    let sink =
        ElasticsearchSink::new(&server.base_url(), "clickstream_data", Duration::from_secs(5))
            .expect("failed to create sink");

    sink.index(&sample_row()).await.expect("indexing failed");
    sink.index(&sample_row()).await.expect("indexing failed");

    mock.assert_hits(2);
}

#[tokio::test]
async fn test_rejected_documents_surface_the_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/missing_index/_doc");
        then.status(404);
    });

    let sink = ElasticsearchSink::new(&server.base_url(), "missing_index", Duration::from_secs(5))
        .expect("failed to create sink");

    let err = sink
        .index(&sample_row())
        .await
        .expect_err("indexing should have failed");
    match err {
        SinkError::Rejected(status) => assert_eq!(status.as_u16(), 404),
        other => panic!("unexpected error: {other:?}"),
    }
}
