use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::{ClientConfig, Message};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::aggregate::aggregate_clicks;
use crate::config::Config;
use crate::error::PipelineError;
use crate::metrics_consts::{
    EMPTY_PAYLOADS, EVENTS_RECEIVED, KAFKA_RECV_ERRORS, MESSAGES_RECEIVED, MESSAGE_PROCESS_TIME,
    PAYLOAD_PARSE_ERRORS, ROWS_AGGREGATED, SINK_ERRORS,
};
use crate::sink::DocumentSink;
use crate::types::parse_batch;

/// Pulls messages from the configured topic and drives each one through
/// aggregation and indexing, one message at a time.
pub struct PipelineLoop {
    consumer: StreamConsumer,
    sink: Arc<dyn DocumentSink>,
}

impl PipelineLoop {
    pub fn new(config: &Config, sink: Arc<dyn DocumentSink>) -> Result<Self, PipelineError> {
        let mut client_config = ClientConfig::new();
        client_config
            .set("group.id", &config.kafka_consumer_group)
            .set("bootstrap.servers", &config.kafka_hosts)
            .set(
                "enable.auto.commit",
                config.kafka_consumer_auto_commit.to_string(),
            )
            .set("auto.offset.reset", &config.kafka_consumer_offset_reset);

        if config.kafka_tls {
            client_config
                .set("security.protocol", "ssl")
                .set("enable.ssl.certificate.verification", "false");
        };

        let consumer: StreamConsumer = client_config.create()?;
        consumer.subscribe(&[&config.kafka_topic])?;

        info!(
            topic = config.kafka_topic,
            group_id = config.kafka_consumer_group,
            "Kafka consumer subscribed"
        );

        Ok(Self { consumer, sink })
    }

    /// Consume until the shutdown signal flips. The message in flight is
    /// processed to completion before the signal is observed again.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("Starting consumer loop");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Shutdown signal received, stopping consumer loop");
                        break;
                    }
                }
                message = self.consumer.recv() => {
                    match message {
                        Ok(message) => {
                            counter!(MESSAGES_RECEIVED).increment(1);

                            let Some(payload) = message.payload() else {
                                warn!("Received message without payload");
                                counter!(EMPTY_PAYLOADS).increment(1);
                                continue;
                            };

                            let start = Instant::now();
                            match process_payload(payload, self.sink.as_ref()).await {
                                Ok(indexed) => {
                                    histogram!(MESSAGE_PROCESS_TIME)
                                        .record(start.elapsed().as_secs_f64());
                                    info!(indexed, "Processed message");
                                }
                                Err(e) => {
                                    warn!(error = %e, "Dropping malformed message");
                                    counter!(PAYLOAD_PARSE_ERRORS).increment(1);
                                }
                            }
                        }
                        Err(e) => {
                            error!(error = %e, "kafka recv error, backing off");
                            counter!(KAFKA_RECV_ERRORS).increment(1);
                            tokio::time::sleep(Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }
    }
}

/// Process one raw message payload: decode it as UTF-8, parse the batch of
/// events, aggregate, and index one document per aggregate row. Returns the
/// number of documents accepted by the sink.
///
/// A payload that fails to decode or parse is an error before anything
/// reaches the sink. A document the sink refuses is dropped with a warning
/// while the remaining rows of the batch are still attempted.
pub async fn process_payload(
    payload: &[u8],
    sink: &dyn DocumentSink,
) -> Result<usize, PipelineError> {
    let text = std::str::from_utf8(payload)?;
    let events = parse_batch(text)?;
    counter!(EVENTS_RECEIVED).increment(events.len() as u64);

    let rows = aggregate_clicks(&events);
    counter!(ROWS_AGGREGATED).increment(rows.len() as u64);

    let mut indexed = 0;
    for row in &rows {
        match sink.index(row).await {
            Ok(()) => indexed += 1,
            Err(e) => {
                warn!(error = %e, "Failed to index aggregate row");
                counter!(SINK_ERRORS).increment(1);
            }
        }
    }

    Ok(indexed)
}
