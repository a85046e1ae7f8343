pub const MESSAGES_RECEIVED: &str = "clickstream_messages_received";
pub const EMPTY_PAYLOADS: &str = "clickstream_empty_payloads";
pub const PAYLOAD_PARSE_ERRORS: &str = "clickstream_payload_parse_errors";
pub const KAFKA_RECV_ERRORS: &str = "clickstream_kafka_recv_errors";
pub const EVENTS_RECEIVED: &str = "clickstream_events_received";
pub const ROWS_AGGREGATED: &str = "clickstream_rows_aggregated";
pub const DOCS_INDEXED: &str = "clickstream_docs_indexed";
pub const SINK_ERRORS: &str = "clickstream_sink_errors";
pub const MESSAGE_PROCESS_TIME: &str = "clickstream_message_process_time_seconds";
