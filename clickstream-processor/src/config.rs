use envconfig::Envconfig;

#[derive(Envconfig, Clone)]
pub struct Config {
    #[envconfig(from = "BIND_HOST", default = "::")]
    pub host: String,

    #[envconfig(from = "BIND_PORT", default = "3305")]
    pub port: u16,

    #[envconfig(default = "localhost:9092")]
    pub kafka_hosts: String,

    #[envconfig(default = "x1")]
    pub kafka_topic: String,

    #[envconfig(default = "clickstream-processor")]
    pub kafka_consumer_group: String,

    // earliest, latest
    #[envconfig(default = "latest")]
    pub kafka_consumer_offset_reset: String,

    // Auto-commit means at-most-once delivery: offsets for a message can be
    // committed before its documents reach the index.
    #[envconfig(default = "true")]
    pub kafka_consumer_auto_commit: bool,

    #[envconfig(default = "false")]
    pub kafka_tls: bool,

    #[envconfig(default = "http://localhost:9200")]
    pub elasticsearch_url: String,

    #[envconfig(default = "clickstream_data")]
    pub elasticsearch_index: String,

    #[envconfig(default = "5000")]
    pub request_timeout_ms: u64,

    // Log aggregate rows instead of indexing them, for local development.
    #[envconfig(default = "false")]
    pub print_sink: bool,
}

impl Config {
    /// Produce a host:port address for binding a TcpListener.
    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
