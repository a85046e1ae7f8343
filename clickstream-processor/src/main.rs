use std::future::ready;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use envconfig::Envconfig;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use clickstream_processor::config::Config;
use clickstream_processor::consumer::PipelineLoop;
use clickstream_processor::serve_metrics::{serve, setup_metrics_routes};
use clickstream_processor::sink::{DocumentSink, ElasticsearchSink, PrintSink};

fn setup_tracing() {
    let log_layer = tracing_subscriber::fmt::layer().with_filter(
        EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy()
            .add_directive("rdkafka=warn".parse().unwrap()),
    );
    tracing_subscriber::registry().with(log_layer).init();
}

pub async fn index() -> &'static str {
    "clickstream processor"
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    setup_tracing();
    info!("Starting clickstream processor...");

    let config = Config::init_from_env()?;

    info!(
        topic = config.kafka_topic,
        group_id = config.kafka_consumer_group,
        index = config.elasticsearch_index,
        "Configuration loaded"
    );

    // Liveness and metrics server
    let bind = config.bind();
    let health_router = Router::new()
        .route("/", get(index))
        .route("/_readiness", get(index))
        .route("/_liveness", get(|| ready("ok")));
    let health_router = setup_metrics_routes(health_router);

    tokio::task::spawn(async move {
        serve(health_router, &bind)
            .await
            .expect("failed to start health server");
    });

    // Shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let sink: Arc<dyn DocumentSink> = if config.print_sink {
        Arc::new(PrintSink)
    } else {
        Arc::new(ElasticsearchSink::new(
            &config.elasticsearch_url,
            &config.elasticsearch_index,
            Duration::from_millis(config.request_timeout_ms),
        )?)
    };

    let pipeline = PipelineLoop::new(&config, sink)?;
    pipeline.run(shutdown_rx).await;

    info!("Clickstream processor shut down");
    Ok(())
}
