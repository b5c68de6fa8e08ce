//! Claims provider server.
//!
//! Responsibilities:
//! - Load `.env`, parse flags, and build the configuration.
//! - Initialize logging, optional OTLP tracing and the optional metrics exporter.
//! - Serve the claims routes until Ctrl+C.
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE flag parsing so `.env` can provide clap defaults.
//! - Configuration errors are fatal at startup; missing credentials are not.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use claims_config::{ConfigLoader, validate};
use claims_engine::metrics_exporter::MetricsExporter;
use claims_engine::telemetry::TracingConfig;
use claims_engine::{MetricsCollector, ResolutionEngine};
use claims_server::args::Cli;
use claims_server::build_app;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loader = ConfigLoader::new()
        .load_dotenv()
        .context("Failed to load environment")?;

    let cli = Cli::parse();

    let mut tracing_config = TracingConfig::new()
        .with_service_name("claims-provider")
        .with_log_format(cli.log_format.into());
    tracing_config.otlp_endpoint = cli.otlp_endpoint.clone();
    let tracing_guard = tracing_config
        .init()
        .context("Failed to initialize tracing")?;

    let _metrics_exporter = match cli.metrics_bind.as_deref() {
        Some(bind_addr) => Some(
            MetricsExporter::install(bind_addr).context("Failed to start metrics exporter")?,
        ),
        None => None,
    };

    let mut loader = loader
        .from_env()
        .context("Failed to load configuration from environment")?;
    if let Some(ref bind) = cli.bind {
        loader = loader.with_bind_addr(bind.clone());
    }
    let config = loader.build().context("Failed to build configuration")?;

    let validation = validate(config.strategy, &config);
    if validation.is_complete() {
        info!(strategy = %config.strategy, "Configuration complete");
    } else {
        warn!(
            strategy = %config.strategy,
            missing = %validation,
            "Configuration incomplete; requests will resolve without a UPN"
        );
    }

    let bind_addr = config.connection.bind_addr.clone();
    let engine = ResolutionEngine::builder()
        .from_config(Arc::new(config))
        .metrics(MetricsCollector::new())
        .build()
        .context("Failed to build resolution engine")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    info!("listening on {}", bind_addr);

    let served = axum::serve(listener, build_app(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing_guard.shutdown();
    served.context("Server error")
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
