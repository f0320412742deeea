use anyhow::Context;
use facetest_service::config::FacetestConfig;
use facetest_service::services::metrics;
use facetest_service::startup::Application;
use service_core::observability::init_tracing;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = FacetestConfig::load().context("Failed to load configuration")?;

    init_tracing(
        "facetest-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )?;

    metrics::init_metrics().context("Failed to initialize metrics")?;

    let app = Application::build(config)
        .await
        .context("Failed to build application")?;

    app.run_until_stopped(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("FaceTest service stopped");
    Ok(())
}
