use crate::config::FacetestConfig;
use crate::handlers::{
    age::analyze_age,
    animal::analyze_animal,
    catalog::list_animals,
    health::{health_check, metrics_handler, readiness_check},
};
use crate::services::providers::gemini::GeminiVisionProvider;
use crate::services::providers::VisionProvider;
use crate::services::FaceAnalyzer;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, RequestId,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: FaceAnalyzer,
    pub body_limit_bytes: usize,
}

impl AppState {
    pub fn new(provider: Arc<dyn VisionProvider>, body_limit_bytes: usize) -> Self {
        Self {
            analyzer: FaceAnalyzer::new(provider),
            body_limit_bytes,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.body_limit_bytes;

    let api = Router::new()
        .route("/animal", post(analyze_animal))
        .route("/age", post(analyze_age))
        .route("/animals", get(list_animals))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = RequestId::of(request).unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Bound listener plus router, ready to serve.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: FacetestConfig) -> Result<Self, AppError> {
        let provider = GeminiVisionProvider::new(config.gemini_config())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        tracing::info!(model = %provider.model(), "Initialized Gemini vision provider");
        if provider.health_check().await.is_err() {
            tracing::warn!("GEMINI_API_KEY is empty; every analysis will serve fallback results");
        }

        Self::with_provider(config, Arc::new(provider)).await
    }

    /// Build around an arbitrary provider (port 0 = random port for testing).
    pub async fn with_provider(
        config: FacetestConfig,
        provider: Arc<dyn VisionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(provider, config.common.body_limit_bytes);

        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("FaceTest service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until `shutdown` resolves; in-flight requests are drained.
    pub async fn run_until_stopped(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
