//! Application startup and lifecycle management.
//!
//! Builds the HTTP router (root, health, `/bfhl`) and runs it until a
//! shutdown signal arrives.

use crate::config::BfhlConfig;
use crate::error::INTERNAL_ERROR_MESSAGE;
use crate::handlers::{bfhl, health_check, root};
use crate::models::Envelope;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{AiDelegate, Dispatcher};
use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub official_email: Arc<str>,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: &BfhlConfig, text_provider: Arc<dyn TextProvider>) -> Self {
        let ai = AiDelegate::new(text_provider, config.gemini.max_concurrency);
        Self {
            official_email: Arc::from(config.official_email.as_str()),
            dispatcher: Dispatcher::new(ai),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let official_email = state.official_email.clone();

    let router = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/bfhl", post(bfhl))
        .with_state(state);

    with_layers(router, official_email)
}

fn with_layers(router: Router, official_email: Arc<str>) -> Router {
    router
        .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send>| {
            panic_response(&official_email, panic)
        }))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

fn panic_response(official_email: &str, panic: Box<dyn Any + Send>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::failure(official_email, INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider.
    pub async fn build(config: BfhlConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            api_base: config.gemini.api_base.clone(),
            model: config.gemini.model.clone(),
            timeout: Duration::from_secs(config.gemini.timeout_secs),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(
            GeminiTextProvider::new(gemini_config)
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?,
        );

        if config.gemini.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set; AI requests will answer \"Error\"");
        }
        tracing::info!(
            model = %config.gemini.model,
            timeout_secs = config.gemini.timeout_secs,
            max_concurrency = config.gemini.max_concurrency,
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around any text provider.
    pub async fn build_with_provider(
        config: BfhlConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("BFHL service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(&config, text_provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
