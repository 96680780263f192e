//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the GetStar and health handlers
//! - Wire up middleware (tracing, timeout, concurrency limit, request ID)
//! - Bind server to listener and shut down gracefully
//! - Translate GET requests into backend SOAP calls

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::BackendClient;
use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::Renderer;
use crate::observability::metrics;
use crate::query::{FlagString, QueryDescriptor, QueryParams};
use crate::soap::{classify, ClassifiedResponse, SoapEnvelope};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub renderer: Arc<Renderer>,
    pub backend_url: Arc<str>,
}

impl AppState {
    pub fn new(backend: BackendClient, renderer: Renderer) -> Self {
        let backend_url = backend.endpoint().to_string().into();
        Self {
            backend: Arc::new(backend),
            renderer: Arc::new(renderer),
            backend_url,
        }
    }
}

/// Error raised while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid backend url: {0}")]
    BackendUrl(#[from] axum::http::uri::InvalidUri),
}

/// HTTP server for the GetStar proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let backend = BackendClient::new(&config.backend)?;
        let renderer = Renderer::new(&config.render);
        let state = AppState::new(backend, renderer);

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.listener.path, get(get_star_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::with_status_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    #[cfg(test)]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.listener.path,
            backend = %self.config.backend.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// GetStar handler: collect, build, call, classify, render.
async fn get_star_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();
    let params = QueryParams::parse(query.as_deref());

    match get_star(&state, &request_id, &params).await {
        Ok(classified) => {
            match &classified {
                ClassifiedResponse::Fault { message } => tracing::warn!(
                    request_id = %request_id,
                    fault = %message,
                    "Backend reported a fault"
                ),
                ClassifiedResponse::Unavailable => tracing::error!(
                    request_id = %request_id,
                    "Backend reply had neither output nor fault"
                ),
                ClassifiedResponse::Success { .. } => {}
            }
            let response = state.renderer.render(&classified);
            finish(&request_id, classified.outcome(), &response, start_time);
            response
        }
        Err(err) => {
            let response = match &err {
                ProxyError::InvalidInput(star) => {
                    tracing::warn!(request_id = %request_id, star = %star, "Rejected star parameter");
                    state.renderer.invalid_input(star)
                }
                ProxyError::Transport(e) => {
                    tracing::error!(request_id = %request_id, error = %e, "Backend call failed");
                    state.renderer.render(&ClassifiedResponse::Unavailable)
                }
            };
            finish(&request_id, err.outcome(), &response, start_time);
            response
        }
    }
}

async fn get_star(
    state: &AppState,
    request_id: &str,
    params: &QueryParams,
) -> Result<ClassifiedResponse, ProxyError> {
    let descriptor = QueryDescriptor::collect(params)?;
    let query = FlagString::from_descriptor(&descriptor);

    tracing::debug!(
        request_id = %request_id,
        star = %descriptor.star,
        format = %descriptor.format,
        query = %query,
        deadline_secs = state.backend.deadline().as_secs(),
        "Forwarding GetStar query"
    );

    let envelope = SoapEnvelope::get_star(&query);
    let raw = state.backend.call(&envelope).await?;
    Ok(classify(&raw))
}

fn finish(request_id: &str, outcome: &'static str, response: &Response, start_time: Instant) {
    let status = response.status().as_u16();
    tracing::info!(
        request_id = %request_id,
        outcome = outcome,
        status = status,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "GetStar request completed"
    );
    metrics::record_request(outcome, status, start_time);
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub backend: String,
}

/// Liveness document; does not contact the backend.
async fn health_handler(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        backend: state.backend_url.to_string(),
    })
}
