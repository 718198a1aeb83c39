pub mod config;
pub mod error;
pub mod metrics;
pub mod observability;
pub mod product;
pub mod rate_limit;

use crate::config::{AppConfig, RateLimitStrategy};
use crate::error::{AdmissionError, Result};
use crate::metrics::{metrics_handler, MetricsService};
use crate::observability::request_id_middleware;
use crate::product::ProductService;
use crate::rate_limit::{
    admission_middleware, GlobalRateLimiter, KeyedRateLimiter, RateLimiter,
};
use axum::{middleware, routing::get, Router as AxumRouter};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use crate::observability::init_tracing;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The admission engine
    pub limiter: Arc<RateLimiter>,
    /// Mock product catalog
    pub products: Arc<ProductService>,
    /// Prometheus handle, absent when no recorder is installed (tests)
    pub metrics: Option<MetricsService>,
}

impl AppState {
    /// Build the state for a configuration, constructing the limiter
    /// variant the configuration selects.
    pub fn from_config(config: &AppConfig, metrics: Option<MetricsService>) -> Self {
        let limits = config.rate_limit.limits();
        let limiter = match config.rate_limit.strategy {
            RateLimitStrategy::PerClient => RateLimiter::PerClient(KeyedRateLimiter::new(limits)),
            RateLimitStrategy::Global => RateLimiter::Global(GlobalRateLimiter::new(limits)),
        };

        Self {
            limiter: Arc::new(limiter),
            products: Arc::new(ProductService::new()),
            metrics,
        }
    }
}

/// Build the application router: product routes behind the admission
/// middleware, plus the operational endpoints.
pub fn build_router(state: AppState) -> AxumRouter {
    let admitted = AxumRouter::new()
        .route("/products", get(product::list_products))
        .route("/products/:id", get(product::get_product))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admission_middleware,
        ));

    AxumRouter::new()
        .merge(admitted)
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Initialize the admission server
pub async fn init_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    info!("Starting admission server");
    info!(
        strategy = ?config.rate_limit.strategy,
        max_requests = config.rate_limit.max_requests,
        window = ?config.rate_limit.window,
        "Admission control configured"
    );

    let metrics = MetricsService::new()?;
    let state = AppState::from_config(&config, Some(metrics));
    let app = build_router(state.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(AdmissionError::Io)?;

    info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AdmissionError::Internal(format!("Server error: {}", e)))?;

    state.limiter.shutdown();
    info!("Admission server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
