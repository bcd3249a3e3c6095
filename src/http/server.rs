//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum Router (any path, OPTIONS + POST)
//! - Wire up middleware (tracing, request ID, CORS headers)
//! - Serve on a bound listener until shutdown
//!
//! Concurrency is whatever axum/hyper give us: one task per connection.
//! Requests share nothing mutable; `AppState` is read-only.

use axum::{
    routing::{options, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::cors::cors_layers;
use crate::http::handler::{handle_options, handle_post};
use crate::lifecycle::shutdown;
use crate::relay::Fetcher;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub max_body_size: usize,
}

impl AppState {
    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            fetcher: Fetcher::new(&config.upstream)?,
            max_body_size: config.limits.max_body_size,
        })
    }
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new server. Fails only if the outbound client cannot be built.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState::from_config(&config)?;
        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Run the server until `stop` fires. The listener is closed on return.
    pub async fn run(
        self,
        listener: TcpListener,
        stop: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Relay server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(stop))
            .await?;

        tracing::info!("Relay server stopped");
        Ok(())
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Build the router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    let relay: MethodRouter<AppState> = options(handle_options).post(handle_post);
    let [allow_origin, allow_methods, allow_headers] = cors_layers();

    Router::new()
        .route("/", relay.clone())
        .route("/{*path}", relay)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(allow_origin)
        .layer(allow_methods)
        .layer(allow_headers)
}
