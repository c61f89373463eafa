//! HTTP API server with observability for the seat booking workflow.
//!
//! Provides per-session endpoints for the booking stages, checkout and the
//! ticket view, with structured logging (tracing) and Prometheus metrics.

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use checkout::{CheckoutConfig, InMemoryIdentityService};
use domain::Catalog;
use metrics_exporter_prometheus::PrometheusHandle;
use store::DocumentStore;
use ticket::PseudoQrRenderer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::{AppState, SessionRegistry};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: DocumentStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/catalog", get(routes::catalog::get::<S>))
        .route("/sessions", post(routes::sessions::create::<S>))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get::<S>).delete(routes::sessions::delete::<S>),
        )
        .route(
            "/sessions/{id}/showtime",
            post(routes::sessions::set_showtime::<S>),
        )
        .route("/sessions/{id}/seats", get(routes::sessions::seats::<S>))
        .route(
            "/sessions/{id}/seats/confirm",
            post(routes::sessions::confirm_seats::<S>),
        )
        .route(
            "/sessions/{id}/seats/{seat}/toggle",
            post(routes::sessions::toggle_seat::<S>),
        )
        .route("/sessions/{id}/step", post(routes::sessions::set_step::<S>))
        .route(
            "/sessions/{id}/checkout",
            post(routes::sessions::checkout::<S>),
        )
        .route("/sessions/{id}/reset", post(routes::sessions::reset::<S>))
        .route(
            "/sessions/{id}/notifications",
            get(routes::sessions::notifications::<S>),
        )
        .route("/sessions/{id}/ticket", get(routes::ticket::get::<S>))
        .route(
            "/sessions/{id}/ticket/export",
            get(routes::ticket::export::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given store and mock identity service.
pub fn create_default_state<S: DocumentStore + Clone + 'static>(
    store: S,
    catalog: Catalog,
    checkout_config: CheckoutConfig,
    ticket_size: u32,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        sessions: SessionRegistry::new(),
        store,
        identity: InMemoryIdentityService::new(),
        catalog,
        renderer: PseudoQrRenderer::new(ticket_size),
        checkout_config,
    })
}
