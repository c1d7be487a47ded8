//! Frame Poll Backend
//!
//! Polls with one vote per user, served as social frames, persisted in a key-value store.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod render;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{AdminOps, LegacyLedger, PollRepository, VoteLedger};
use store::SharedStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub polls: PollRepository,
    pub ledger: VoteLedger,
    pub legacy: LegacyLedger,
    pub admin: AdminOps,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self {
            polls: PollRepository::new(store.clone()),
            ledger: VoteLedger::new(store.clone()),
            legacy: LegacyLedger::new(store.clone()),
            admin: AdminOps::new(store),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Frame Poll Backend");
    tracing::info!("Store backend: {:?}", config.store);
    tracing::info!("Site URL: {}", config.site_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (VOTE_ADMIN_PSK). Admin endpoints are open!");
    }

    let store = store::open_store(&config.store).await?;
    tracing::info!("Connected to {} store", store.backend_name());

    let bind_addr = config.bind_addr;
    let app = create_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.admin_psk.clone();

    let admin_routes = Router::new()
        .route(
            "/admin",
            get(api::get_admin_snapshot).post(api::post_admin_action),
        )
        .route("/admin/votes/{id}", get(api::lookup_vote))
        .layer(middleware::from_fn(move |req, next| {
            auth::admin_psk_layer(psk.clone(), req, next)
        }));

    let api_routes = Router::new()
        .route("/vote-creation", post(api::create_poll))
        .route("/votes/{id}", get(api::get_poll))
        .route("/advanced", post(api::submit_legacy_frame))
        .route("/advanced/{id}", post(api::submit_poll_frame))
        .merge(admin_routes);

    let page_routes = Router::new()
        .route("/advanced/{id}", get(api::poll_share_page))
        .route("/og", get(api::result_image))
        .route("/frame-image", get(api::poll_image))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
