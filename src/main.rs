//! EduApp Teacher Portal
//!
//! Headless controller for the teacher management portal. Holds the teacher
//! list, mock session and dialog state in memory and exposes every user action
//! as a JSON endpoint for the presentation layer.

mod api;
mod config;
mod dialog;
mod errors;
mod layout;
mod models;
mod notify;
mod portal;
mod search;
mod session;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use portal::Portal;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<RwLock<Portal>>,
}

impl AppState {
    pub fn new(portal: Portal) -> Self {
        Self {
            portal: Arc::new(RwLock::new(portal)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EduApp Teacher Portal");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Seed file: {:?}", config.seed_path);
    tracing::info!("Id strategy: {:?}", config.id_strategy);
    tracing::info!("Logout grace period: {:?}", config.logout_grace);

    // Build the portal from injected seed data
    let seed = config.seed()?;
    tracing::info!("Loaded {} seed teachers", seed.teachers.len());
    let portal = Portal::new(seed, config.portal_options())?;

    // Build router
    let app = create_router(AppState::new(portal));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Snapshot
        .route("/portal", get(api::get_portal))
        // Session
        .route("/session/login", post(api::login))
        .route("/session/logout", post(api::logout))
        .route("/session/logout/cancel", post(api::cancel_logout))
        .route("/theme/toggle", post(api::toggle_theme))
        // Teachers
        .route("/teachers", get(api::list_teachers))
        .route(
            "/teachers/{id}",
            get(api::get_teacher).delete(api::delete_teacher),
        )
        // Filters
        .route(
            "/filters",
            get(api::get_filters)
                .put(api::update_filters)
                .delete(api::clear_filters),
        )
        .route("/filters/options", get(api::filter_options))
        // Dialogs
        .route("/dialog", get(api::get_dialog))
        .route("/dialog/view/{id}", post(api::open_view))
        .route("/dialog/edit/{id}", post(api::open_edit))
        .route("/dialog/add", post(api::open_add))
        .route("/dialog/profile", post(api::open_profile))
        .route("/dialog/send/{id}", post(api::open_send))
        .route("/dialog/draft", patch(api::patch_draft))
        .route("/dialog/message", put(api::set_message))
        .route(
            "/dialog/avatar",
            post(api::attach_avatar)
                .delete(api::clear_avatar)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/dialog/save", post(api::save_edit))
        .route("/dialog/submit", post(api::submit_new))
        .route("/dialog/send", post(api::send_message))
        .route("/dialog/close", post(api::close_dialog))
        // Layout
        .route("/layout/viewport", put(api::resize))
        .route("/layout/sidebar/toggle", post(api::toggle_sidebar))
        .route("/layout/sidebar/close", post(api::close_sidebar))
        .route("/layout/filters/toggle", post(api::toggle_filter_panel))
        .route("/layout/profile-menu/toggle", post(api::toggle_profile_menu))
        .route("/layout/outside-click", post(api::outside_click))
        // Notifications
        .route("/notifications", get(api::list_notifications))
        .route("/notifications/{id}", delete(api::dismiss_notification));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
