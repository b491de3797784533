//! Libria Server - Library Lending Management System
//!
//! REST API server for the Libria catalog, user directory and download
//! tracking.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libria_server::{
    api,
    config::AppConfig,
    library::Library,
    seed::seed_library,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libria_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Libria Server v{}", env!("CARGO_PKG_VERSION"));

    // Build the library aggregate; it is owned here and injected into the
    // services, never a process-wide static.
    let mut library = Library::new();
    if config.seed.enabled {
        seed_library(&mut library, &config.seed.public_base_url)
            .expect("Failed to seed default data");
    }
    let library = Arc::new(RwLock::new(library));

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create services
    let services = Services::new(library);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Catalog (public)
        .route("/books", get(api::books::list_books))
        .route("/books/:isbn", get(api::books::get_book))
        // Administration
        .route("/admin/:user_id/users", get(api::admin::list_users))
        .route("/admin/:user_id/books", post(api::admin::create_book))
        .route("/admin/:user_id/books/:isbn", put(api::admin::update_book))
        .route("/admin/:user_id/books/:isbn", delete(api::admin::delete_book))
        .route(
            "/admin/:user_id/books/:isbn/availability",
            put(api::admin::set_availability),
        )
        // Users
        .route("/users", post(api::users::register))
        .route("/users/login", post(api::users::login))
        .route("/users/:user_id", get(api::users::get_profile))
        .route("/users/:user_id", delete(api::users::delete_user))
        .route("/users/:user_id/profile", put(api::users::update_profile))
        .route("/users/:user_id/password", put(api::users::change_password))
        // Downloads
        .route("/users/:user_id/downloads", get(api::users::list_downloads))
        .route(
            "/users/:user_id/downloads/search",
            get(api::users::search_downloads),
        )
        .route(
            "/users/:user_id/downloads/:isbn",
            post(api::users::add_download),
        )
        .route(
            "/users/:user_id/downloads/:isbn",
            delete(api::users::remove_download),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
