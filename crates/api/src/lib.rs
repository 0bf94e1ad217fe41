//! # Standby API
//!
//! The API crate provides the web server for the standby rotation service.
//! It exposes RESTful endpoints for the roster, change requests, notifications
//! and exports.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate HTTP requests into [`StandbyService`] calls
//! - **Middleware**: Error mapping shared by every handler
//! - **Config**: Environment and rotation configuration
//!
//! The API uses Axum as the web framework; storage goes through the
//! repository traits of `standby-core`, backed by PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use standby_core::{rotation::RotationPolicy, service::StandbyService};
use standby_db::store::PgStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use standby_api::{ApiState, build_router};
/// use standby_core::{memory::MemoryStore, rotation::RotationPolicy, service::StandbyService};
///
/// let store = Arc::new(MemoryStore::new());
/// let standby = StandbyService::in_memory(store, RotationPolicy::default());
/// let app = build_router(Arc::new(ApiState::new(standby)));
/// ```
pub struct ApiState {
    /// Rotation workflow over whichever store the server was started with
    pub standby: StandbyService,
}

impl ApiState {
    pub fn new(standby: StandbyService) -> Self {
        Self { standby }
    }

    /// State backed by PostgreSQL for every repository seam.
    pub fn postgres(db_pool: PgPool, policy: RotationPolicy) -> Self {
        let store = Arc::new(PgStore::new(db_pool));
        let standby = StandbyService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            policy,
        );
        Self::new(standby)
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Directory of people in the rotation
        .merge(routes::person::routes())
        // Roster and resolution endpoints
        .merge(routes::standby::routes())
        // Change request workflow
        .merge(routes::change_request::routes())
        // Per-user notifications
        .merge(routes::notification::routes())
        // CSV and printable exports
        .merge(routes::export::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port and rotation rules
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Example
///
/// ```no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = standby_api::config::ApiConfig::from_env()?;
/// let db_pool = standby_db::create_pool(&config.database_url).await?;
/// standby_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::postgres(db_pool, config.rotation));
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    info!(
        timezone = %config.rotation.timezone,
        handover_day = %config.rotation.handover_day,
        "Rotation policy loaded"
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
