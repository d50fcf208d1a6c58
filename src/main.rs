//! study-hub server binary
//!
//! Loads configuration from `STUDY_HUB__*` environment variables, picks a
//! storage backend, and serves the REST API.

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use study_hub::adapters::http::{api_router, StudyAppState};
use study_hub::adapters::{
    InMemoryStudyStore, PostgresParticipantRepository, PostgresSessionRepository,
};
use study_hub::config::{AppConfig, ServerConfig};
use study_hub::domain::foundation::SystemClock;
use study_hub::ports::{ParticipantRepository, SessionRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting study-hub"
    );

    let sessions: Arc<dyn SessionRepository>;
    let participants: Arc<dyn ParticipantRepository>;
    match &config.database {
        Some(database) => {
            let pool = database.connect().await?;
            info!("Connected to PostgreSQL");
            if database.run_migrations {
                sqlx::migrate!("./migrations").run(&pool).await?;
                info!("Migrations applied");
            }
            sessions = Arc::new(PostgresSessionRepository::new(pool.clone()));
            participants = Arc::new(PostgresParticipantRepository::new(pool));
        }
        None => {
            info!("No database configured, keeping sessions in memory");
            let store = Arc::new(InMemoryStudyStore::new());
            sessions = store.clone();
            participants = store;
        }
    }

    let state = StudyAppState::new(sessions, participants, Arc::new(SystemClock));
    let app = with_layers(api_router(state), &config.server)?;

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "study-hub listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn with_layers(router: Router, server: &ServerConfig) -> Result<Router, Box<dyn Error>> {
    let origins = server.cors_origins_list();
    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = origins
            .iter()
            .map(|origin| HeaderValue::from_str(origin))
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Ok(router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}
