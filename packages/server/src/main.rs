use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use engine::{ExecutionEngine, LlmEngine};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::database;
use server::state::AppState;
use server::store::SubmissionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?;

    // The service stays up without its database: runs still work, they just
    // come back without a share link.
    let db = match database::init_db(&config.database.url).await {
        Ok(db) => {
            info!("database connected, schema synced");
            Some(db)
        }
        Err(err) => {
            warn!(error = %err, "database unavailable; continuing without persistence");
            None
        }
    };

    let engine: Arc<dyn ExecutionEngine> = Arc::new(LlmEngine::new(&config.engine));
    info!(mode = engine.mode().as_str(), "execution engine initialized");

    let cors = cors_layer(&config);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        store: SubmissionStore::new(db),
        engine,
        config,
    };

    let app = server::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.server.cors.max_age));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
