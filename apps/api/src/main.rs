mod config;
mod engine;
mod errors;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod tracker;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::engine::DerivationEngine;
use crate::routes::build_router;
use crate::session::{FileStore, KeyValueStore, MemoryStore, ResumeSession, StaticSkillSuggester};
use crate::state::AppState;
use crate::tracker::BuildTracker;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Builder API v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config)?;

    let rubric = config.load_rubric()?;
    let engine = DerivationEngine::new(rubric, config.suggestion_limit);
    info!(
        "Derivation engine ready (suggestion limit: {})",
        engine.suggestion_limit()
    );

    let session = Arc::new(ResumeSession::load(store.clone(), engine));
    let tracker = Arc::new(BuildTracker::load(store));
    let skill_suggester = Arc::new(StaticSkillSuggester::new(config.skill_suggest_delay));

    let state = AppState {
        session,
        tracker,
        skill_suggester,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// File-backed when `DATA_DIR` is set, otherwise in-memory for the process lifetime.
fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir.clone())?;
            info!("Persisting builder data under {}", store.dir().display());
            Ok(Arc::new(store))
        }
        None => {
            info!("DATA_DIR not set; builder data is kept in memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
