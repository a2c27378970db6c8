//! Swim4Love server binary.
//!
//! Wires the swimmer store, avatar directory, live leaderboard, and HTML
//! pages into one Axum server.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (first argument, `SWIM4LOVE_CONFIG`, or
//!    `swim4love.yaml`; defaults if the file is absent)
//! 2. Initialize structured logging (tracing)
//! 3. Open the swimmer store (`PostgreSQL` if a URL is set, else memory)
//! 4. Prepare the avatar directory
//! 5. Seed the leaderboard from the store
//! 6. Serve until `Ctrl-C` or `SIGTERM`, then close the database pool

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use swim4love_db::{InMemorySwimmerStore, PostgresConfig, PostgresPool, SwimmerStore};
use swim4love_server::avatar::AvatarStore;
use swim4love_server::config::{DatabaseSection, LogFormat, LoggingSection};
use swim4love_server::leaderboard::Leaderboard;
use swim4love_server::pages::Pages;
use swim4love_server::{AppState, ServiceConfig, start_server};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

const DEFAULT_CONFIG_FILE: &str = "swim4love.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step fails or the server stops
/// abnormally.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Load configuration. Logging is not up yet, so remember where it
    //    came from and report it afterwards.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    match source {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        event = %config.event.name,
        host = %config.server.host,
        port = config.server.port,
        "swim4love starting"
    );

    // 3. Open the swimmer store.
    let (store, pool) = open_store(&config.database).await?;

    // 4. Prepare the avatar directory.
    let avatars = AvatarStore::new(
        config.avatars.directory(),
        config.avatars.default_avatar.clone(),
    );
    avatars
        .prepare()
        .await
        .map_err(|source| StartupError::Avatars {
            path: avatars.dir().display().to_string(),
            source,
        })?;

    // 5. Seed the leaderboard.
    let leaderboard = Arc::new(Leaderboard::load(store.as_ref()).await?);

    let pages = Pages::new(&config.event.name).map_err(|e| StartupError::Templates {
        message: e.to_string(),
    })?;

    // 6. Serve.
    let state = Arc::new(AppState::new(store, avatars, leaderboard, pages));
    let served = start_server(&config.server, config.avatars.max_upload_bytes, state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }
    served?;

    info!("swim4love stopped");
    Ok(())
}

/// Locate and load the configuration file.
///
/// Returns the path that was read, or `None` when defaults were used.
fn load_config() -> Result<(ServiceConfig, Option<PathBuf>), StartupError> {
    let explicit = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("SWIM4LOVE_CONFIG"))
        .map(PathBuf::from);

    // An explicitly named file must exist; the default one is optional.
    let path = match explicit {
        Some(path) => path,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok((ServiceConfig::parse("")?, None));
            }
            path
        }
    };
    let config = ServiceConfig::from_file(&path)?;
    Ok((config, Some(path)))
}

fn init_tracing(logging: &LoggingSection) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Pick the swimmer store. The pool is returned too so it can be closed
/// on shutdown; it is `None` for the in-memory store.
async fn open_store(
    database: &DatabaseSection,
) -> Result<(Arc<dyn SwimmerStore>, Option<PostgresPool>), StartupError> {
    let Some(url) = database.url.as_deref() else {
        warn!("No database URL configured, swimmers are kept in memory and lost on restart");
        return Ok((Arc::new(InMemorySwimmerStore::new()), None));
    };

    let pg_config = PostgresConfig::new(url)
        .with_max_connections(database.max_connections)
        .with_connect_timeout(database.connect_timeout());
    let pool = PostgresPool::connect(&pg_config).await?;
    pool.ensure_schema().await?;
    Ok((Arc::new(pool.swimmers()), Some(pool)))
}
