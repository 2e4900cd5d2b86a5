//! Serves the to-do list API.
//!
//! Usage:
//!
//! ```text
//! todo-api
//! ```
//!
//! Settings come from the environment (a `.env` file in the working
//! directory is loaded first):
//!
//! - `TODO_API_HOST`, `TODO_API_PORT`: bind address, `0.0.0.0:8080` by default
//! - `TODO_API_STORAGE`: `memory` (default) or `postgres`
//! - `DATABASE_URL`, `TODO_API_DB_POOL_SIZE`: `PostgreSQL` connection settings
//! - `TODO_API_REQUEST_TIMEOUT_SECS`: per-request deadline, 30 by default
//! - `TODO_API_LOG_FORMAT`: `text` (default) or `json`
//! - `RUST_LOG`: tracing filter, `todo_api=info,tower_http=info` by default

use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_api::app;
use todo_api::config::{AppConfig, ConfigError, LogFormat, StorageMode};
use todo_api::db;
use todo_api::http::{AppState, router};
use todo_api::user::adapters::argon2::Argon2PasswordHasher;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_FILTER: &str = "todo_api=info,tower_http=info";

fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(&config))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn serve(config: &AppConfig) -> Result<(), BoxError> {
    info!(
        address = %config.bind_address,
        storage = ?config.storage,
        timeout_secs = config.request_timeout.as_secs(),
        "starting todo-api"
    );

    let state = build_state(config).await?;
    let app = router(state, config.request_timeout);
    let listener = TcpListener::bind(config.bind_address).await?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;
    info!("server stopped");
    Ok(())
}

async fn build_state(config: &AppConfig) -> Result<AppState, BoxError> {
    let hasher = Argon2PasswordHasher::new();
    match config.storage {
        StorageMode::InMemory => {
            warn!("using in-memory storage; data is lost on shutdown");
            Ok(app::in_memory_state(hasher))
        }
        StorageMode::Postgres => {
            let url = config.database_url.as_deref().ok_or(ConfigError::Missing {
                key: "DATABASE_URL",
                required_by: "TODO_API_STORAGE=postgres",
            })?;
            let pool = db::build_pool(url, config.pool_size)?;
            db::migrate(&pool).await?;
            info!(pool_size = config.pool_size, "database schema ready");
            Ok(app::postgres_state(&pool, hasher))
        }
    }
}

async fn shutdown_signal(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        warn!(error = %err, "cannot listen for shutdown signal; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
