//! Notebook server binary.
//!
//! Loads configuration, prepares the database, builds the sentiment
//! classifier and serves the API until SIGTERM/SIGINT.

use notebook_server::{app, config, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("NOTEBOOK_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

/// Creates the `pages` table if needed and seeds a fresh notebook.
///
/// Runs once, before the listener is bound.
fn prepare_database(pool: &notebook_db::DbPool) {
    let conn = pool
        .get()
        .expect("failed to get database connection for startup");

    let applied = notebook_db::run_migrations(&conn).expect("failed to run database migrations");
    if applied > 0 {
        tracing::info!(count = applied, "applied database migrations");
    }

    let seeded =
        notebook_pages::seed_example_pages(&conn).expect("failed to seed example pages");
    if seeded == 0 {
        tracing::debug!("existing pages found, example pages not inserted");
    }
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration; the server cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let pool = notebook_db::create_pool(&config.database.path, config.database.runtime_settings())
        .expect("failed to create database pool: check database.path in config");
    prepare_database(&pool);

    let classifier = notebook_sentiment::build_classifier(&config.classifier)
        .expect("failed to build sentiment classifier: check [classifier] in config");

    let state = AppState {
        pool,
        classifier,
        cors_origins: config.cors.allowed_origins.clone(),
    };

    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, "starting notebook server");

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address: is another process using this port?");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("notebook server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
