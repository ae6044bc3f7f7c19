use crate::config::Config;
use crate::handlers;
use crate::services::{LocalStore, MongoDb, MongoStore, RunStore};
use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Largest accepted request body. Full sessions arrive as one POST with the
/// trial table embedded both as JSON and CSV.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RunStore>,
}

pub fn build_router(state: AppState) -> Router {
    let static_dir = &state.config.server.static_dir;
    let experiment_page = ServeFile::new(static_dir.join("index.html"));
    // ServeDir alone answers non-GET methods with 405; unmatched routes must
    // 404 whatever the method, so those requests go to the 404 fallback too.
    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    // The experiment page is reachable both at the root (via the static
    // fallback) and at /experiment; anything unmatched falls through to
    // ServeDir, which 404s on missing files.
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/experiment-data", post(handlers::submit_run))
        .route("/finish", get(handlers::finish_page))
        .route_service("/experiment", experiment_page)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct Application {
    port: u16,
    server: Box<dyn Future<Output = std::io::Result<()>> + Send + Unpin>,
    db: Option<MongoDb>,
}

impl Application {
    /// Resolves the run store, binds the listener, and prepares the server.
    ///
    /// Database policy: with `MONGODB_URI` set, an unreachable database is a
    /// startup error; with it unset, the service degrades to local mode and
    /// persists nothing.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let db = match config.database.uri.as_deref() {
            Some(uri) => {
                let db = MongoDb::connect(uri, &config.database.db_name).await?;
                db.health_check().await.map_err(|e| {
                    tracing::error!("MongoDB is unreachable, refusing to start: {}", e);
                    e
                })?;
                tracing::info!(
                    "Writing runs to {}.{}",
                    config.database.db_name,
                    config.database.coll_name
                );
                Some(db)
            }
            None => {
                tracing::warn!(
                    "MONGODB_URI is not set; running in local mode, submissions will not be persisted"
                );
                None
            }
        };

        let store: Arc<dyn RunStore> = match &db {
            Some(db) => Arc::new(MongoStore::new(db.collection(&config.database.coll_name))),
            None => Arc::new(LocalStore::default()),
        };

        let state = AppState {
            config: config.clone(),
            store,
        };
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            db,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The database handle, absent in local mode.
    pub fn db(&self) -> Option<&MongoDb> {
        self.db.as_ref()
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
