//! HTTP application assembly

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use marcbench_ingest::{DatasetCache, HubClient, IngestionCoordinator};
use serde_json::json;
use sqlx::SqlitePool;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::{Config, CorsConfig};
use crate::features::{self, SharedCoordinator};
use crate::models::ModelRegistry;
use crate::{db, middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub coordinator: SharedCoordinator,
    pub registry: Arc<ModelRegistry>,
}

impl AppState {
    /// State with an empty dataset cache, a hub client built from `config` and
    /// the default models registered
    pub fn new(db: SqlitePool, config: &Config) -> anyhow::Result<Self> {
        let hub = HubClient::new(&config.hub.base_url)?
            .with_config_name(&config.hub.config_name)
            .with_page_size(config.hub.page_size);

        Ok(Self {
            db,
            coordinator: Arc::new(IngestionCoordinator::new(hub, DatasetCache::new())),
            registry: Arc::new(ModelRegistry::with_defaults()),
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state.clone())
        .nest("/api", features::router(state))
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}

/// Serve `app` until `signal` resolves, then let in-flight requests finish.
///
/// Draining is bounded by `drain_timeout`; connections still open after it are dropped.
pub async fn serve<S>(
    listener: TcpListener,
    app: Router,
    signal: S,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        signal.await;
        trigger.notify_one();
    });

    tokio::select! {
        result = server.into_future() => result,
        _ = async {
            shutdown.notified().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            tracing::warn!(
                "Connections still open after {}s, shutting down anyway",
                drain_timeout.as_secs()
            );
            Ok(())
        },
    }
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Result<Response, StatusCode> {
    match db::health_check(&state.db).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "datasets": state.coordinator.cache().len(),
            })),
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Database health check failed: {:?}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        },
    }
}
