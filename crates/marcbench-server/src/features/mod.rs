//! Feature modules implementing the marcbench API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes. Commands and queries implement `mediator::Request`.
//!
//! # Features
//!
//! - **datasets**: load datasets into the cache and list what is cached
//! - **models**: registered model endpoints
//! - **evaluation**: score a cached dataset against a model
//! - **runs**: evaluation run history

pub mod datasets;
pub mod evaluation;
pub mod models;
pub mod runs;

use axum::Router;
use marcbench_ingest::{HubClient, IngestionCoordinator};
use std::sync::Arc;

use crate::api::AppState;

/// Coordinator shared by every handler
pub type SharedCoordinator = Arc<IngestionCoordinator<HubClient>>;

/// Creates the API router with all feature routes mounted
///
/// - `/datasets` - Dataset loading and listing
/// - `/models` - Model registry
/// - `/eval` - Evaluation runs
/// - `/runs` - Run history
pub fn router(state: AppState) -> Router<()> {
    Router::new()
        .nest("/datasets", datasets::datasets_routes().with_state(state.coordinator.clone()))
        .nest("/models", models::models_routes().with_state(state.registry.clone()))
        .nest("/eval", evaluation::evaluation_routes().with_state(state.clone()))
        .nest("/runs", runs::runs_routes().with_state(state.db.clone()))
}
