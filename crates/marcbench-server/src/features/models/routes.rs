//! `GET /api/models` - Registered models

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use super::queries::ListModelsQuery;
use crate::models::{ModelEntry, ModelRegistry};

pub fn models_routes() -> Router<Arc<ModelRegistry>> {
    Router::new().route("/", get(list_models))
}

async fn list_models(State(registry): State<Arc<ModelRegistry>>) -> Json<Vec<ModelEntry>> {
    Json(super::queries::list::handle(&registry, ListModelsQuery::default()))
}
