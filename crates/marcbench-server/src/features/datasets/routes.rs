//! Dataset API routes
//!
//! - `GET /api/datasets` - Cached dataset summaries
//! - `POST /api/datasets/load` - Load (or reload) a dataset into the cache

use axum::{extract::State, routing::get, routing::post, Json, Router};
use marcbench_common::types::{DatasetDescriptor, DatasetSummary};

use super::{commands::LoadDatasetCommand, queries::ListDatasetsQuery};
use crate::error::AppResult;
use crate::features::SharedCoordinator;

pub fn datasets_routes() -> Router<SharedCoordinator> {
    Router::new()
        .route("/", get(list_datasets))
        .route("/load", post(load_dataset))
}

/// Load a dataset
///
/// # Request Body
///
/// ```json
/// {"name": "acme/catalogue-scans", "source": "hf", "split": "train", "sample": 20}
/// {"source": "local", "path": "/data/docs"}
/// ```
///
/// # Response
///
/// - `200 OK` - Resolved descriptor
/// - `400 Bad Request` - Invalid descriptor
/// - `422 Unprocessable Entity` - Malformed local dataset file
/// - `502 Bad Gateway` - Dataset hub failure
#[tracing::instrument(skip(coordinator, command), fields(name = %command.name))]
async fn load_dataset(
    State(coordinator): State<SharedCoordinator>,
    Json(command): Json<LoadDatasetCommand>,
) -> AppResult<Json<DatasetDescriptor>> {
    let resolved = super::commands::load::handle(coordinator.as_ref(), command).await?;

    tracing::info!(dataset = %resolved.name, source = %resolved.source, "Dataset loaded via API");

    Ok(Json(resolved))
}

async fn list_datasets(State(coordinator): State<SharedCoordinator>) -> Json<Vec<DatasetSummary>> {
    Json(super::queries::list::handle(coordinator.as_ref(), ListDatasetsQuery::default()))
}
