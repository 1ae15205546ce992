//! `POST /api/eval/run` - Evaluate a cached dataset against a registered model
//!
//! # Request Body
//!
//! ```json
//! {"dataset_name": "docs", "model_name": "mock-vlm", "eval_type": "vlm"}
//! ```
//!
//! # Response
//!
//! - `200 OK` - `{"run_id": 1, "count": 12, "average_score": 0.5}`
//! - `400 Bad Request` - Unsupported eval_type
//! - `404 Not Found` - Dataset not loaded or model not registered

use axum::{extract::State, routing::post, Json, Router};

use super::commands::{RunEvaluationCommand, RunEvaluationResponse};
use crate::api::AppState;
use crate::error::AppResult;

pub fn evaluation_routes() -> Router<AppState> {
    Router::new().route("/run", post(run_evaluation))
}

async fn run_evaluation(
    State(state): State<AppState>,
    Json(command): Json<RunEvaluationCommand>,
) -> AppResult<Json<RunEvaluationResponse>> {
    let response = super::commands::run::handle(
        state.db.clone(),
        state.coordinator.cache(),
        &state.registry,
        command,
    )
    .await?;

    Ok(Json(response))
}
