//! `GET /api/runs` - Evaluation run history, newest first

use axum::{extract::State, routing::get, Json, Router};
use sqlx::SqlitePool;

use super::queries::ListRunsQuery;
use crate::db::runs::RunRecord;
use crate::error::AppResult;

pub fn runs_routes() -> Router<SqlitePool> {
    Router::new().route("/", get(list_runs))
}

async fn list_runs(State(pool): State<SqlitePool>) -> AppResult<Json<Vec<RunRecord>>> {
    let runs = super::queries::list::handle(pool, ListRunsQuery::default()).await?;

    tracing::debug!(count = runs.len(), "Runs listed via API");

    Ok(Json(runs))
}
